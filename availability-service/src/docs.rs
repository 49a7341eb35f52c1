use axum::{
    http::{header::LOCATION, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use serde_json::{json, Value};

pub async fn redirect_to_docs() -> impl IntoResponse {
    (StatusCode::MOVED_PERMANENTLY, [(LOCATION, "/docs")])
}

pub async fn docs_page() -> Html<&'static str> {
    Html(DOCS_HTML)
}

pub async fn openapi_spec() -> Json<Value> {
    Json(openapi_document())
}

pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Product Availability API",
            "description": "Check product availability across warehouses. A 10% reserve buffer is always held back and weekend orders require twice the requested quantity in stock.",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {
            "/api/check-availability": {
                "post": {
                    "summary": "Check product availability",
                    "operationId": "checkAvailability",
                    "tags": ["Availability"],
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/AvailabilityRequest" },
                                "example": {
                                    "product_id": "PROD-123",
                                    "quantity": 5,
                                    "warehouse_location": "DE-Berlin"
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "Availability verdict (also returned when the product is unavailable)",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/AvailabilityResponse" }
                                }
                            }
                        },
                        "400": {
                            "description": "Malformed JSON, empty product_id or warehouse_location, or quantity <= 0",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        },
                        "405": {
                            "description": "Method not allowed. Use POST",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "AvailabilityRequest": {
                    "type": "object",
                    "required": ["product_id", "quantity", "warehouse_location"],
                    "properties": {
                        "product_id": { "type": "string", "minLength": 1 },
                        "quantity": { "type": "integer", "minimum": 1 },
                        "warehouse_location": { "type": "string", "minLength": 1 }
                    }
                },
                "AvailabilityResponse": {
                    "type": "object",
                    "required": ["available", "available_quantity", "reason", "warehouse"],
                    "properties": {
                        "available": { "type": "boolean" },
                        "available_quantity": { "type": "integer", "minimum": 0 },
                        "reason": { "type": "string" },
                        "warehouse": { "type": "string" }
                    }
                }
            }
        }
    })
}

const DOCS_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Product Availability API</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
        };
    </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_check_availability() {
        let doc = openapi_document();
        assert_eq!(doc["openapi"], "3.0.0");
        assert!(doc["paths"]["/api/check-availability"]["post"].is_object());
        assert_eq!(
            doc["components"]["schemas"]["AvailabilityResponse"]["required"][1],
            "available_quantity"
        );
    }
}
