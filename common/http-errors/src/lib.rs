use axum::{http::{StatusCode, HeaderValue, header::CONTENT_TYPE}, response::{IntoResponse, Response}};

pub const ERROR_CODE_HEADER: &str = "x-error-code";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed. Use POST";

/// Transport-level failures. Rendered as a short plain-text body plus an
/// `X-Error-Code` header for metrics and log correlation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest { code: &'static str, message: String },
    MethodNotAllowed,
    NotFound { code: &'static str },
    Internal { message: Option<String> },
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(e: E) -> Self { Self::Internal { message: Some(e.to_string()) } }
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self { Self::BadRequest { code, message: message.into() } }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { code, .. } => *code,
            ApiError::MethodNotAllowed => "method_not_allowed",
            ApiError::NotFound { code } => *code,
            ApiError::Internal { .. } => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_code = self.code();
        let body = match self {
            ApiError::BadRequest { message, .. } => message,
            ApiError::MethodNotAllowed => METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            ApiError::NotFound { .. } => "404 page not found".to_string(),
            ApiError::Internal { message } => message.unwrap_or_else(|| "internal server error".to_string()),
        };
        let mut resp = (status, format!("{body}\n")).into_response();
        resp.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
        if let Ok(val) = HeaderValue::from_str(error_code) {
            resp.headers_mut().insert(ERROR_CODE_HEADER, val);
        }
        resp
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
