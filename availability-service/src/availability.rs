use serde::{Deserialize, Serialize};

/// Share of total stock that is never offered for sale.
pub const RESERVE_RATIO: f64 = 0.10;
/// Required-quantity factor applied on Saturdays and Sundays.
pub const WEEKEND_MULTIPLIER: u64 = 2;

pub const REASON_NOT_FOUND: &str = "Product not found in specified warehouse";
pub const REASON_OUT_OF_STOCK: &str = "Product is out of stock";
pub const REASON_SUFFICIENT: &str = "Sufficient stock available";

/// A validated availability question. Callers reject empty identifiers and
/// non-positive quantities before building one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AvailabilityRequest {
    pub product_id: String,
    pub quantity: u64,
    pub warehouse_location: String,
}

/// Result of asking a stock source about a (product, warehouse) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLookup {
    Found(u64),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityVerdict {
    pub available: bool,
    pub available_quantity: u64,
    pub reason: String,
    pub warehouse: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Available,
    Insufficient,
    OutOfStock,
    NotFound,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Available => "available",
            Outcome::Insufficient => "insufficient",
            Outcome::OutOfStock => "out_of_stock",
            Outcome::NotFound => "not_found",
        }
    }
}

impl AvailabilityVerdict {
    pub fn outcome(&self) -> Outcome {
        if self.available {
            Outcome::Available
        } else if self.reason == REASON_NOT_FOUND {
            Outcome::NotFound
        } else if self.reason == REASON_OUT_OF_STOCK {
            Outcome::OutOfStock
        } else {
            Outcome::Insufficient
        }
    }
}

/// Units held back from `stock`. Multiplies in floating point and truncates
/// toward zero, so 25 reserves 2 and 5 reserves nothing.
pub fn reserve_buffer(stock: u64) -> u64 {
    (stock as f64 * RESERVE_RATIO) as u64
}

/// Stock left for orders once the reserve is taken out.
pub fn sellable_quantity(stock: u64) -> u64 {
    stock.saturating_sub(reserve_buffer(stock))
}

pub fn required_quantity(quantity: u64, is_weekend: bool) -> u64 {
    if is_weekend {
        quantity.saturating_mul(WEEKEND_MULTIPLIER)
    } else {
        quantity
    }
}

/// Decide whether `request` can be served from the resolved stock figure.
///
/// Pure: the weekend flag comes from the caller and nothing is read or kept
/// between calls. Not-found and zero stock short-circuit before the
/// reserve/weekend comparison and differ from each other only in `reason`.
pub fn evaluate(
    request: &AvailabilityRequest,
    lookup: StockLookup,
    is_weekend: bool,
) -> AvailabilityVerdict {
    let warehouse = request.warehouse_location.clone();

    let stock = match lookup {
        StockLookup::Found(stock) => stock,
        StockLookup::NotFound => {
            return AvailabilityVerdict {
                available: false,
                available_quantity: 0,
                reason: REASON_NOT_FOUND.to_string(),
                warehouse,
            }
        }
    };

    let available_quantity = sellable_quantity(stock);

    if stock == 0 {
        return AvailabilityVerdict {
            available: false,
            available_quantity: 0,
            reason: REASON_OUT_OF_STOCK.to_string(),
            warehouse,
        };
    }

    let required = required_quantity(request.quantity, is_weekend);
    let available = available_quantity >= required;

    let reason = match (available, is_weekend) {
        (true, false) => REASON_SUFFICIENT.to_string(),
        (true, true) => format!(
            "Sufficient stock available (weekend: requires {} units in stock for {} order)",
            required, request.quantity
        ),
        (false, false) => format!(
            "Insufficient stock (requires {} units, only {} available after reserve)",
            required, available_quantity
        ),
        (false, true) => format!(
            "Insufficient stock (weekend: requires {} units, only {} available after reserve)",
            required, available_quantity
        ),
    };

    AvailabilityVerdict {
        available,
        available_quantity,
        reason,
        warehouse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(quantity: u64) -> AvailabilityRequest {
        AvailabilityRequest {
            product_id: "PROD-123".into(),
            quantity,
            warehouse_location: "DE-Berlin".into(),
        }
    }

    #[test]
    fn reserve_buffer_truncates() {
        let cases = [
            (100, 90),
            (50, 45),
            (25, 23),
            (15, 14),
            (10, 9),
            (11, 10),
            (5, 5),
            (1, 1),
            (0, 0),
        ];
        for (stock, expected) in cases {
            assert_eq!(sellable_quantity(stock), expected, "stock={stock}");
        }
    }

    #[test]
    fn weekday_sufficient() {
        let verdict = evaluate(&request(5), StockLookup::Found(100), false);
        assert_eq!(
            verdict,
            AvailabilityVerdict {
                available: true,
                available_quantity: 90,
                reason: "Sufficient stock available".into(),
                warehouse: "DE-Berlin".into(),
            }
        );
        assert_eq!(verdict.outcome(), Outcome::Available);
    }

    #[test]
    fn weekend_sufficient_mentions_doubled_requirement() {
        let verdict = evaluate(&request(200), StockLookup::Found(500), true);
        assert!(verdict.available);
        assert_eq!(verdict.available_quantity, 450);
        assert_eq!(
            verdict.reason,
            "Sufficient stock available (weekend: requires 400 units in stock for 200 order)"
        );
    }

    #[test]
    fn weekday_insufficient() {
        let verdict = evaluate(&request(24), StockLookup::Found(25), false);
        assert!(!verdict.available);
        assert_eq!(verdict.available_quantity, 23);
        assert_eq!(
            verdict.reason,
            "Insufficient stock (requires 24 units, only 23 available after reserve)"
        );
        assert_eq!(verdict.outcome(), Outcome::Insufficient);
    }

    #[test]
    fn weekend_insufficient() {
        let verdict = evaluate(&request(50), StockLookup::Found(100), true);
        assert!(!verdict.available);
        assert_eq!(verdict.available_quantity, 90);
        assert_eq!(
            verdict.reason,
            "Insufficient stock (weekend: requires 100 units, only 90 available after reserve)"
        );
    }

    #[test]
    fn out_of_stock_ignores_quantity() {
        for quantity in [1, 5, 1_000] {
            let verdict = evaluate(&request(quantity), StockLookup::Found(0), quantity % 2 == 0);
            assert!(!verdict.available);
            assert_eq!(verdict.available_quantity, 0);
            assert_eq!(verdict.reason, REASON_OUT_OF_STOCK);
            assert_eq!(verdict.outcome(), Outcome::OutOfStock);
        }
    }

    #[test]
    fn not_found_ignores_quantity() {
        let verdict = evaluate(&request(1), StockLookup::NotFound, true);
        assert!(!verdict.available);
        assert_eq!(verdict.available_quantity, 0);
        assert_eq!(verdict.reason, REASON_NOT_FOUND);
        assert_eq!(verdict.warehouse, "DE-Berlin");
        assert_eq!(verdict.outcome(), Outcome::NotFound);
    }

    #[test]
    fn exact_boundary_is_available() {
        assert!(evaluate(&request(9), StockLookup::Found(10), false).available);
        assert!(!evaluate(&request(10), StockLookup::Found(10), false).available);
        assert!(evaluate(&request(45), StockLookup::Found(100), true).available);
        assert!(!evaluate(&request(46), StockLookup::Found(100), true).available);
    }

    #[test]
    fn huge_quantity_does_not_overflow() {
        let verdict = evaluate(&request(u64::MAX), StockLookup::Found(100), true);
        assert!(!verdict.available);
        assert_eq!(required_quantity(u64::MAX, true), u64::MAX);
    }
}
