// handlers/mod.rs - Two-tier handler layout
//
// Public (no session) → Protected (admin session checked by `require_admin`)
pub mod protected;
pub mod public;

use crate::error::ApiError;

/// Parse the `:id` path segment. Non-integers are a field-attributed 400.
pub(crate) fn parse_product_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim().parse::<i32>().map_err(|_| {
        tracing::debug!("Rejected product id: {:?}", raw);
        ApiError::validation_error("Invalid product id", Some("id".to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_ids() {
        assert_eq!(parse_product_id("42").unwrap(), 42);
    }

    #[test]
    fn rejects_non_integer_ids() {
        for raw in ["abc", "1.5", "", "99999999999"] {
            let err = parse_product_id(raw).unwrap_err();
            assert_eq!(err.message(), "Invalid product id");
        }
    }
}
