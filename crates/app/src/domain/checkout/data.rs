//! Checkout Data

use crate::domain::{checkout::errors::CheckoutError, orders::models::Order};

/// Longest accepted shipping address, in characters.
pub const MAX_SHIPPING_ADDRESS_LEN: usize = 500;

/// Longest accepted payment method, in characters.
pub const MAX_PAYMENT_METHOD_LEN: usize = 50;

/// Buyer supplied checkout input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub shipping_address: String,
    pub payment_method: String,
}

impl CheckoutDetails {
    pub fn new(shipping_address: impl Into<String>, payment_method: impl Into<String>) -> Self {
        Self {
            shipping_address: shipping_address.into(),
            payment_method: payment_method.into(),
        }
    }

    /// Trimmed copy of the details.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] or [`CheckoutError::FieldTooLong`].
    pub fn validated(&self) -> Result<Self, CheckoutError> {
        Ok(Self {
            shipping_address: checked_field(
                "shipping address",
                &self.shipping_address,
                MAX_SHIPPING_ADDRESS_LEN,
            )?,
            payment_method: checked_field(
                "payment method",
                &self.payment_method,
                MAX_PAYMENT_METHOD_LEN,
            )?,
        })
    }
}

fn checked_field(field: &'static str, value: &str, max: usize) -> Result<String, CheckoutError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(CheckoutError::MissingField { field });
    }

    if value.chars().count() > max {
        return Err(CheckoutError::FieldTooLong { field, max });
    }

    Ok(value.to_string())
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    /// The persisted order.
    pub order: Order,

    /// False when the cart could not be cleared after the order was written.
    pub cart_cleared: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_trims_both_fields() -> Result<(), CheckoutError> {
        let details = CheckoutDetails::new("  123 Main St \n", " Card ").validated()?;

        assert_eq!(details, CheckoutDetails::new("123 Main St", "Card"));

        Ok(())
    }

    #[test]
    fn blank_fields_are_rejected() {
        let address = CheckoutDetails::new("   ", "Card").validated();
        let payment = CheckoutDetails::new("123 Main St", "").validated();

        assert!(
            matches!(
                address,
                Err(CheckoutError::MissingField {
                    field: "shipping address"
                })
            ),
            "got {address:?}"
        );
        assert!(
            matches!(
                payment,
                Err(CheckoutError::MissingField {
                    field: "payment method"
                })
            ),
            "got {payment:?}"
        );
    }

    #[test]
    fn length_limits_count_characters() {
        let at_limit = CheckoutDetails::new("é".repeat(500), "x".repeat(50)).validated();
        let too_long = CheckoutDetails::new("a".repeat(501), "Card").validated();

        assert!(at_limit.is_ok(), "got {at_limit:?}");
        assert!(
            matches!(too_long, Err(CheckoutError::FieldTooLong { max: 500, .. })),
            "got {too_long:?}"
        );
    }
}
