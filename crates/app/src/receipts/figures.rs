//! Display-only receipt figures. Never persisted.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::{
    domain::orders::models::OrderLine,
    receipts::{errors::RenderError, settings::ReceiptSettings},
};

/// Amounts printed in the receipt summary, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptFigures {
    pub subtotal: u64,
    pub tax: u64,
    pub shipping: u64,
    pub total: u64,
}

impl ReceiptFigures {
    /// Derive the summary from frozen order lines.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::AmountOverflow`] if any figure overflows.
    pub fn compute(lines: &[OrderLine], settings: &ReceiptSettings) -> Result<Self, RenderError> {
        let subtotal = lines
            .iter()
            .try_fold(0_u64, |sum, line| sum.checked_add(line.line_total()?))
            .ok_or(RenderError::AmountOverflow("subtotal"))?;

        let tax = tax_of_minor(settings, subtotal)?;

        let shipping = if subtotal > 0 {
            settings.shipping_fee
        } else {
            0
        };

        let total = subtotal
            .checked_add(tax)
            .and_then(|sum| sum.checked_add(shipping))
            .ok_or(RenderError::AmountOverflow("total"))?;

        Ok(Self {
            subtotal,
            tax,
            shipping,
            total,
        })
    }
}

/// Tax on `minor`, rounded half away from zero to whole minor units.
fn tax_of_minor(settings: &ReceiptSettings, minor: u64) -> Result<u64, RenderError> {
    let applied = settings.tax_rate * Decimal::from(minor);

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(RenderError::AmountOverflow("tax"))
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use testresult::TestResult;

    use crate::domain::products::models::ProductId;

    use super::*;

    fn line(quantity: u32, unit_price: u64) -> OrderLine {
        OrderLine {
            product: ProductId::new(1),
            product_name: "Item".to_string(),
            quantity,
            unit_price,
        }
    }

    fn settings(tax_rate: Decimal, shipping_fee: u64) -> ReceiptSettings {
        ReceiptSettings {
            tax_rate: Percentage::from(tax_rate),
            shipping_fee,
            ..ReceiptSettings::default()
        }
    }

    #[test]
    fn defaults_add_nothing_to_the_subtotal() -> TestResult {
        let figures = ReceiptFigures::compute(
            &[line(2, 50_000), line(1, 30_000)],
            &ReceiptSettings::default(),
        )?;

        assert_eq!(
            figures,
            ReceiptFigures {
                subtotal: 130_000,
                tax: 0,
                shipping: 0,
                total: 130_000,
            }
        );

        Ok(())
    }

    #[test]
    fn tax_rounds_half_away_from_zero() -> TestResult {
        // 8.25% of 1.30 is 0.10725.
        let figures = ReceiptFigures::compute(&[line(1, 130)], &settings(Decimal::new(825, 4), 0))?;
        assert_eq!(figures.tax, 11);

        // 5% of 0.10 is exactly 0.005.
        let figures = ReceiptFigures::compute(&[line(1, 10)], &settings(Decimal::new(5, 2), 0))?;
        assert_eq!(figures.tax, 1);

        Ok(())
    }

    #[test]
    fn shipping_only_applies_to_positive_subtotals() -> TestResult {
        let settings = settings(Decimal::new(1, 1), 500);

        let empty = ReceiptFigures::compute(&[], &settings)?;
        assert_eq!(empty.total, 0);
        assert_eq!(empty.shipping, 0);

        let free_items = ReceiptFigures::compute(&[line(3, 0)], &settings)?;
        assert_eq!(free_items.shipping, 0);

        let paid = ReceiptFigures::compute(&[line(1, 1_000)], &settings)?;
        assert_eq!(paid.shipping, 500);
        assert_eq!(paid.total, 1_000 + 100 + 500);

        Ok(())
    }

    #[test]
    fn overflowing_subtotal_is_an_error() {
        let result = ReceiptFigures::compute(
            &[line(1, u64::MAX), line(1, 1)],
            &ReceiptSettings::default(),
        );

        assert!(matches!(result, Err(RenderError::AmountOverflow("subtotal"))));
    }
}
