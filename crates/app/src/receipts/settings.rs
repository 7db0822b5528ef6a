//! Receipt settings

use std::str::FromStr;

use decimal_percentage::Percentage;
use jiff::tz::TimeZone;
use rust_decimal::Decimal;
use rusty_money::iso::{self, Currency};

use crate::receipts::errors::RenderError;

/// Presentation settings applied to every receipt.
#[derive(Debug, Clone)]
pub struct ReceiptSettings {
    /// Printed in the heading.
    pub store_name: String,

    /// Currency all amounts are displayed in.
    pub currency: &'static Currency,

    /// Tax as a fraction of the line item subtotal.
    pub tax_rate: Percentage,

    /// Flat shipping fee in minor units, charged when the subtotal is positive.
    pub shipping_fee: u64,

    /// Zone the order date is displayed in.
    pub time_zone: TimeZone,
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        Self {
            store_name: "Storefront".to_string(),
            currency: iso::USD,
            tax_rate: Percentage::from(Decimal::ZERO),
            shipping_fee: 0,
            time_zone: TimeZone::UTC,
        }
    }
}

impl ReceiptSettings {
    /// Build settings from configuration strings.
    ///
    /// `tax_rate` accepts a fraction (`0.0825`) or percent points (`8.25%`).
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when the currency, tax rate or time zone is invalid.
    pub fn parse(
        store_name: &str,
        currency: &str,
        tax_rate: &str,
        shipping_fee: u64,
        time_zone: &str,
    ) -> Result<Self, RenderError> {
        let currency = iso::find(currency.trim())
            .ok_or_else(|| RenderError::UnknownCurrency(currency.to_string()))?;

        let time_zone = TimeZone::get(time_zone.trim()).map_err(RenderError::TimeZone)?;

        Ok(Self {
            store_name: store_name.trim().to_string(),
            currency,
            tax_rate: parse_tax_rate(tax_rate)?,
            shipping_fee,
            time_zone,
        })
    }
}

fn parse_tax_rate(value: &str) -> Result<Percentage, RenderError> {
    let trimmed = value.trim();

    let (number, percent_points) = match trimmed.strip_suffix('%') {
        Some(stripped) => (stripped.trim(), true),
        None => (trimmed, false),
    };

    let invalid = || RenderError::InvalidTaxRate(value.to_string());

    let mut rate = Decimal::from_str(number).map_err(|_err| invalid())?;

    if percent_points {
        rate = rate.checked_div(Decimal::ONE_HUNDRED).ok_or_else(invalid)?;
    }

    if rate.is_sign_negative() {
        return Err(invalid());
    }

    Ok(Percentage::from(rate))
}
