//! Receipt rendering errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// An amount does not fit the money representation.
    #[error("amount overflows while computing {0}")]
    AmountOverflow(&'static str),

    /// Tax rate is negative or not a number.
    #[error("invalid tax rate `{0}`")]
    InvalidTaxRate(String),

    /// ISO currency code is not known.
    #[error("unknown currency `{0}`")]
    UnknownCurrency(String),

    /// Text holds a character the receipt fonts cannot encode.
    #[error("character {0:?} cannot be printed on a receipt")]
    UnsupportedCharacter(char),

    /// Time zone name could not be resolved.
    #[error("unknown time zone")]
    TimeZone(#[source] jiff::Error),
}
