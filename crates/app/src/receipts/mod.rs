//! Receipts
//!
//! Renders a persisted order into a fixed-layout PDF. Rendering is a pure
//! function of the order, the buyer and the settings: no clock, no randomness.

mod errors;
mod figures;
mod layout;
mod pdf;
mod settings;

use tracing::debug;

pub use errors::RenderError;
pub use figures::ReceiptFigures;
pub use settings::ReceiptSettings;

use crate::{
    domain::{
        customers::{CustomersService, CustomersServiceError, models::Customer},
        orders::models::Order,
    },
    ids::OwnerId,
};

/// Billing details printed on a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buyer {
    pub full_name: String,
    pub email: String,
}

impl Buyer {
    /// Placeholder for an owner without a stored profile.
    pub fn unregistered(owner: OwnerId) -> Self {
        Self {
            full_name: format!("Customer #{owner}"),
            email: String::new(),
        }
    }
}

impl From<&Customer> for Buyer {
    fn from(customer: &Customer) -> Self {
        Self {
            full_name: customer.full_name(),
            email: customer.email.clone(),
        }
    }
}

/// Look up the buyer for `owner`, falling back to [`Buyer::unregistered`].
///
/// # Errors
///
/// Returns any customer lookup failure other than a missing profile.
pub async fn buyer_for(
    customers: &dyn CustomersService,
    owner: OwnerId,
) -> Result<Buyer, CustomersServiceError> {
    match customers.get_customer(owner).await {
        Ok(customer) => Ok(Buyer::from(&customer)),
        Err(CustomersServiceError::NotFound) => Ok(Buyer::unregistered(owner)),
        Err(error) => Err(error),
    }
}

/// Renders receipts with fixed settings.
#[derive(Debug, Clone, Default)]
pub struct ReceiptRenderer {
    settings: ReceiptSettings,
}

impl ReceiptRenderer {
    #[must_use]
    pub fn new(settings: ReceiptSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &ReceiptSettings {
        &self.settings
    }

    /// Render `order` as PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when a figure overflows or cannot be formatted, or when
    /// the order or buyer holds text the receipt fonts cannot print.
    pub fn render(&self, order: &Order, buyer: &Buyer) -> Result<Vec<u8>, RenderError> {
        let figures = ReceiptFigures::compute(&order.lines, &self.settings)?;
        let lines = layout::lay_out(order, buyer, &figures, &self.settings)?;
        let document = pdf::write_document(&lines)?;

        debug!(
            order_number = %order.order_number,
            bytes = document.len(),
            "receipt rendered"
        );

        Ok(document)
    }
}
