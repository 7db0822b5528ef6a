//! Order Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::products::models::ProductId,
    ids::{OwnerId, TypedId},
};

/// Order Id
pub type OrderId = TypedId<Order>;

/// Order lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human readable label used on receipts.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether an order in this state may move to `next`.
    ///
    /// Re-applying the current state is always allowed.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, _)
                | (Self::Completed, Self::Completed | Self::Cancelled)
                | (Self::Cancelled, Self::Cancelled)
        )
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown order status `{0}`")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(UnknownOrderStatus(s.to_string())),
        }
    }
}

/// Immutable order line. Name and price are frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: u64,
}

impl OrderLine {
    /// `quantity * unit_price`, or `None` on overflow.
    pub fn line_total(&self) -> Option<u64> {
        self.unit_price.checked_mul(u64::from(self.quantity))
    }
}

/// Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub owner: OwnerId,
    pub order_date: Timestamp,
    pub shipping_address: String,
    pub payment_method: String,
    pub status: OrderStatus,
    pub total_amount: u64,
    pub lines: Vec<OrderLine>,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_status_transitions() {
        use OrderStatus::{Cancelled, Completed, Pending};

        let allowed = [
            (Pending, Pending),
            (Pending, Completed),
            (Pending, Cancelled),
            (Completed, Completed),
            (Completed, Cancelled),
            (Cancelled, Cancelled),
        ];

        for from in [Pending, Completed, Cancelled] {
            for to in [Pending, Completed, Cancelled] {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn status_parses_case_insensitively() -> Result<(), UnknownOrderStatus> {
        assert_eq!("Completed".parse::<OrderStatus>()?, OrderStatus::Completed);
        assert_eq!(" cancelled ".parse::<OrderStatus>()?, OrderStatus::Cancelled);
        assert!("shipped".parse::<OrderStatus>().is_err());

        Ok(())
    }

    #[test]
    fn line_total_detects_overflow() {
        let line = OrderLine {
            product: ProductId::new(1),
            product_name: "Laptop".to_string(),
            quantity: 2,
            unit_price: u64::MAX,
        };

        assert_eq!(line.line_total(), None);
    }
}
