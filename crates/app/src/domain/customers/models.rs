//! Customer Models

use jiff::Timestamp;

use crate::ids::OwnerId;

/// Customer profile stored per owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub owner: OwnerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Customer profile data for [`crate::domain::customers::CustomersService::upsert_customer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerProfile {
    pub owner: OwnerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
