//! Customers service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::customers::{
        errors::CustomersServiceError,
        models::{Customer, CustomerProfile},
        repository::SqliteCustomersRepository,
    },
    ids::OwnerId,
};

#[derive(Debug, Clone)]
pub struct SqliteCustomersService {
    db: Db,
    repository: SqliteCustomersRepository,
}

impl SqliteCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCustomersRepository::new(),
        }
    }
}

fn normalise(profile: CustomerProfile) -> Result<CustomerProfile, CustomersServiceError> {
    let first_name = profile.first_name.trim();
    let last_name = profile.last_name.trim();
    let email = profile.email.trim();

    for (field, value) in [
        ("first name", first_name),
        ("last name", last_name),
        ("email", email),
    ] {
        if value.is_empty() {
            return Err(CustomersServiceError::MissingField(field));
        }
    }

    Ok(CustomerProfile {
        owner: profile.owner,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
    })
}

#[async_trait]
impl CustomersService for SqliteCustomersService {
    async fn get_customer(&self, owner: OwnerId) -> Result<Customer, CustomersServiceError> {
        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let customer = self.repository.get_customer(&mut tx, owner).await?;

                tx.commit().await?;

                Ok(customer)
            })
            .await
    }

    async fn upsert_customer(
        &self,
        profile: CustomerProfile,
    ) -> Result<Customer, CustomersServiceError> {
        let profile = normalise(profile)?;

        self.db
            .within(async {
                let mut tx = self.db.begin().await?;

                let customer = self
                    .repository
                    .upsert_customer(&mut tx, &profile, Timestamp::now())
                    .await?;

                tx.commit().await?;

                Ok(customer)
            })
            .await
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Retrieve the owner's profile.
    async fn get_customer(&self, owner: OwnerId) -> Result<Customer, CustomersServiceError>;

    /// Create or replace the owner's profile.
    async fn upsert_customer(
        &self,
        profile: CustomerProfile,
    ) -> Result<Customer, CustomersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn profile(owner: i64, first_name: &str) -> CustomerProfile {
        CustomerProfile {
            owner: OwnerId::new(owner),
            first_name: first_name.to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn upsert_creates_then_replaces_profile() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.customers.upsert_customer(profile(1, " Ada ")).await?;
        assert_eq!(created.full_name(), "Ada Lovelace");

        let updated = ctx.customers.upsert_customer(profile(1, "Augusta")).await?;
        assert_eq!(updated.first_name, "Augusta");
        assert_eq!(updated.created_at, created.created_at);

        let fetched = ctx.customers.get_customer(OwnerId::new(1)).await?;
        assert_eq!(fetched, updated);

        Ok(())
    }

    #[tokio::test]
    async fn upsert_rejects_blank_fields() {
        let ctx = TestContext::new().await;

        let result = ctx.customers.upsert_customer(profile(1, "  ")).await;

        assert!(
            matches!(result, Err(CustomersServiceError::MissingField("first name"))),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_owner_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.customers.get_customer(OwnerId::new(5)).await;

        assert!(matches!(result, Err(CustomersServiceError::NotFound)), "got {result:?}");
    }
}
