use clap::Args;
use storefront_app::{
    config::DatabaseArgs,
    domain::customers::{CustomersService, SqliteCustomersService, models::CustomerProfile},
    ids::OwnerId,
};

#[derive(Debug, Args)]
pub(crate) struct UpsertCustomerArgs {
    /// Owner id the profile belongs to
    #[arg(long)]
    owner: OwnerId,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    #[arg(long)]
    email: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: UpsertCustomerArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database).await?;

    let service = SqliteCustomersService::new(db);

    let customer = service
        .upsert_customer(CustomerProfile {
            owner: args.owner,
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
        })
        .await
        .map_err(|error| format!("failed to save customer: {error}"))?;

    println!("owner_id: {}", customer.owner);
    println!("name: {}", customer.full_name());
    println!("email: {}", customer.email);

    Ok(())
}
