use std::path::PathBuf;

use clap::Args;
use storefront_app::{
    config::{DatabaseArgs, ReceiptArgs},
    domain::{
        customers::SqliteCustomersService,
        orders::{OrdersService, SqliteOrdersService, models::OrderId},
    },
    ids::OwnerId,
    receipts::{ReceiptRenderer, buyer_for},
};

#[derive(Debug, Args)]
pub(crate) struct OrderReceiptArgs {
    /// Owner id the order belongs to
    #[arg(long)]
    owner: OwnerId,

    /// Order id
    #[arg(long)]
    order: OrderId,

    /// Destination file
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    database: DatabaseArgs,

    #[command(flatten)]
    receipts: ReceiptArgs,
}

pub(crate) async fn run(args: OrderReceiptArgs) -> Result<(), String> {
    let settings = args
        .receipts
        .settings()
        .map_err(|error| format!("invalid receipt settings: {error}"))?;

    let db = crate::cli::connect(&args.database).await?;

    let order = SqliteOrdersService::new(db.clone())
        .get_order(args.owner, args.order)
        .await
        .map_err(|error| format!("failed to load order: {error}"))?;

    let buyer = buyer_for(&SqliteCustomersService::new(db), args.owner)
        .await
        .map_err(|error| format!("failed to load customer: {error}"))?;

    let document = ReceiptRenderer::new(settings)
        .render(&order, &buyer)
        .map_err(|error| format!("failed to render receipt: {error}"))?;

    tokio::fs::write(&args.out, &document)
        .await
        .map_err(|error| format!("failed to write {}: {error}", args.out.display()))?;

    println!("order_number: {}", order.order_number);
    println!("receipt: {}", args.out.display());

    Ok(())
}
