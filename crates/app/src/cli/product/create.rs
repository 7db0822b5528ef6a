use clap::Args;
use storefront_app::{
    config::DatabaseArgs,
    domain::{
        categories::models::CategoryId,
        products::{ProductsService, SqliteProductsService, data::NewProduct},
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Unit price in minor units
    #[arg(long)]
    price: u64,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    stock: u32,

    #[arg(long, default_value = "")]
    description: String,

    /// Category the product is listed under
    #[arg(long)]
    category: Option<CategoryId>,

    /// Show the product on the storefront front page
    #[arg(long)]
    featured: bool,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database).await?;

    let service = SqliteProductsService::new(db);

    let product = service
        .create_product(NewProduct {
            name: args.name,
            description: args.description,
            price: args.price,
            stock_quantity: args.stock,
            category: args.category,
            featured: args.featured,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_id: {}", product.id);
    println!("product_name: {}", product.name);
    println!("price: {}", product.price);

    Ok(())
}
