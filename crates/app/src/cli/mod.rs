use clap::{Args, Parser, Subcommand};
use storefront_app::{config::DatabaseArgs, database, database::Db};

mod category;
mod customer;
mod order;
mod product;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate(MigrateArgs),
    Category(category::CategoryCommand),
    Product(product::ProductCommand),
    Customer(customer::CustomerCommand),
    Order(order::OrderCommand),
}

#[derive(Debug, Args)]
struct MigrateArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Migrate(args) => migrate(args).await,
            Commands::Category(command) => category::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Customer(command) => customer::run(command).await,
            Commands::Order(command) => order::run(command).await,
        }
    }
}

async fn migrate(args: MigrateArgs) -> Result<(), String> {
    connect(&args.database).await?;

    println!("migrations applied");

    Ok(())
}

/// Connect and bring the schema up to date.
pub(crate) async fn connect(args: &DatabaseArgs) -> Result<Db, String> {
    let settings = args.settings();

    let pool = database::connect(&settings)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    Ok(Db::new(pool, settings.timeout))
}
