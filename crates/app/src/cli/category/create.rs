use clap::Args;
use storefront_app::{
    config::DatabaseArgs,
    domain::categories::{CategoriesService, SqliteCategoriesService, data::NewCategory},
};

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    /// Category display name, unique
    #[arg(long)]
    name: String,

    #[arg(long, default_value = "")]
    description: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateCategoryArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database).await?;

    let category = SqliteCategoriesService::new(db)
        .create_category(NewCategory {
            name: args.name,
            description: args.description,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_id: {}", category.id);
    println!("category_name: {}", category.name);

    Ok(())
}
