use clap::{Args, Subcommand};

mod upsert;

#[derive(Debug, Args)]
pub(crate) struct CustomerCommand {
    #[command(subcommand)]
    command: CustomerSubcommand,
}

#[derive(Debug, Subcommand)]
enum CustomerSubcommand {
    Upsert(upsert::UpsertCustomerArgs),
}

pub(crate) async fn run(command: CustomerCommand) -> Result<(), String> {
    match command.command {
        CustomerSubcommand::Upsert(args) => upsert::run(args).await,
    }
}
