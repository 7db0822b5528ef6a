use clap::{Args, Subcommand};

mod receipt;

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    /// Write the PDF receipt of an order to a file
    Receipt(receipt::OrderReceiptArgs),
}

pub(crate) async fn run(command: OrderCommand) -> Result<(), String> {
    match command.command {
        OrderSubcommand::Receipt(args) => receipt::run(args).await,
    }
}
