use clap::{Args, Subcommand};

mod create;
mod list;

#[derive(Debug, Args)]
pub(crate) struct BoxCommand {
    #[command(subcommand)]
    command: BoxSubcommand,
}

#[derive(Debug, Subcommand)]
enum BoxSubcommand {
    /// Create an available box
    Create(create::CreateBoxArgs),

    /// List all boxes ordered by code
    List(list::ListBoxesArgs),
}

pub(crate) async fn run(command: BoxCommand) -> Result<(), String> {
    match command.command {
        BoxSubcommand::Create(args) => create::run(args).await,
        BoxSubcommand::List(args) => list::run(args).await,
    }
}
