use clap::{Parser, Subcommand};

mod boxes;
mod db;

#[derive(Debug, Parser)]
#[command(name = "brankas-app", about = "Brankas Kita operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage deposit boxes
    #[command(name = "box")]
    Boxes(boxes::BoxCommand),

    /// Database maintenance
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Boxes(command) => boxes::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
