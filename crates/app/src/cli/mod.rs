use clap::{Parser, Subcommand};

use self::config::{LoggingConfig, OutputFormat};

mod config;
mod db;
mod logging;
mod output;
mod product;

#[derive(Debug, Parser)]
#[command(name = "stockroom-app", about = "Stockroom CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    /// Result format (text, json)
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Product(product::ProductCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        logging::init(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Product(command) => product::run(command, self.output).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}
