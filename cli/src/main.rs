use clap::Parser;
use tracing::debug;

mod cli;
mod client;
mod commands;
mod error;
mod logging;
mod preferences;
mod render;

use cli::Cli;
use error::CliError;
use logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;
    debug!("CLI arguments: {:?}", cli);

    if let Err(e) = cli.run().await {
        tracing::debug!("CLI error: {:?}", e);
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }

    Ok(())
}
