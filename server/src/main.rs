use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use truthdare_server::api::AppState;
use truthdare_server::config::Config;
use truthdare_server::database::{self, SharedStore};
use truthdare_server::error::AppResult;
use truthdare_server::logging::init_logging;
use truthdare_server::moderation::ContentFilter;
use truthdare_server::routes;

#[derive(Debug, Parser)]
#[command(name = "truthdare-server")]
#[command(about = "Serves random questions, takes submissions and records votes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create the database tables and exit
    Migrate,
}

#[actix_web::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Load configuration first to get logging settings
    let config = Config::load(cli.config.as_deref())?;
    let _log_guard = init_logging(&config.logging)?;

    let store = database::connect(&config.database).await?;
    store.init_schema().await?;
    info!("Database schema ready");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => Ok(()),
        Command::Serve => serve(config, store).await,
    }
}

async fn serve(config: Config, store: SharedStore) -> AppResult<()> {
    let filter = ContentFilter::new(&config.moderation.banned_words);
    let state = web::Data::new(AppState::new(store, filter));
    let cors_config = config.cors.clone();

    info!("Starting truthdare-server on {}", config.bind_address());

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(routes::cors(&cors_config))
            .wrap(Logger::default())
            .configure(routes::configure_routes)
    })
    .bind(config.bind_address())?
    .run()
    .await?;

    Ok(())
}
