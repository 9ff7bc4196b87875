//! Serendipity - a personalized album wall for scraped record charts

mod api;
mod config;
mod db;
mod models;
mod ranking;
mod utils;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Serendipity - personalized album listing server
#[derive(Parser, Debug)]
#[command(name = "serendipity")]
#[command(version = "0.1.0")]
#[command(about = "Personalized album listing server")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Path to the data directory (database, covers, settings)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::new(format!("{},sqlx=warn", log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let paths = config::Paths::init(args.data_dir)?;
    info!("Data directory: {:?}", paths.data_dir());

    // creates the server id on first run
    config::ServerConfig::load()?;

    db::setup_sqlite(&paths.db_path()).await?;
    db::run_migrations().await?;

    let addr = format!("{}:{}", args.host, args.port);
    info!("Server listening on http://{}", addr);

    let covers_dir = paths.covers_dir();

    use actix_cors::Cors;
    use actix_web::{middleware, App, HttpServer};

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .service(actix_web::web::scope("/api").configure(api::configure))
            .service(actix_files::Files::new("/covers", covers_dir.clone()))
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
