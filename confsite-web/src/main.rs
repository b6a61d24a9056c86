//! confsite-web - Conference website HTTP service
//!
//! Serves the talk list, talk detail, and planning HTML views plus the JSON
//! API, backed by the shared SQLite store.

use anyhow::Result;
use clap::Parser;
use confsite_common::config::{Config, Overrides};
use confsite_common::db::init_database;
use confsite_web::{build_router, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "confsite-web", about = "Conference website backend")]
struct Args {
    /// HTTP listen port
    #[arg(long)]
    port: Option<u16>,

    /// Path to the SQLite database file
    #[arg(long)]
    database: Option<PathBuf>,

    /// Absolute base URI used in redirects and rendered links
    #[arg(long)]
    base_uri: Option<String>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting confsite-web v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = Config::resolve(Overrides {
        port: args.port,
        database_path: args.database,
        base_uri: args.base_uri,
        config_file: args.config,
    })?;

    info!("Database path: {}", config.database_path.display());
    let pool = init_database(&config.database_path).await?;

    let state = AppState::new(pool, config.base_uri.clone())?;
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("confsite-web listening on http://{}", addr);
    info!("Base URI: {}", config.base_uri);

    axum::serve(listener, app).await?;

    Ok(())
}
