//! vivaplan-api - defense session scheduling service
//!
//! HTTP service for planning academic defense sessions and the student
//! slots inside them.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use vivaplan_api::{build_router, AppState};
use vivaplan_common::config;
use vivaplan_common::db::init_database;

/// Defense session scheduling service
#[derive(Debug, Parser)]
#[command(name = "vivaplan-api", version)]
struct Args {
    /// Data folder holding vivaplan.db (overrides VIVAPLAN_DATA and the
    /// config file)
    #[arg(long)]
    data_folder: Option<String>,

    /// Listen port
    #[arg(long, default_value_t = 5810)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting vivaplan-api v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let data_folder = config::resolve_data_folder(args.data_folder.as_deref());
    let db_path = config::database_path(&data_folder)?;
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path).await?;

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("vivaplan-api listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
