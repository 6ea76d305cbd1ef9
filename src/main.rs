//! Binary entry point: resolve configuration, bring up the SQLite store
//! (creating the schema and demo data on first run), and serve the web UI.
use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flowstate::config::Args;
use flowstate::{build_router, open_store, seed_demo_data, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flowstate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    info!("Starting FlowState v{}", env!("CARGO_PKG_VERSION"));

    let location = args
        .store_location()
        .context("invalid database configuration")?;
    let conn = open_store(&location)?;
    seed_demo_data(&conn)?;

    let app = build_router(AppState::new(conn));

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!("FlowState listening on http://{}", args.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("FlowState stopped");
    Ok(())
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
