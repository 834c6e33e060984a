use anyhow::{Context, Result};
use bipcard_lib::BipCardClient;
use bipcard_server::{build_router, AppState, ServerArgs};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("bipcard_server=info".parse()?)
                .add_directive("bipcard_lib=info".parse()?),
        )
        .with_target(false)
        .init();

    let args = ServerArgs::parse();

    let client = BipCardClient::with_config(args.portal_config(), args.coercion_policy())
        .context("failed to build portal client")?;
    let app = build_router(AppState::new(client));

    let listener = TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(
        bind = %args.bind,
        portal = %args.portal_base_url,
        policy = ?args.coercion_policy(),
        "bipcard-server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
