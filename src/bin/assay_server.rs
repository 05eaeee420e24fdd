//! HTTP server binary for the assay planner.

use assay_planner::{about, config::ServerConfig, logging, server};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load();
    logging::init_tracing(&config.log_filter);

    let addr = config.bind_address()?;
    let app = server::router(config.static_dir.as_deref());

    info!("{}", about::version_cli_text().replace('\n', " | "));
    info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
