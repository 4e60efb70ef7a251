use anyhow::Context;

use packstore_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    packstore_observability::init();

    let config = ApiConfig::from_env().context("invalid configuration")?;
    if !config.admin_capability().is_configured() {
        tracing::warn!("ADMIN_TOKEN not set; admin endpoints will reject every token");
    }

    let app = packstore_api::app::build_app_from_config(&config).context("failed to build catalog")?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
