//! company-scout server binary.
//!
//! Loads configuration from `COMPANY_SCOUT_CONFIG`, serves until Ctrl-C,
//! then shuts down. `GOOGLE_MAPS_API_KEY` is read on every request.

use company_scout::{CompanyServer, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Users can override with RUST_LOG=debug to see per-source outcomes.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("company_scout=info,scout_sources=info")
            }),
        )
        .init();

    let config = ServiceConfig::load().map_err(|e| {
        tracing::error!(error = %e, "failed to load configuration");
        anyhow::anyhow!("company-scout config: {e}")
    })?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "company-scout starting");

    let server = CompanyServer::start(&config).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!(port = server.port(), "shutting down");
    server.shutdown();

    Ok(())
}
