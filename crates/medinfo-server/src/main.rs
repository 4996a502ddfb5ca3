//! Medinfo API server
//!
//! Serves the medicine-information aggregation pipelines over HTTP JSON.

use anyhow::Result;
use clap::Parser;
use medinfo_core::{Config, GroqClient, WebSearchClient};
use medinfo_server::{router, AppState};
use std::sync::Arc;

/// Medicine-information aggregation API
#[derive(Parser, Debug)]
#[command(name = "medinfo-server", version, about)]
struct Cli {
    /// Address to bind the HTTP server on
    #[arg(long, env = "MEDINFO_ADDR", default_value = "0.0.0.0:8000")]
    addr: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    if !config.search.is_configured() {
        tracing::warn!("web search credentials missing; search-backed endpoints will report as not configured");
    }
    if !config.llm.is_configured() {
        tracing::warn!("LLM credentials missing; AI-backed endpoints will report as not configured");
    }

    let search = Arc::new(WebSearchClient::new(config.search)?);
    let llm = Arc::new(GroqClient::new(config.llm)?);
    let app = router(AppState::new(search, llm));

    tracing::info!("Starting medinfo API on {}", cli.addr);
    let listener = tokio::net::TcpListener::bind(&cli.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
