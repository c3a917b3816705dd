//! reframe-server: HTTP front door to the fact service.
//!
//! Run: `cargo run -p reframe-server -- --port 3001`

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use reframe_core::{FactService, FactServiceConfig};
use reframe_server::{cors, router, AppState, DEFAULT_ALLOWED_ORIGIN};

#[derive(Debug, Parser)]
#[command(name = "reframe-server", about = "Fetch and reframe scientific facts over HTTP")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// Address to bind.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0")]
    bind: String,

    /// Origin allowed to call the API from a browser.
    #[arg(long, env = "ALLOWED_ORIGIN", default_value = DEFAULT_ALLOWED_ORIGIN)]
    allowed_origin: String,

    /// How many recent facts to compare new ones against.
    #[arg(long, default_value_t = 10)]
    history: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let client = gemini::Gemini::from_env().context("configuring the Gemini client")?;
    tracing::info!(model = client.model(), "using Gemini");

    let config = FactServiceConfig::default().with_history_capacity(args.history);
    let service = Arc::new(FactService::with_config(Arc::new(client), config));

    let app = router(AppState::new(service), cors(&args.allowed_origin)?);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", args.bind, args.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, origin = %args.allowed_origin, "reframe server listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
