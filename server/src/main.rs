use anyhow::Result;
use axum::Router;
use clap::Parser;
use server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};
use vsm_core::LoadOptions;

#[derive(Parser)]
struct Args {
    /// Data directory containing raw/ and/or stemmed/
    #[arg(long, default_value = "./data")]
    data: PathBuf,
    /// Re-stem raw/ even if a stemmed cache exists
    #[arg(long, default_value_t = false)]
    rebuild_cache: bool,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    // the index is fully built before the listener is bound
    let app: Router = build_app(&args.data, &LoadOptions { rebuild_cache: args.rebuild_cache })?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
