//! In-memory development backend for the bench platform's auth and resource-request API.
//!
//! Implements the endpoints the client talks to with DRF-shaped error bodies, plus `/dev/*`
//! controls that integration tests use to seed data and force token failures.

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Extension, Path, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[path = "bench_server/types.rs"]
mod types;
use self::types::*;
#[path = "bench_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "bench_server/tokens.rs"]
mod tokens;
use self::tokens::*;
#[path = "bench_server/handlers_auth.rs"]
mod handlers_auth;
use self::handlers_auth::*;
#[path = "bench_server/handlers_requests.rs"]
mod handlers_requests;
use self::handlers_requests::*;
#[path = "bench_server/handlers_dev.rs"]
mod handlers_dev;
use self::handlers_dev::*;
#[path = "bench_server/routes.rs"]
mod routes;
use self::routes::*;

#[derive(Parser)]
#[command(name = "bench-server")]
#[command(about = "Bench platform API (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Newly registered accounts cannot log in until activated
    #[arg(long)]
    require_activation: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = Arc::new(AppState::new(args.require_activation));
    let app = build_app_router(state);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    info!(%local_addr, "bench-server listening");
    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
