use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use benchdesk::model::ApiConfig;
use benchdesk::nav::{NavMode, Navigator, Route};
use benchdesk::session::SessionManager;
use benchdesk::store::{LocalStore, STORE_DIR};

use crate::cli_commands::Commands;

pub(crate) const API_URL_ENV: &str = "BENCH_API_URL";

#[derive(Parser)]
#[command(name = "benchdesk")]
#[command(about = "Bench resource-sharing platform client", long_about = None)]
pub(crate) struct Cli {
    /// Directory holding config.json and state.json
    #[arg(long, global = true, default_value = STORE_DIR)]
    state_dir: PathBuf,

    /// Backend base URL; overrides BENCH_API_URL and config.json
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) struct CliContext {
    pub(crate) store: LocalStore,
    api_url: Option<String>,
}

impl CliContext {
    /// Merges `--api-url`, `BENCH_API_URL` and `config.json`, in that order.
    pub(crate) fn api_config(&self) -> Result<ApiConfig> {
        let cfg = self.store.read_config()?;
        let base_url = self
            .api_url
            .clone()
            .or_else(|| std::env::var(API_URL_ENV).ok().filter(|s| !s.trim().is_empty()))
            .or(cfg.base_url)
            .with_context(|| {
                format!(
                    "no API URL configured (pass --api-url, set {}, or run `benchdesk config set --api-url ...`)",
                    API_URL_ENV
                )
            })?;
        let mut api = ApiConfig::new(base_url);
        api.timeout_secs = cfg.timeout_secs;
        Ok(api)
    }

    /// Session manager with an empty session. Login and registration start here since whatever
    /// is on disk is about to be replaced.
    pub(crate) fn blank_session_manager(&self) -> Result<SessionManager> {
        Ok(SessionManager::new(
            self.api_config()?,
            Arc::new(self.store.clone()),
            Arc::new(PrintNavigator),
        )?)
    }

    /// Session manager hydrated from `state.json`.
    pub(crate) fn session_manager(&self) -> Result<SessionManager> {
        let manager = self.blank_session_manager()?;
        manager.init().context("restore session")?;
        Ok(manager)
    }
}

/// Navigation in a terminal has nowhere to go; report where a browser would have gone.
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&self, route: Route, mode: NavMode) {
        info!(path = %route.path(), ?mode, "navigate");
        if route == Route::Login && mode == NavMode::Hard {
            eprintln!("Session expired; run `benchdesk login`");
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let store = open_store(&cli.state_dir)?;
    let ctx = CliContext {
        store,
        api_url: cli.api_url,
    };
    crate::cli_exec::handle_command(&ctx, cli.command)
}

fn open_store(dir: &Path) -> Result<LocalStore> {
    LocalStore::open_or_init(dir).with_context(|| format!("open state dir {}", dir.display()))
}
