use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{ClientConfig, TokenState};

mod memory;
mod token_state;

pub use self::memory::MemoryTokenStore;

pub const STORE_DIR: &str = ".benchdesk";

/// Durable client-side token storage. The two tokens are always read, written and cleared as a
/// unit.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<TokenState>;
    fn save(&self, access: &str, refresh: &str) -> Result<()>;
    fn save_access(&self, access: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// The `.benchdesk/` directory: `config.json` for connection settings, `state.json` for tokens.
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(anyhow!(
                "No {} directory found at {} (run `benchdesk config set --api-url ...`)",
                STORE_DIR,
                root.display()
            ));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Opens `root`, creating it with default config and empty state if it does not exist yet.
    pub fn open_or_init(root: &Path) -> Result<Self> {
        if root.is_dir() {
            return Self::open(root);
        }
        fs::create_dir_all(root).with_context(|| format!("create {}", root.display()))?;
        let store = Self {
            root: root.to_path_buf(),
        };
        store.write_config(&ClientConfig::default())?;
        store.write_state(&TokenState::empty())?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read_config(&self) -> Result<ClientConfig> {
        let path = self.root.join("config.json");
        if !path.exists() {
            return Ok(ClientConfig::default());
        }
        let bytes = fs::read(&path).context("read config.json")?;
        let cfg: ClientConfig = serde_json::from_slice(&bytes).context("parse config.json")?;
        if cfg.version != 1 {
            anyhow::bail!("unsupported config version {}", cfg.version);
        }
        Ok(cfg)
    }

    pub fn write_config(&self, cfg: &ClientConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn read_state(&self) -> Result<TokenState> {
        let path = self.root.join("state.json");
        if !path.exists() {
            return Ok(TokenState::empty());
        }
        let bytes = fs::read(&path).context("read state.json")?;
        let st: TokenState = serde_json::from_slice(&bytes).context("parse state.json")?;
        if st.version != 1 {
            anyhow::bail!("unsupported state version {}", st.version);
        }
        Ok(st)
    }

    pub fn write_state(&self, st: &TokenState) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(st).context("serialize state")?;
        write_atomic(&self.root.join("state.json"), &bytes).context("write state.json")?;
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

pub(crate) fn now_rfc3339() -> Option<String> {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .ok()
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
