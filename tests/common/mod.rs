#![allow(dead_code)]

use std::collections::BTreeMap;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use benchdesk::model::ApiConfig;
use benchdesk::nav::RecordingNavigator;
use benchdesk::session::SessionManager;
use benchdesk::store::{MemoryTokenStore, TokenStore};

pub const PASSWORD: &str = "correct-horse-battery";

pub struct ServerGuard {
    pub base_url: String,
    _data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn spawn_server() -> Result<ServerGuard> {
    spawn_server_with(&[])
}

pub fn spawn_server_with(extra_args: &[&str]) -> Result<ServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;
    let addr_file = data_dir.path().join("addr.txt");

    let child = Command::new(env!("CARGO_BIN_EXE_bench-server"))
        .args(["--addr", "127.0.0.1:0", "--addr-file"])
        .arg(&addr_file)
        .args(extra_args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn bench-server")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        _data_dir: data_dir,
        child,
    })
}

fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

fn dev_post(base_url: &str, path: &str, body: serde_json::Value) -> Result<serde_json::Value> {
    reqwest::blocking::Client::new()
        .post(format!("{}{}", base_url, path))
        .json(&body)
        .send()
        .with_context(|| format!("POST {}", path))?
        .error_for_status()
        .with_context(|| format!("POST {} status", path))?
        .json()
        .with_context(|| format!("parse {} response", path))
}

/// Seeds an active user with `PASSWORD`; `profile` is merged into `/api/auth/users/me/`.
pub fn seed_user(base_url: &str, email: &str, profile: serde_json::Value) -> Result<()> {
    dev_post(
        base_url,
        "/dev/users",
        serde_json::json!({"email": email, "password": PASSWORD, "profile": profile}),
    )?;
    Ok(())
}

pub fn seed_request(base_url: &str, requesting: u64, resource: u64) -> Result<u64> {
    let created = dev_post(
        base_url,
        "/dev/resource-requests",
        serde_json::json!({
            "requesting_company": requesting,
            "resource_company": resource,
            "listing": {"id": 1, "title": "Senior Rust engineer"},
        }),
    )?;
    created
        .get("id")
        .and_then(|v| v.as_u64())
        .context("seeded request has no id")
}

pub fn expire_access(base_url: &str) -> Result<()> {
    dev_post(base_url, "/dev/expire-access", serde_json::json!({}))?;
    Ok(())
}

pub fn revoke_refresh(base_url: &str) -> Result<()> {
    dev_post(base_url, "/dev/revoke-refresh", serde_json::json!({}))?;
    Ok(())
}

pub fn reject_access(base_url: &str, enabled: bool) -> Result<()> {
    dev_post(
        base_url,
        "/dev/reject-access",
        serde_json::json!({"enabled": enabled}),
    )?;
    Ok(())
}

/// Requests seen by the server so far, per path.
pub fn hits(base_url: &str) -> Result<BTreeMap<String, u64>> {
    reqwest::blocking::Client::new()
        .get(format!("{}/dev/hits", base_url))
        .send()
        .context("GET /dev/hits")?
        .error_for_status()
        .context("GET /dev/hits status")?
        .json()
        .context("parse hits")
}

pub fn hit_count(base_url: &str, path: &str) -> Result<u64> {
    Ok(hits(base_url)?.get(path).copied().unwrap_or(0))
}

pub struct Harness {
    pub manager: SessionManager,
    pub store: Arc<MemoryTokenStore>,
    pub nav: Arc<RecordingNavigator>,
}

pub fn harness(base_url: &str) -> Result<Harness> {
    harness_with_store(base_url, Arc::new(MemoryTokenStore::new()))
}

pub fn harness_with_store(base_url: &str, store: Arc<MemoryTokenStore>) -> Result<Harness> {
    let nav = Arc::new(RecordingNavigator::new());
    let manager = SessionManager::new(
        ApiConfig::new(base_url),
        store.clone() as Arc<dyn TokenStore>,
        nav.clone(),
    )?;
    Ok(Harness {
        manager,
        store,
        nav,
    })
}
