use std::process::Command;

use anyhow::{Context, Result};

fn run_benchdesk(args: &[&str]) -> Result<String> {
    let out = Command::new(env!("CARGO_BIN_EXE_benchdesk"))
        .args(args)
        .output()
        .with_context(|| format!("run benchdesk {:?}", args))?;

    if !out.status.success() {
        anyhow::bail!(
            "benchdesk {:?} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            out.status,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}

#[test]
fn cli_help_surface_is_stable() -> Result<()> {
    let help = run_benchdesk(&["--help"])?;
    assert!(help.contains("Usage: benchdesk"));
    assert!(help.contains("<COMMAND>"));
    assert!(help.contains("login"));
    assert!(help.contains("register"));
    assert!(help.contains("logout"));
    assert!(help.contains("whoami"));
    assert!(help.contains("requests"));
    assert!(help.contains("--state-dir"));

    let requests_help = run_benchdesk(&["requests", "--help"])?;
    assert!(requests_help.contains("Usage: benchdesk requests <COMMAND>"));
    assert!(requests_help.contains("list"));
    assert!(requests_help.contains("open"));

    let login_help = run_benchdesk(&["login", "--help"])?;
    assert!(login_help.contains("BENCH_PASSWORD"));

    Ok(())
}

#[test]
fn logout_works_before_any_configuration() -> Result<()> {
    let dir = tempfile::tempdir().context("create state dir")?;
    let out = Command::new(env!("CARGO_BIN_EXE_benchdesk"))
        .arg("--state-dir")
        .arg(dir.path().join(".benchdesk"))
        .arg("logout")
        .env_remove("BENCH_API_URL")
        .output()
        .context("run benchdesk logout")?;

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Logged out"));
    Ok(())
}
