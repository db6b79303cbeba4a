use anyhow::Result;

use super::print_json;
use crate::cli_runtime::CliContext;

pub(super) fn handle_config_show(ctx: &CliContext, json: bool) -> Result<()> {
    let cfg = ctx.store.read_config()?;
    if json {
        return print_json(&cfg, "config");
    }
    match &cfg.base_url {
        Some(url) => println!("api_url: {}", url),
        None => println!("api_url: (not set)"),
    }
    println!("timeout_secs: {}", cfg.timeout_secs);
    println!("state_dir: {}", ctx.store.root().display());
    Ok(())
}

pub(super) fn handle_config_set(
    ctx: &CliContext,
    api_url: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    if api_url.is_none() && timeout_secs.is_none() {
        anyhow::bail!("nothing to set (pass --api-url and/or --timeout-secs)");
    }
    let mut cfg = ctx.store.read_config()?;
    if let Some(url) = api_url {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("api url must start with http:// or https://");
        }
        cfg.base_url = Some(url);
    }
    if let Some(secs) = timeout_secs {
        if secs == 0 {
            anyhow::bail!("timeout must be at least 1 second");
        }
        cfg.timeout_secs = secs;
    }
    ctx.store.write_config(&cfg)?;
    println!("Configuration saved");
    Ok(())
}
