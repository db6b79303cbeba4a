use anyhow::{Context, Result};

use benchdesk::model::RequestId;
use benchdesk::roles::{Resolution, RoleResolver};

use super::print_json;
use crate::cli_runtime::CliContext;

pub(super) fn handle_list_command(ctx: &CliContext, json: bool) -> Result<()> {
    let manager = ctx.session_manager()?;
    manager
        .current_user()
        .context("not logged in (run `benchdesk login --email ...`)")?;
    let requests = manager.client().list_resource_requests()?;
    if json {
        return print_json(&requests, "resource requests");
    }
    if requests.is_empty() {
        println!("No resource requests");
        return Ok(());
    }
    for r in requests {
        println!(
            "{} requesting={} resource={} status={}",
            r.id,
            r.requesting_company,
            r.resource_company,
            r.status.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

pub(super) fn handle_open_command(ctx: &CliContext, id: RequestId, json: bool) -> Result<()> {
    let manager = ctx.session_manager()?;
    let resolver = RoleResolver::new(manager.client().clone());
    let resolution = resolver.resolve_current(id)?;
    if json {
        return print_json(&resolution, "resolution");
    }
    match resolution {
        Resolution::Redirect { perspective, route } => {
            println!("perspective: {}", perspective.as_str());
            println!("open: {}", route.path());
        }
        Resolution::AccessDenied { actions } => {
            println!("Access denied: you are not a party to resource request {}", id);
            for action in actions {
                println!("  go to: {}", action.path());
            }
        }
    }
    Ok(())
}
