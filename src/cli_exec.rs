use anyhow::{Context, Result};

use crate::cli_commands::{Commands, ConfigCommands, RequestCommands};
use crate::cli_runtime::CliContext;

mod config;
mod requests;
mod session;

pub(crate) fn handle_command(ctx: &CliContext, command: Commands) -> Result<()> {
    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Show(args) => config::handle_config_show(ctx, args.json),
            ConfigCommands::Set {
                api_url,
                timeout_secs,
            } => config::handle_config_set(ctx, api_url, timeout_secs),
        },
        Commands::Login(args) => session::handle_login_command(ctx, args),
        Commands::Register(args) => session::handle_register_command(ctx, args),
        Commands::Logout => session::handle_logout_command(ctx),
        Commands::Whoami(args) => session::handle_whoami_command(ctx, args.json),
        Commands::Requests { command } => match command {
            RequestCommands::List(args) => requests::handle_list_command(ctx, args.json),
            RequestCommands::Open { id, json } => requests::handle_open_command(ctx, id, json),
        },
    }
}

fn print_json<T: serde::Serialize>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", what))?
    );
    Ok(())
}
