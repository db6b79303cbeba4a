use anyhow::{Context, Result};

use benchdesk::errors::AuthError;
use benchdesk::model::{RegistrationData, User};
use benchdesk::store::TokenStore;

use super::print_json;
use crate::cli_commands::{LoginArgs, RegisterArgs};
use crate::cli_runtime::CliContext;

fn auth_failure(err: AuthError) -> anyhow::Error {
    match err {
        AuthError::Rejected { fields } => {
            let lines = fields
                .iter()
                .map(|(field, msgs)| format!("  {}: {}", field, msgs.join(" ")))
                .collect::<Vec<_>>()
                .join("\n");
            anyhow::anyhow!("rejected:\n{}", lines)
        }
        AuthError::Failed { message } => anyhow::anyhow!(message),
    }
}

fn print_user(user: &User) {
    println!("user: {}", user.display_name());
    if let Some(email) = &user.email {
        println!("email: {}", email);
    }
    if let Some(role) = &user.role {
        println!("role: {}", role);
    }
    let companies = user
        .company_memberships
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>();
    if companies.is_empty() {
        println!("companies: (none)");
    } else {
        println!("companies: {}", companies.join(", "));
    }
}

pub(super) fn handle_login_command(ctx: &CliContext, args: LoginArgs) -> Result<()> {
    let manager = ctx.blank_session_manager()?;
    let user = manager
        .login(&args.email, &args.password)
        .map_err(auth_failure)?;
    if args.json {
        return print_json(&user, "user");
    }
    println!("Logged in as {}", user.display_name());
    Ok(())
}

pub(super) fn handle_register_command(ctx: &CliContext, args: RegisterArgs) -> Result<()> {
    let mut data = RegistrationData {
        email: args.email,
        password: args.password,
        first_name: args.first_name,
        last_name: args.last_name,
        company_name: args.company_name,
        ..RegistrationData::default()
    };
    for field in args.fields {
        let (key, value) = field
            .split_once('=')
            .with_context(|| format!("invalid --field {:?} (expected KEY=VALUE)", field))?;
        data.fields.insert(
            key.trim().to_string(),
            serde_json::Value::String(value.to_string()),
        );
    }

    let manager = ctx.blank_session_manager()?;
    let registration = manager.register(&data).map_err(auth_failure)?;
    if args.json {
        return print_json(&registration, "registration");
    }
    match (&registration.user, &registration.login_error) {
        (Some(user), _) => println!("Registered and logged in as {}", user.display_name()),
        (None, Some(err)) => {
            println!("Registered; automatic login failed ({})", err);
            println!("Run `benchdesk login --email ...` to continue");
        }
        (None, None) => println!("Registered; run `benchdesk login --email ...` to continue"),
    }
    Ok(())
}

pub(super) fn handle_logout_command(ctx: &CliContext) -> Result<()> {
    // No API URL configured: clear the stored tokens directly.
    match ctx.blank_session_manager() {
        Ok(manager) => manager.logout().context("clear session")?,
        Err(_) => ctx.store.clear().context("clear session")?,
    }
    println!("Logged out");
    Ok(())
}

pub(super) fn handle_whoami_command(ctx: &CliContext, json: bool) -> Result<()> {
    let manager = ctx.session_manager()?;
    let user = manager
        .current_user()
        .context("not logged in (run `benchdesk login --email ...`)")?;
    if json {
        return print_json(&user, "user");
    }
    print_user(&user);
    Ok(())
}
