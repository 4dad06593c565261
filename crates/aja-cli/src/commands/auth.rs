use aja_core::enums::{Capability, Role};
use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AuthCommands, AuthLoginArgs};
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    username: Option<String>,
    name: Option<String>,
    role: Option<Role>,
    can: Vec<String>,
    audit_url: String,
    analytics_url: String,
}

const CAPABILITIES: [Capability; 4] = [
    Capability::ManageUsers,
    Capability::RunAudits,
    Capability::ReviewReports,
    Capability::ViewAnalytics,
];

/// Handle `aja auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login(args, ctx, flags).await,
        AuthCommands::Logout => {
            ctx.auth.logout()?;
            output(&status(ctx), flags.format)
        }
        AuthCommands::Status => output(&status(ctx), flags.format),
    }
}

async fn login(args: &AuthLoginArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => std::env::var("AJA_PASSWORD")
            .context("auth login: pass --password or set AJA_PASSWORD")?,
    };

    let progress = Progress::spinner("Signing in");
    let result = ctx.auth.login(&ctx.client, &args.username, &password).await;
    match result {
        Ok(session) => progress.finish_ok(&format!("Signed in as {}", session.display_name())),
        Err(error) => {
            progress.finish_err("Login failed");
            return Err(error).context("auth login failed");
        }
    }

    output(&status(ctx), flags.format)
}

fn status(ctx: &AppContext) -> AuthStatusResponse {
    let session = ctx.auth.session();
    AuthStatusResponse {
        authenticated: session.is_some(),
        username: session.map(|s| s.username.clone()),
        name: session.and_then(|s| s.name.clone()),
        role: session.map(|s| s.role),
        can: session
            .map(|s| {
                CAPABILITIES
                    .into_iter()
                    .filter(|capability| s.allows(*capability))
                    .map(|capability| capability.to_string())
                    .collect()
            })
            .unwrap_or_default(),
        audit_url: ctx.config.api.audit_base().to_string(),
        analytics_url: ctx.config.api.analytics_base().to_string(),
    }
}
