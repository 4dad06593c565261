use aja_core::catalog;
use aja_core::enums::Capability;
use aja_state::workflow::AuditRun;
use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AuditCommands, AuditRunArgs};
use crate::commands::shared::rows::report_rows;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;
use crate::ui;

/// Handle `aja audit <subcommand>`.
pub async fn handle(
    action: &AuditCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuditCommands::Run(args) => run(args, ctx, flags).await,
    }
}

async fn run(args: &AuditRunArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.auth.require(Capability::RunAudits)?;

    let mut audit = AuditRun::new();
    audit.set_notify(args.notify);
    for (slot, path) in &args.files {
        audit.attach(*slot, path.clone())?;
    }
    for id in &args.insights {
        let def = catalog::lookup(id)?;
        if !audit.selection().contains(&def.id) {
            audit.toggle_insight(def.id)?;
        }
    }

    let progress = Progress::spinner(&format!("Uploading {} source file(s)", audit.files().len()));
    if let Err(error) = audit.submit_upload(&ctx.client).await {
        progress.finish_err(audit.last_error().unwrap_or("Upload failed"));
        return Err(error).context("audit upload failed");
    }
    let (selection, stage) = (audit.selection(), audit.stage());
    tracing::debug!(?selection, %stage, "source files uploaded");

    progress.set_message(&format!("Running {} check(s)", selection.len()));
    let mut history = ctx.load_history();
    let outcome = audit.start_analysis(&ctx.client, &mut history).await?;
    ctx.history
        .save(&history)
        .context("failed to save report history")?;
    progress.finish_ok(&format!(
        "{} succeeded, {} failed",
        outcome.succeeded(),
        outcome.failed()
    ));

    if let Some(notice) = outcome.notice {
        ui::notice(notice);
    }
    output(&report_rows(&outcome.entries), flags.format)
}
