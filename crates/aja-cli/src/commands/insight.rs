use std::path::PathBuf;

use aja_core::catalog::{INSIGHTS, lookup};
use aja_core::enums::Capability;
use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::InsightCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct InsightRow {
    id: &'static str,
    label: &'static str,
    requires: Vec<&'static str>,
}

#[derive(Serialize)]
struct DownloadResponse {
    id: String,
    path: String,
    bytes: usize,
}

/// Handle `aja insight <subcommand>`.
pub async fn handle(
    action: &InsightCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        InsightCommands::List { remote: false } => {
            let rows = INSIGHTS
                .iter()
                .take(effective_limit(flags.limit, INSIGHTS.len()))
                .map(|def| InsightRow {
                    id: def.id,
                    label: def.label,
                    requires: def.required.iter().map(|slot| slot.label()).collect(),
                })
                .collect::<Vec<_>>();
            output(&rows, flags.format)
        }
        InsightCommands::List { remote: true } => {
            ctx.auth.require(Capability::ReviewReports)?;
            let mut remote = ctx.client.remote_insights().await?;
            remote.truncate(effective_limit(flags.limit, remote.len()));
            output(&remote, flags.format)
        }
        InsightCommands::Download { id, out } => download(id, out.as_ref(), ctx, flags).await,
    }
}

async fn download(
    id: &str,
    out: Option<&PathBuf>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.auth.require(Capability::ReviewReports)?;
    let def = lookup(id)?;

    let progress = Progress::spinner(&format!("Downloading {}", def.id));
    let download = match ctx.client.download_insight(def.id).await {
        Ok(download) => download,
        Err(error) => {
            progress.finish_err("Download failed");
            return Err(error).with_context(|| format!("failed to download {}", def.id));
        }
    };
    progress.finish_clear();

    let path = out.cloned().unwrap_or_else(|| {
        PathBuf::from(
            download
                .file_name
                .clone()
                .unwrap_or_else(|| format!("{}.xlsx", def.id)),
        )
    });
    tokio::fs::write(&path, &download.bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    output(
        &DownloadResponse {
            id: def.id.to_string(),
            path: path.display().to_string(),
            bytes: download.bytes.len(),
        },
        flags.format,
    )
}

