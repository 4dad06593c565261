use std::collections::BTreeMap;
use std::path::PathBuf;

use aja_core::catalog::FileSlot;
use aja_core::chart::{ChartSpec, result_charts};
use aja_core::entities::TablePage;
use aja_core::enums::{Capability, ReportStatus};
use aja_core::kpi::result_kpis;
use aja_state::StateError;
use aja_state::refresh::{refresh_all, retry, view_results};
use anyhow::{Context, bail};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::cli::subcommands::ReportCommands;
use crate::commands::shared::kpis::{KpiCard, kpi_cards, print_cards_and_charts};
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::rows::{ReportRow, report_rows};
use crate::context::AppContext;
use crate::output::{output, output_page};
use crate::progress::Progress;
use crate::ui;

#[derive(Serialize)]
struct RefreshResponse {
    refreshed: usize,
    failed: usize,
    reports: Vec<ReportRow>,
}

#[derive(Serialize)]
struct ResultDashboard {
    kpis: BTreeMap<String, KpiCard>,
    charts: Vec<ChartSpec>,
}

#[derive(Serialize)]
struct ClearResponse {
    cleared: usize,
}

/// Handle `aja report <subcommand>`.
pub async fn handle(
    action: &ReportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReportCommands::List { status } => list(status.as_deref(), ctx, flags),
        ReportCommands::Show { id, charts } => show(id, *charts, ctx, flags).await,
        ReportCommands::Retry { id, file } => retry_row(id, file.clone(), ctx, flags).await,
        ReportCommands::Refresh => refresh(ctx, flags).await,
        ReportCommands::Clear => {
            ctx.auth.require(Capability::ReviewReports)?;
            let cleared = ctx.load_history().len();
            ctx.history.clear()?;
            output(&ClearResponse { cleared }, flags.format)
        }
    }
}

fn parse_status(raw: &str) -> anyhow::Result<ReportStatus> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "success" => Ok(ReportStatus::Success),
        "failed" => Ok(ReportStatus::Failed),
        "refreshing" => Ok(ReportStatus::Refreshing),
        _ => bail!("invalid status '{raw}' (expected success, failed or refreshing)"),
    }
}

fn list(status: Option<&str>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.auth.require(Capability::ReviewReports)?;
    let status = status.map(parse_status).transpose()?;

    let history = ctx.load_history();
    let rows = report_rows(
        history
            .entries()
            .iter()
            .filter(|entry| status.is_none_or(|status| entry.status == status))
            .take(effective_limit(flags.limit, history.len())),
    );
    output(&rows, flags.format)
}

async fn show(id: &str, charts: bool, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.auth.require(Capability::ReviewReports)?;

    let mut history = ctx.load_history();
    let rows = view_results(&ctx.client, &mut history, id).await?;

    if charts {
        let dashboard = ResultDashboard {
            kpis: kpi_cards(&result_kpis(&rows)),
            charts: result_charts(&rows),
        };
        if flags.format == OutputFormat::Table {
            return print_cards_and_charts(dashboard.kpis, &dashboard.charts);
        }
        return output(&dashboard, flags.format);
    }
    let mut page = TablePage::from_rows(&rows);
    if let Some(limit) = flags.limit {
        page.data.truncate(usize::try_from(limit)?);
    }
    output_page(&page, flags.format)
}

async fn retry_row(
    id: &str,
    file: Option<(FileSlot, PathBuf)>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.auth.require(Capability::RunAudits)?;

    let mut history = ctx.load_history();
    if file.is_none() && history.get(id).is_some_and(|entry| entry.needs_upload()) {
        ui::notice("Retrying without the missing files; pass --file SLOT=PATH to upload them.");
    }

    let progress = Progress::spinner(&format!("Retrying {id}"));
    let entry = retry(&ctx.client, &mut history, id, file).await?;
    ctx.history
        .save(&history)
        .context("failed to save report history")?;
    match entry.status {
        ReportStatus::Success => progress.finish_ok(&format!("{} ready", entry.name)),
        _ => progress.finish_err(&entry.reason),
    }

    output(&ReportRow::from(&entry), flags.format)
}

async fn refresh(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.auth.require(Capability::RunAudits)?;

    let history = Mutex::new(ctx.load_history());
    let progress = Progress::spinner("Refreshing successful reports");
    let summary = match refresh_all(&ctx.client, &history).await {
        Ok(summary) => summary,
        Err(StateError::NothingToRefresh) => {
            progress.finish_clear();
            ui::notice(&StateError::NothingToRefresh.to_string());
            return Ok(());
        }
        Err(error) => {
            progress.finish_err("Refresh failed");
            return Err(error.into());
        }
    };

    let history = history.into_inner();
    ctx.history
        .save(&history)
        .context("failed to save report history")?;
    progress.finish_ok(&format!(
        "{} refreshed, {} failed",
        summary.refreshed, summary.failed
    ));

    output(
        &RefreshResponse {
            refreshed: summary.refreshed,
            failed: summary.failed,
            reports: report_rows(history.entries()),
        },
        flags.format,
    )
}
