use std::path::PathBuf;

use aja_core::enums::{Capability, ViewKind};
use aja_state::analytics::AnalyticsView;
use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TableArgs;
use crate::commands::shared::filters::filter_values;
use crate::context::AppContext;
use crate::output::{output, output_page};
use crate::progress::Progress;

#[derive(Serialize)]
struct ExportResponse {
    path: String,
    rows: usize,
}

/// Handle `aja table`.
pub async fn handle(args: &TableArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.auth.require(Capability::ViewAnalytics)?;
    let mut view = AnalyticsView::new(args.page_size.unwrap_or_else(|| ctx.page_size()));

    if let Some(file) = &args.file {
        view.load(&ctx.client, file)
            .await
            .with_context(|| format!("failed to load {file}"))?;
    }
    view.filters = filter_values(&args.filters);
    apply_query(&mut view, args);
    view.set_view(ViewKind::Table);

    let progress = Progress::spinner("Fetching table page");
    if let Err(error) = view.fetch_table(&ctx.client).await {
        progress.finish_err(&error.to_string());
        return Err(error.into());
    }
    progress.finish_clear();

    match &args.export {
        Some(path) => export(&view, path, flags).await,
        None => {
            let page = view.table.as_ref().context("analytics backend returned no table page")?;
            output_page(page, flags.format)
        }
    }
}

fn apply_query(view: &mut AnalyticsView, args: &TableArgs) {
    if let Some(term) = &args.search {
        view.query.search(term);
    }
    if let Some(column) = &args.sort {
        view.query.sort_by(column);
        if args.desc {
            view.query.sort_by(column);
        }
    }
    view.query.go_to(args.page);
}

async fn export(view: &AnalyticsView, path: &str, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (default_name, csv) = view.export_csv()?;
    let path = if path.trim().is_empty() {
        PathBuf::from(default_name)
    } else {
        PathBuf::from(path)
    };
    tokio::fs::write(&path, &csv)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    let rows = view.table.as_ref().map_or(0, |page| page.data.len());
    output(
        &ExportResponse {
            path: path.display().to_string(),
            rows,
        },
        flags.format,
    )
}
