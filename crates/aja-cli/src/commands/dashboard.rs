use std::collections::BTreeMap;

use aja_core::chart::{ChartSpec, dashboard_charts};
use aja_core::entities::DashboardData;
use aja_core::enums::Capability;
use aja_state::analytics::AnalyticsView;
use anyhow::Context;
use serde::Serialize;

use crate::cli::root_commands::DashboardArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::filters::filter_values;
use crate::commands::shared::kpis::{KpiCard, kpi_cards, print_cards_and_charts};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DashboardResponse {
    filename: Option<String>,
    file_type: Option<String>,
    total_rows: u64,
    kpis: BTreeMap<String, KpiCard>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    charts: Vec<ChartSpec>,
}

/// Handle `aja dashboard`.
pub async fn handle(args: &DashboardArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.auth.require(Capability::ViewAnalytics)?;
    let mut view = AnalyticsView::new(ctx.page_size());

    if let Some(file) = &args.file {
        view.load(&ctx.client, file)
            .await
            .with_context(|| format!("failed to load {file}"))?;
    }
    let filters = filter_values(&args.filters);
    if args.file.is_none() || filters.has_active() {
        view.filters = filters;
        view.fetch_dashboard(&ctx.client).await?;
    }

    let data = view.dashboard.context("analytics backend returned no dashboard")?;
    let response = dashboard_response(&data, !args.no_charts);

    if flags.format != OutputFormat::Table {
        return output(&response, flags.format);
    }
    print_cards_and_charts(response.kpis, &response.charts)
}

fn dashboard_response(data: &DashboardData, with_charts: bool) -> DashboardResponse {
    DashboardResponse {
        filename: data.filename.clone(),
        file_type: data.file_type.clone(),
        total_rows: data.total_rows,
        kpis: kpi_cards(&data.kpis),
        charts: if with_charts {
            dashboard_charts(data)
        } else {
            Vec::new()
        },
    }
}
