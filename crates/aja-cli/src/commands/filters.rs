use aja_core::enums::Capability;
use aja_state::analytics::AnalyticsView;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FiltersArgs;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DimensionResponse<'a> {
    dimension: String,
    total: usize,
    values: Vec<&'a str>,
}

/// Handle `aja filters`.
pub async fn handle(args: &FiltersArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.auth.require(Capability::ViewAnalytics)?;
    let mut view = AnalyticsView::new(ctx.page_size());
    view.fetch_filter_options(&ctx.client).await?;

    let Some(dimension) = args.dimension else {
        return output(&view.filter_options, flags.format);
    };
    let matches = view
        .filter_options
        .search(dimension, args.search.as_deref().unwrap_or_default());
    let total = matches.len();
    let values = matches
        .into_iter()
        .take(effective_limit(flags.limit, total))
        .collect();
    output(
        &DimensionResponse {
            dimension: dimension.to_string(),
            total,
            values,
        },
        flags.format,
    )
}
