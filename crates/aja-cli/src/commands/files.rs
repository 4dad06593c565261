use aja_core::enums::Capability;
use aja_state::analytics::AnalyticsView;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FilesCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `aja files <subcommand>`.
pub async fn handle(
    action: &FilesCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    ctx.auth.require(Capability::ViewAnalytics)?;
    let mut view = AnalyticsView::new(ctx.page_size());

    match action {
        FilesCommands::List => {
            view.refresh_files(&ctx.client).await?;
            let limit = effective_limit(flags.limit, view.files.len());
            let files = view.files.iter().take(limit).collect::<Vec<_>>();
            output(&files, flags.format)
        }
        FilesCommands::Upload { path } => {
            let progress = Progress::spinner(&format!("Uploading {}", path.display()));
            match view.upload(&ctx.client, path).await {
                Ok(loaded) => {
                    progress.finish_ok(&loaded.message);
                    output(&loaded, flags.format)
                }
                Err(error) => {
                    progress.finish_err(view.error.as_deref().unwrap_or("Upload failed"));
                    Err(error.into())
                }
            }
        }
        FilesCommands::Load { filename } => {
            let loaded = view.load(&ctx.client, filename).await?;
            output(&loaded, flags.format)
        }
    }
}
