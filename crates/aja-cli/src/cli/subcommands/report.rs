use std::path::PathBuf;

use aja_core::catalog::FileSlot;
use clap::Subcommand;

use super::parse_source;

/// Report history commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// List recorded runs, newest first.
    List {
        /// Only rows with this status (success, failed).
        #[arg(long)]
        status: Option<String>,
    },
    /// Result rows of a successful run.
    Show {
        id: String,
        /// Summarize approved amounts as charts.
        #[arg(long)]
        charts: bool,
    },
    /// Run one check again, optionally uploading a missing file first.
    Retry {
        id: String,
        /// Replacement source file as `slot=path`.
        #[arg(long, value_parser = parse_source)]
        file: Option<(FileSlot, PathBuf)>,
    },
    /// Regenerate every successful run.
    Refresh,
    /// Forget the report history.
    Clear,
}
