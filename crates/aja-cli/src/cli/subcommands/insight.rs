use std::path::PathBuf;

use clap::Subcommand;

/// Insight catalog commands.
#[derive(Clone, Debug, Subcommand)]
pub enum InsightCommands {
    /// List the insight checks and the files each one needs.
    List {
        /// Ask the audit backend which insights have output.
        #[arg(long)]
        remote: bool,
    },
    /// Download the generated workbook of an insight.
    Download {
        id: String,
        /// Output path (defaults to the server's file name).
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
}
