use std::path::PathBuf;

use clap::Subcommand;

/// Analytics dataset commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FilesCommands {
    /// Files already uploaded to the analytics backend.
    List,
    /// Upload an Excel workbook and make it the current dataset.
    Upload { path: PathBuf },
    /// Make an uploaded file the current dataset.
    Load { filename: String },
}
