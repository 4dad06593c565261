use std::path::PathBuf;

use aja_core::catalog::FileSlot;
use clap::{Args, Subcommand};

use super::parse_source;

/// Audit workflow commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuditCommands {
    /// Upload source files, run the selected checks, record the results.
    Run(AuditRunArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AuditRunArgs {
    /// Source file as `slot=path` (slots: concur, line-items, emp-master,
    /// left-emp). Repeat for each slot.
    #[arg(long = "file", required = true, value_parser = parse_source)]
    pub files: Vec<(FileSlot, PathBuf)>,
    /// Insight ids to run, comma separated or repeated.
    #[arg(long = "insight", required = true, value_delimiter = ',')]
    pub insights: Vec<String>,
    /// Print a completion notice when at least one check succeeded.
    #[arg(long)]
    pub notify: bool,
}
