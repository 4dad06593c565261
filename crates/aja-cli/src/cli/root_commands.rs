use aja_core::entities::FilterDimension;
use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AuditCommands, AuthCommands, FilesCommands, InsightCommands, ReportCommands, UserCommands,
    parse_filter,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Log in, log out, show the current session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Insight catalog and generated workbooks.
    Insight {
        #[command(subcommand)]
        action: InsightCommands,
    },
    /// Upload source files and run insight checks.
    Audit {
        #[command(subcommand)]
        action: AuditCommands,
    },
    /// Report history: inspect, retry, refresh.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
    /// Analytics datasets.
    Files {
        #[command(subcommand)]
        action: FilesCommands,
    },
    /// KPIs and charts for the loaded dataset.
    Dashboard(DashboardArgs),
    /// Filter values available for the loaded dataset.
    Filters(FiltersArgs),
    /// One page of the loaded dataset.
    Table(TableArgs),
    /// User administration (admin only).
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Dump JSON schema for a persisted type.
    Schema(SchemaArgs),
}

/// Filter panel selections shared by `dashboard` and `table`.
#[derive(Clone, Debug, Default, Args)]
pub struct FilterArgs {
    /// Filter as `dimension=value`; repeat to select several values.
    #[arg(long, value_parser = parse_filter)]
    pub filter: Vec<(FilterDimension, String)>,
    /// Start of the date range (inclusive).
    #[arg(long, requires = "to")]
    pub from: Option<String>,
    /// End of the date range (inclusive).
    #[arg(long, requires = "from")]
    pub to: Option<String>,
    /// Minimum approved amount.
    #[arg(long, requires = "max_amount")]
    pub min_amount: Option<f64>,
    /// Maximum approved amount.
    #[arg(long, requires = "min_amount")]
    pub max_amount: Option<f64>,
}

/// Arguments for `aja dashboard`.
#[derive(Clone, Debug, Args)]
pub struct DashboardArgs {
    /// Load this uploaded file first.
    #[arg(long)]
    pub file: Option<String>,
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Print KPIs only.
    #[arg(long)]
    pub no_charts: bool,
}

/// Arguments for `aja filters`.
#[derive(Clone, Debug, Args)]
pub struct FiltersArgs {
    /// Show only this dimension.
    pub dimension: Option<FilterDimension>,
    /// Case-insensitive match within the dimension.
    #[arg(long, requires = "dimension")]
    pub search: Option<String>,
}

/// Arguments for `aja table`.
#[derive(Clone, Debug, Args)]
pub struct TableArgs {
    /// Load this uploaded file first.
    #[arg(long)]
    pub file: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Rows per page (defaults to `general.page_size`).
    #[arg(long)]
    pub page_size: Option<u32>,
    #[arg(long)]
    pub search: Option<String>,
    /// Column to sort by.
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Write the page as CSV instead of printing it. Without a path the file
    /// is named after the dataset.
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    pub export: Option<String>,
}

/// Arguments for `aja schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// `report-history`, `report-entry`, `session` or `user`.
    #[arg(default_value = "report-history")]
    pub type_name: String,
}
