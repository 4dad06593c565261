//! State holder error types.

use std::path::PathBuf;

use aja_client::ClientError;
use aja_core::enums::{Capability, Role};
use aja_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Client(#[from] ClientError),

    /// A stored value could not be read or written.
    #[error("store error at {path}: {message}")]
    Store { path: PathBuf, message: String },

    #[error("not logged in (run `aja auth login`)")]
    NotLoggedIn,

    #[error("role '{role}' is not allowed to {capability}")]
    Forbidden { role: Role, capability: Capability },

    #[error("No files attached.")]
    NoFiles,

    #[error("Select at least one insight.")]
    EmptySelection,

    #[error("No successful reports to refresh.")]
    NothingToRefresh,

    /// The report row cannot be viewed in its current status.
    #[error("report {id} has no results to show ({status})")]
    NotViewable { id: String, status: String },

    #[error("Please upload an Excel file (.xlsx or .xls)")]
    NotSpreadsheet,

    #[error("no table data loaded")]
    NoTable,
}
