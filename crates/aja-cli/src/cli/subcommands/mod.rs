mod audit;
mod auth;
mod files;
mod insight;
mod report;
mod user;

use std::path::PathBuf;

use aja_core::catalog::FileSlot;
use aja_core::entities::FilterDimension;

pub use audit::{AuditCommands, AuditRunArgs};
pub use auth::{AuthCommands, AuthLoginArgs};
pub use files::FilesCommands;
pub use insight::InsightCommands;
pub use report::ReportCommands;
pub use user::{StatusArg, UserCommands};

/// Parse `slot=path`, where slot is a key (`concurFile`) or alias (`concur`).
pub fn parse_source(raw: &str) -> Result<(FileSlot, PathBuf), String> {
    let (slot, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=PATH, got '{raw}'"))?;
    let slot = slot.parse::<FileSlot>().map_err(|error| error.to_string())?;
    let path = path.trim();
    if path.is_empty() {
        return Err(format!("missing path for {slot}"));
    }
    Ok((slot, PathBuf::from(path)))
}

/// Parse `dimension=value`. The value may itself contain `=` or `,`.
pub fn parse_filter(raw: &str) -> Result<(FilterDimension, String), String> {
    let (dimension, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected DIMENSION=VALUE, got '{raw}'"))?;
    let dimension = dimension
        .parse::<FilterDimension>()
        .map_err(|error| error.to_string())?;
    Ok((dimension, value.trim().to_string()))
}
