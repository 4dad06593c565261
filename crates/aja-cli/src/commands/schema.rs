use aja_core::entities::{ReportEntry, Session, UserRecord};
use anyhow::bail;
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `aja schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name.as_str() {
        "report-history" => schema_for!(Vec<ReportEntry>),
        "report-entry" => schema_for!(ReportEntry),
        "session" => schema_for!(Session),
        "user" => schema_for!(UserRecord),
        other => bail!(
            "unknown schema type '{other}' (expected report-history, report-entry, session or user)"
        ),
    };
    output(&schema, flags.format)
}
