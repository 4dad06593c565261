use aja_core::entities::ReportEntry;
use serde::Serialize;

/// One report history row as printed by `report` and `audit` commands.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub id: String,
    pub name: String,
    pub status: String,
    pub reason: String,
    pub rows: usize,
    pub timestamp: String,
}

impl From<&ReportEntry> for ReportRow {
    fn from(entry: &ReportEntry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.name.clone(),
            status: entry.status.to_string(),
            reason: entry.reason.clone(),
            rows: entry.data.len(),
            timestamp: entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

pub fn report_rows<'a>(entries: impl IntoIterator<Item = &'a ReportEntry>) -> Vec<ReportRow> {
    entries.into_iter().map(ReportRow::from).collect()
}
