//! Report history: newest first, capped, persisted without result rows.

use aja_core::entities::ReportEntry;
use aja_core::enums::ReportStatus;
use aja_core::errors::CoreError;

use crate::error::StateError;
use crate::store::FileStore;

/// Store key of the persisted history.
pub const HISTORY_KEY: &str = "aja_audit_history";

/// Entries kept unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportHistory {
    entries: Vec<ReportEntry>,
    limit: usize,
}

impl Default for ReportHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl ReportHistory {
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Restore from persisted entries, trimming to `limit`.
    #[must_use]
    pub fn from_entries(mut entries: Vec<ReportEntry>, limit: usize) -> Self {
        entries.truncate(limit);
        Self { entries, limit }
    }

    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Put a run's entries in front of the existing history, keeping their
    /// order, and drop the oldest beyond the limit.
    pub fn prepend(&mut self, run: Vec<ReportEntry>) {
        let mut entries = run;
        entries.append(&mut self.entries);
        entries.truncate(self.limit);
        self.entries = entries;
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ReportEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    /// Look up a row by id.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] for an unknown id.
    pub fn entry_mut(&mut self, id: &str) -> Result<&mut ReportEntry, CoreError> {
        self.get_mut(id).ok_or_else(|| CoreError::NotFound {
            entity_type: "report".into(),
            id: id.to_string(),
        })
    }

    /// Ids of rows currently in `status`.
    #[must_use]
    pub fn ids_with_status(&self, status: ReportStatus) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.status == status)
            .map(|entry| entry.id.clone())
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Persists [`ReportHistory`] in a [`FileStore`].
#[derive(Debug, Clone)]
pub struct HistoryStore {
    store: FileStore,
    limit: usize,
}

impl HistoryStore {
    #[must_use]
    pub const fn new(store: FileStore, limit: usize) -> Self {
        Self { store, limit }
    }

    /// Load the saved history. Unreadable history is logged and treated as
    /// empty.
    #[must_use]
    pub fn load(&self) -> ReportHistory {
        let entries = self
            .store
            .get::<Vec<ReportEntry>>(HISTORY_KEY)
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "discarding unreadable report history");
                None
            })
            .unwrap_or_default();
        ReportHistory::from_entries(entries, self.limit)
    }

    /// Save with result rows stripped. Rows still refreshing are saved as
    /// they are.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Store`] if the file cannot be written.
    pub fn save(&self, history: &ReportHistory) -> Result<(), StateError> {
        let stripped: Vec<ReportEntry> = history
            .entries()
            .iter()
            .take(self.limit)
            .map(ReportEntry::stripped)
            .collect();
        self.store.set(HISTORY_KEY, &stripped)
    }

    /// Remove the saved history.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Store`] if the file cannot be removed.
    pub fn clear(&self) -> Result<(), StateError> {
        self.store.remove(HISTORY_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aja_core::catalog::lookup;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn entry(id: &str) -> ReportEntry {
        let mut entry = ReportEntry::failed(lookup("PJPA28").unwrap(), "Server execution failed.");
        entry.id = id.to_string();
        entry
    }

    #[test]
    fn prepend_keeps_run_order_in_front() {
        let mut history = ReportHistory::default();
        history.prepend(vec![entry("a"), entry("b")]);
        history.prepend(vec![entry("c"), entry("d")]);
        let ids: Vec<_> = history.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn never_exceeds_limit() {
        let mut history = ReportHistory::default();
        for run in 0..30 {
            history.prepend(vec![entry(&format!("{run}-x")), entry(&format!("{run}-y"))]);
            assert!(history.len() <= DEFAULT_HISTORY_LIMIT);
        }
        assert_eq!(history.len(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(history.entries()[0].id, "29-x");
    }

    #[test]
    fn save_strips_data_and_load_trims() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = HistoryStore::new(FileStore::new(tmp.path()), 2);

        let mut history = ReportHistory::new(3);
        history.prepend(vec![
            ReportEntry::succeeded(lookup("PJPA30").unwrap(), vec![json!({"Trips": 3})]),
            entry("old-1"),
            entry("old-2"),
        ]);
        store.save(&history).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.entries()[0].data.is_empty());
        assert_eq!(loaded.entries()[0].status, ReportStatus::Success);
    }

    #[test]
    fn unreadable_history_loads_empty() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let files = FileStore::new(tmp.path());
        std::fs::write(files.path_for(HISTORY_KEY), "[{").unwrap();
        assert!(HistoryStore::new(files, 50).load().is_empty());
    }
}
