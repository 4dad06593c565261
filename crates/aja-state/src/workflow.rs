//! The upload → select → process → report audit flow.

use std::collections::BTreeMap;
use std::path::PathBuf;

use aja_core::catalog::{self, FileSlot, InsightDef};
use aja_core::entities::ReportEntry;
use aja_core::enums::{AuditStage, ReportStatus};
use aja_core::errors::CoreError;
use futures::future::join_all;

use crate::backend::InsightBackend;
use crate::error::StateError;
use crate::history::ReportHistory;

pub const SERVER_FAILED: &str = "Server execution failed.";
pub const DATA_ERROR: &str = "Data processing error.";
pub const COMPLETION_NOTICE: &str = "Audit session completed.";

/// What one analysis run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// New history entries, in the order they were prepended.
    pub entries: Vec<ReportEntry>,
    /// Set when notification is enabled and at least one check succeeded.
    pub notice: Option<&'static str>,
}

impl RunOutcome {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.status == ReportStatus::Success)
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }
}

/// State of one audit session.
#[derive(Debug, Clone)]
pub struct AuditRun {
    stage: AuditStage,
    previous_stage: AuditStage,
    files: BTreeMap<FileSlot, PathBuf>,
    selection: Vec<&'static InsightDef>,
    active_results: Vec<ReportEntry>,
    notify: bool,
    last_error: Option<String>,
}

impl Default for AuditRun {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditRun {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stage: AuditStage::Upload,
            previous_stage: AuditStage::Upload,
            files: BTreeMap::new(),
            selection: Vec::new(),
            active_results: Vec::new(),
            notify: false,
            last_error: None,
        }
    }

    #[must_use]
    pub const fn stage(&self) -> AuditStage {
        self.stage
    }

    #[must_use]
    pub const fn files(&self) -> &BTreeMap<FileSlot, PathBuf> {
        &self.files
    }

    #[must_use]
    pub fn has_file(&self, slot: FileSlot) -> bool {
        self.files.contains_key(&slot)
    }

    #[must_use]
    pub fn selection(&self) -> Vec<&'static str> {
        self.selection.iter().map(|def| def.id).collect()
    }

    /// Successful entries of the latest run (plus rows fixed by a retry).
    #[must_use]
    pub fn active_results(&self) -> &[ReportEntry] {
        &self.active_results
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub const fn set_notify(&mut self, notify: bool) {
        self.notify = notify;
    }

    fn go_to(&mut self, next: AuditStage) -> Result<(), CoreError> {
        if !self.stage.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: "audit".into(),
                from: self.stage.to_string(),
                to: next.to_string(),
            });
        }
        self.stage = next;
        Ok(())
    }

    fn expect_stage(&self, stage: AuditStage, action: &str) -> Result<(), CoreError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "cannot {action} during the {} stage",
                self.stage
            )))
        }
    }

    /// Put `path` into `slot`, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for an unsupported extension.
    pub fn attach(&mut self, slot: FileSlot, path: impl Into<PathBuf>) -> Result<(), CoreError> {
        let path = path.into();
        slot.validate_path(&path)?;
        self.files.insert(slot, path);
        Ok(())
    }

    pub fn remove(&mut self, slot: FileSlot) -> Option<PathBuf> {
        self.files.remove(&slot)
    }

    /// Upload every attached file in one request and move to insight
    /// selection. On failure the stage stays `upload` and the error is kept.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NoFiles`] with nothing attached, or the upload
    /// failure.
    pub async fn submit_upload<B: InsightBackend>(&mut self, backend: &B) -> Result<(), StateError> {
        self.expect_stage(AuditStage::Upload, "upload files")?;
        if self.files.is_empty() {
            return Err(StateError::NoFiles);
        }
        let files: Vec<(FileSlot, PathBuf)> = self
            .files
            .iter()
            .map(|(slot, path)| (*slot, path.clone()))
            .collect();

        match backend.upload_sources(&files).await {
            Ok(()) => {
                self.last_error = None;
                self.go_to(AuditStage::KpiOverview)?;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "source upload failed");
                self.last_error = Some(format!("Upload error: {error}"));
                Err(error.into())
            }
        }
    }

    /// Add or remove an insight from the selection. Returns whether it is
    /// now selected.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] for an id outside the catalog.
    pub fn toggle_insight(&mut self, id: &str) -> Result<bool, CoreError> {
        let def = catalog::lookup(id)?;
        if let Some(index) = self.selection.iter().position(|d| d.id == def.id) {
            self.selection.remove(index);
            Ok(false)
        } else {
            self.selection.push(def);
            Ok(true)
        }
    }

    /// Return from insight selection to the upload stage.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] outside insight selection.
    pub fn back(&mut self) -> Result<(), CoreError> {
        self.expect_stage(AuditStage::KpiOverview, "go back")?;
        self.go_to(AuditStage::Upload)
    }

    /// Run the selected checks and record them in `history`.
    ///
    /// Checks missing a required file fail immediately without a request.
    /// The rest are generated in one batch, then their rows are fetched
    /// concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::EmptySelection`] with nothing selected. Backend
    /// failures become failed entries, not errors.
    pub async fn start_analysis<B: InsightBackend>(
        &mut self,
        backend: &B,
        history: &mut ReportHistory,
    ) -> Result<RunOutcome, StateError> {
        self.expect_stage(AuditStage::KpiOverview, "start analysis")?;
        if self.selection.is_empty() {
            return Err(StateError::EmptySelection);
        }
        self.go_to(AuditStage::Processing)?;

        let entries = run_checks(backend, &self.selection, |slot| self.has_file(slot)).await;

        self.active_results = entries
            .iter()
            .filter(|entry| entry.status == ReportStatus::Success)
            .cloned()
            .collect();
        history.prepend(entries.clone());
        self.previous_stage = AuditStage::KpiOverview;
        self.go_to(AuditStage::Report)?;

        let outcome = RunOutcome {
            entries,
            notice: None,
        };
        let notice = (self.notify && outcome.succeeded() > 0).then_some(COMPLETION_NOTICE);
        Ok(RunOutcome { notice, ..outcome })
    }

    /// Show the report, or leave it for the stage shown before.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] while processing.
    pub fn toggle_report(&mut self) -> Result<(), CoreError> {
        if self.stage == AuditStage::Report {
            let previous = self.previous_stage;
            self.go_to(previous)
        } else {
            let current = self.stage;
            self.go_to(AuditStage::Report)?;
            self.previous_stage = current;
            Ok(())
        }
    }

    /// Replace the active result for `entry`'s insight after a retry.
    pub fn adopt_result(&mut self, entry: &ReportEntry) {
        self.active_results
            .retain(|active| active.module_id != entry.module_id);
        if entry.status == ReportStatus::Success {
            self.active_results.push(entry.clone());
        }
    }

    /// Forget files, selection and results; back to `upload`.
    pub fn new_session(&mut self) {
        let notify = self.notify;
        *self = Self::new();
        self.notify = notify;
    }
}

/// Evaluate `selection`: pre-check files, batch-generate the rest, fetch rows.
async fn run_checks<B: InsightBackend>(
    backend: &B,
    selection: &[&'static InsightDef],
    has_file: impl Fn(FileSlot) -> bool,
) -> Vec<ReportEntry> {
    let mut entries = Vec::with_capacity(selection.len());
    let mut to_run = Vec::new();

    for def in selection {
        let missing = def.missing_files(&has_file);
        if missing.is_empty() {
            to_run.push(*def);
        } else {
            tracing::debug!(insight = def.id, ?missing, "skipping check with missing data");
            entries.push(ReportEntry::missing_data(def, missing));
        }
    }
    if to_run.is_empty() {
        return entries;
    }

    let ids: Vec<&str> = to_run.iter().map(|def| def.id).collect();
    if let Err(error) = backend.generate(&ids).await {
        tracing::warn!(%error, "insight generation failed");
        entries.extend(to_run.iter().map(|def| ReportEntry::failed(def, SERVER_FAILED)));
        return entries;
    }

    let fetched = join_all(to_run.iter().map(|def| backend.insight_data(def.id))).await;
    entries.extend(to_run.iter().zip(fetched).map(|(def, result)| match result {
        Ok(rows) => ReportEntry::succeeded(def, rows),
        Err(error) => {
            tracing::warn!(insight = def.id, %error, "insight data fetch failed");
            ReportEntry::failed(def, DATA_ERROR)
        }
    }));
    entries
}
