use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{FileSlot, InsightDef, missing_data_reason};
use crate::enums::ReportStatus;
use crate::errors::CoreError;

/// One insight run in the report history.
///
/// Persisted without `data`; rows restored from disk must re-fetch results
/// before they can be viewed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub id: String,
    pub module_id: String,
    pub name: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub missing_files: Vec<FileSlot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<Value>,
    pub timestamp: DateTime<Utc>,
}

impl ReportEntry {
    fn new(insight: &InsightDef, status: ReportStatus, reason: String, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("{}_{}", insight.id, now.timestamp_millis()),
            module_id: insight.id.to_string(),
            name: insight.display_name(),
            status,
            reason,
            missing_files: Vec::new(),
            data: Vec::new(),
            timestamp: now,
        }
    }

    #[must_use]
    pub fn succeeded(insight: &InsightDef, data: Vec<Value>) -> Self {
        let mut entry = Self::new(insight, ReportStatus::Success, String::new(), Utc::now());
        entry.data = data;
        entry
    }

    #[must_use]
    pub fn failed(insight: &InsightDef, reason: impl Into<String>) -> Self {
        Self::new(insight, ReportStatus::Failed, reason.into(), Utc::now())
    }

    /// A failure recorded before any request because source files are absent.
    #[must_use]
    pub fn missing_data(insight: &InsightDef, missing: Vec<FileSlot>) -> Self {
        let mut entry = Self::failed(insight, missing_data_reason(&missing));
        entry.missing_files = missing;
        entry
    }

    /// Copy suitable for persistence (result rows dropped).
    #[must_use]
    pub fn stripped(&self) -> Self {
        Self {
            data: Vec::new(),
            ..self.clone()
        }
    }

    /// Whether the row failed because of missing source files and can be
    /// fixed by uploading them.
    #[must_use]
    pub fn needs_upload(&self) -> bool {
        self.status == ReportStatus::Failed && !self.missing_files.is_empty()
    }

    fn transition(&mut self, next: ReportStatus) -> Result<(), CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: format!("report {}", self.id),
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    /// Enter `Refreshing` ahead of a retry or refresh.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if the row is already refreshing.
    pub fn mark_refreshing(&mut self) -> Result<(), CoreError> {
        self.transition(ReportStatus::Refreshing)
    }

    /// Resolve a refresh with fresh rows.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the row is refreshing.
    pub fn resolve_success(&mut self, data: Vec<Value>) -> Result<(), CoreError> {
        self.transition(ReportStatus::Success)?;
        self.reason.clear();
        self.missing_files.clear();
        self.data = data;
        self.timestamp = Utc::now();
        Ok(())
    }

    /// Resolve a refresh with a failure reason.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] unless the row is refreshing.
    pub fn resolve_failure(&mut self, reason: impl Into<String>) -> Result<(), CoreError> {
        self.transition(ReportStatus::Failed)?;
        self.reason = reason.into();
        self.data.clear();
        Ok(())
    }
}

/// Body of `GET /api/insight/:id/data`: either a bare row array or an
/// envelope carrying a `data` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InsightPayload {
    Rows(Vec<Value>),
    Envelope {
        #[serde(default)]
        data: Vec<Value>,
    },
}

impl InsightPayload {
    #[must_use]
    pub fn into_rows(self) -> Vec<Value> {
        match self {
            Self::Rows(rows) | Self::Envelope { data: rows } => rows,
        }
    }
}
