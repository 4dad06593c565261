//! Row actions on the report: view, retry, inline re-upload, refresh all.
//!
//! Each row moves `Success|Failed -> Refreshing -> Success|Failed`. Refresh
//! all marks every successful row first, then resolves rows concurrently;
//! each row takes the history lock only to read its insight id and to write
//! its own outcome.

use std::path::PathBuf;

use aja_client::ClientError;
use aja_core::catalog::FileSlot;
use aja_core::entities::ReportEntry;
use aja_core::enums::ReportStatus;
use futures::future::join_all;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::backend::InsightBackend;
use crate::error::StateError;
use crate::history::ReportHistory;

pub const RETRY_FAILED: &str = "Retry failed.";
pub const REFRESH_FAILED: &str = "Refresh failed.";

/// Result of [`refresh_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub refreshed: usize,
    pub failed: usize,
}

/// Result rows of a successful report row. Rows restored from disk carry no
/// data, so they are fetched again and cached on the row.
///
/// # Errors
///
/// Returns [`StateError::NotViewable`] unless the row is `Success`, or the
/// fetch failure.
pub async fn view_results<B: InsightBackend>(
    backend: &B,
    history: &mut ReportHistory,
    entry_id: &str,
) -> Result<Vec<Value>, StateError> {
    let entry = history.entry_mut(entry_id)?;
    if entry.status != ReportStatus::Success {
        return Err(StateError::NotViewable {
            id: entry.id.clone(),
            status: entry.status.to_string(),
        });
    }
    if entry.data.is_empty() {
        entry.data = backend.insight_data(&entry.module_id).await?;
    }
    Ok(entry.data.clone())
}

/// Regenerate one row, optionally uploading a replacement source file first.
///
/// Any failure leaves the row `Failed` with [`RETRY_FAILED`]; the returned
/// entry reflects the final state either way.
///
/// # Errors
///
/// Returns [`StateError`] only for an unknown row, an invalid file, or a row
/// already refreshing.
pub async fn retry<B: InsightBackend>(
    backend: &B,
    history: &mut ReportHistory,
    entry_id: &str,
    upload: Option<(FileSlot, PathBuf)>,
) -> Result<ReportEntry, StateError> {
    if let Some((slot, path)) = &upload {
        slot.validate_path(path)?;
    }
    let entry = history.entry_mut(entry_id)?;
    entry.mark_refreshing()?;
    let module_id = entry.module_id.clone();

    let outcome = async {
        if let Some(file) = upload {
            backend.upload_sources(&[file]).await?;
        }
        regenerate(backend, &module_id).await
    }
    .await;

    let entry = history.entry_mut(entry_id)?;
    match outcome {
        Ok(rows) => entry.resolve_success(rows)?,
        Err(error) => {
            tracing::warn!(entry = entry_id, %error, "retry failed");
            entry.resolve_failure(RETRY_FAILED)?;
        }
    }
    Ok(entry.clone())
}

/// Mark every `Success` row `Refreshing` and return their ids.
///
/// # Errors
///
/// Returns [`StateError::NothingToRefresh`] when no row succeeded.
pub fn begin_refresh(history: &mut ReportHistory) -> Result<Vec<String>, StateError> {
    let ids = history.ids_with_status(ReportStatus::Success);
    if ids.is_empty() {
        return Err(StateError::NothingToRefresh);
    }
    for id in &ids {
        history.entry_mut(id)?.mark_refreshing()?;
    }
    Ok(ids)
}

/// Refresh every successful row. Rows resolve independently; one failing
/// row does not affect the others.
///
/// # Errors
///
/// Returns [`StateError::NothingToRefresh`] when no row succeeded.
pub async fn refresh_all<B: InsightBackend>(
    backend: &B,
    history: &Mutex<ReportHistory>,
) -> Result<RefreshSummary, StateError> {
    let ids = begin_refresh(&mut *history.lock().await)?;
    tracing::debug!(count = ids.len(), "refreshing successful reports");

    let outcomes = join_all(ids.iter().map(|id| refresh_row(backend, history, id))).await;

    let refreshed = outcomes.iter().filter(|ok| **ok).count();
    Ok(RefreshSummary {
        refreshed,
        failed: outcomes.len() - refreshed,
    })
}

async fn refresh_row<B: InsightBackend>(
    backend: &B,
    history: &Mutex<ReportHistory>,
    entry_id: &str,
) -> bool {
    let module_id = match history.lock().await.get(entry_id) {
        Some(entry) => entry.module_id.clone(),
        None => return false,
    };

    let outcome = regenerate(backend, &module_id).await;

    let mut history = history.lock().await;
    let Some(entry) = history.get_mut(entry_id) else {
        return false;
    };
    let resolved = match outcome {
        Ok(rows) => entry.resolve_success(rows).map(|()| true),
        Err(error) => {
            tracing::warn!(entry = entry_id, %error, "refresh failed");
            entry.resolve_failure(REFRESH_FAILED).map(|()| false)
        }
    };
    resolved.unwrap_or_else(|error| {
        tracing::warn!(entry = entry_id, %error, "row changed during refresh");
        false
    })
}

async fn regenerate<B: InsightBackend>(backend: &B, module_id: &str) -> Result<Vec<Value>, ClientError> {
    backend.generate(&[module_id]).await?;
    backend.insight_data(module_id).await
}
