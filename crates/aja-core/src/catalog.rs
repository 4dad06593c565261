//! Static insight catalog and the source-file slots each insight needs.
//!
//! The backend implements the checks; the client only knows which master data
//! files a check reads so it can fail fast when one is missing.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Extensions accepted for audit source files.
pub const SOURCE_EXTENSIONS: [&str; 4] = ["csv", "xls", "xlsx", "zip"];

/// Named master-data input of the audit flow. Serialized with the multipart
/// field names the audit backend expects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum FileSlot {
    ConcurFile,
    LineItemFile,
    EmpMasterFile,
    LeftEmpFile,
}

impl FileSlot {
    pub const ALL: [Self; 4] = [
        Self::ConcurFile,
        Self::LineItemFile,
        Self::EmpMasterFile,
        Self::LeftEmpFile,
    ];

    /// Multipart field name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ConcurFile => "concurFile",
            Self::LineItemFile => "lineItemFile",
            Self::EmpMasterFile => "empMasterFile",
            Self::LeftEmpFile => "leftEmpFile",
        }
    }

    /// Human label used in missing-data reasons.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ConcurFile => "Concur Header Data",
            Self::LineItemFile => "Line Item Expenses",
            Self::EmpMasterFile => "Employee Master",
            Self::LeftEmpFile => "Left Employees",
        }
    }

    /// Short command-line alias.
    #[must_use]
    pub const fn alias(self) -> &'static str {
        match self {
            Self::ConcurFile => "concur",
            Self::LineItemFile => "line-items",
            Self::EmpMasterFile => "emp-master",
            Self::LeftEmpFile => "left-emp",
        }
    }

    /// Check that `path` has one of the accepted source extensions.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the extension is missing or not
    /// one of [`SOURCE_EXTENSIONS`].
    pub fn validate_path(self, path: &Path) -> Result<(), CoreError> {
        let accepted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SOURCE_EXTENSIONS
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            });
        if accepted {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "{} must be one of .csv, .xls, .xlsx, .zip (got {})",
                self.label(),
                path.display()
            )))
        }
    }
}

impl fmt::Display for FileSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FileSlot {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|slot| slot.key().eq_ignore_ascii_case(s) || slot.alias().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "unknown file slot '{s}' (expected concur, line-items, emp-master or left-emp)"
                ))
            })
    }
}

/// One selectable insight check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsightDef {
    pub id: &'static str,
    /// Check code shown to users; several backend ids can share one.
    pub display_id: &'static str,
    pub label: &'static str,
    pub required: &'static [FileSlot],
}

impl InsightDef {
    /// Name shown in the report history, e.g. `PJPA28 - Benford's Law`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.display_id, self.label)
    }

    /// Required slots for which `has_file` returns false, in catalog order.
    #[must_use]
    pub fn missing_files(&self, has_file: impl Fn(FileSlot) -> bool) -> Vec<FileSlot> {
        self.required
            .iter()
            .copied()
            .filter(|slot| !has_file(*slot))
            .collect()
    }
}

use FileSlot::{ConcurFile, EmpMasterFile, LeftEmpFile, LineItemFile};

/// Every insight the audit backend can generate.
#[rustfmt::skip]
pub const INSIGHTS: &[InsightDef] = &[
    InsightDef { id: "PJPA27", display_id: "PJPA27", label: "Notice Period Expense Risk", required: &[LeftEmpFile, ConcurFile] },
    InsightDef { id: "PJPA28", display_id: "PJPA28", label: "Benford's Law", required: &[LineItemFile] },
    InsightDef { id: "PJPA29", display_id: "PJPA29", label: "New Joiner Early Claims", required: &[EmpMasterFile, LineItemFile] },
    InsightDef { id: "PJPA30", display_id: "PJPA30", label: "Short Trip Frequency Abuse", required: &[LineItemFile] },
    InsightDef { id: "PJPA31", display_id: "PJPA31", label: "Structural Splitting", required: &[LineItemFile] },
    InsightDef { id: "PJPA32_HOL", display_id: "PJPA32", label: "Holiday Travel & Weekend Travel", required: &[LineItemFile] },
    InsightDef { id: "PJPA33", display_id: "PJPA33", label: "Bulk Booking Reimbursements", required: &[LineItemFile] },
    InsightDef { id: "PJPA34", display_id: "PJPA34", label: "High-Frequency Low Value Claims", required: &[LineItemFile] },
    InsightDef { id: "PJPA35", display_id: "PJPA35", label: "Duplicate Report ID", required: &[ConcurFile] },
    InsightDef { id: "PJPA36", display_id: "PJPA36", label: "Missing Submit Date (Date Gaps)", required: &[ConcurFile] },
    InsightDef { id: "PJPA38", display_id: "PJPA38", label: "Odd Travels (Anomaly Detection)", required: &[LineItemFile] },
    InsightDef { id: "PJPA39", display_id: "PJPA39", label: "Active Employees with Separation Date", required: &[EmpMasterFile] },
    InsightDef { id: "PJPA40", display_id: "PJPA40", label: "Transaction Date Out of Bounds", required: &[ConcurFile, LineItemFile] },
];

/// Look up an insight by id (case-insensitive).
#[must_use]
pub fn find(id: &str) -> Option<&'static InsightDef> {
    INSIGHTS
        .iter()
        .find(|insight| insight.id.eq_ignore_ascii_case(id.trim()))
}

/// Look up an insight by id.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] when the id is not in [`INSIGHTS`].
pub fn lookup(id: &str) -> Result<&'static InsightDef, CoreError> {
    find(id).ok_or_else(|| CoreError::NotFound {
        entity_type: "insight".into(),
        id: id.to_string(),
    })
}

/// Reason recorded for a check that could not run.
#[must_use]
pub fn missing_data_reason(missing: &[FileSlot]) -> String {
    let labels = missing
        .iter()
        .map(|slot| slot.label())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Missing Data: {labels}")
}
