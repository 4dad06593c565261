//! Roles, statuses, stages and view enums for the AJALabs client.
//!
//! Status enums with state machines provide `allowed_next_states()` so the
//! state holders in `aja-state` can reject invalid transitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role assigned to a user by the audit backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Uploader,
    Reviewer,
    Viewer,
}

/// Something a role may or may not be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// List, add, update and delete users.
    ManageUsers,
    /// Upload source files and run insight checks.
    RunAudits,
    /// Inspect, retry and refresh the report history.
    ReviewReports,
    /// Browse uploaded analytics files, dashboards and tables.
    ViewAnalytics,
}

impl Role {
    pub const ALL: [Self; 4] = [Self::Admin, Self::Uploader, Self::Reviewer, Self::Viewer];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Uploader => "uploader",
            Self::Reviewer => "reviewer",
            Self::Viewer => "viewer",
        }
    }

    /// Whether this role grants `capability`.
    #[must_use]
    pub const fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::ManageUsers => matches!(self, Self::Admin),
            Capability::RunAudits => matches!(self, Self::Admin | Self::Uploader),
            Capability::ReviewReports => {
                matches!(self, Self::Admin | Self::Uploader | Self::Reviewer)
            }
            Capability::ViewAnalytics => true,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ManageUsers => "manage users",
            Self::RunAudits => "run audits",
            Self::ReviewReports => "review reports",
            Self::ViewAnalytics => "view analytics",
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("unknown role '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// UserStatus
// ---------------------------------------------------------------------------

/// Account status of a managed user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        })
    }
}

// ---------------------------------------------------------------------------
// ReportStatus
// ---------------------------------------------------------------------------

/// Outcome of one insight run in the report history.
///
/// ```text
/// success → refreshing → success
///                      → failed
/// failed  → refreshing
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ReportStatus {
    Success,
    Failed,
    Refreshing,
}

impl ReportStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Success | Self::Failed => &[Self::Refreshing],
            Self::Refreshing => &[Self::Success, Self::Failed],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failed => "Failed",
            Self::Refreshing => "Refreshing...",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditStage
// ---------------------------------------------------------------------------

/// Stage of the upload → select → process → report flow.
///
/// ```text
/// upload → kpi_overview → processing → report
///        ← (back)
/// report ↔ any stage (report toggle)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditStage {
    Upload,
    KpiOverview,
    Processing,
    Report,
}

impl AuditStage {
    /// Valid next stages from the current stage.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Upload => &[Self::KpiOverview, Self::Report],
            Self::KpiOverview => &[Self::Upload, Self::Processing, Self::Report],
            Self::Processing => &[Self::Report],
            Self::Report => &[Self::Upload, Self::KpiOverview],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::KpiOverview => "kpi_overview",
            Self::Processing => "processing",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for AuditStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ViewKind
// ---------------------------------------------------------------------------

/// Page shown by the analytics view holder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    #[default]
    Upload,
    Dashboard,
    Table,
}

// ---------------------------------------------------------------------------
// SortDirection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

// ---------------------------------------------------------------------------
// ChartKind
// ---------------------------------------------------------------------------

/// Chart type used to present one dashboard series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Donut,
    Line,
    Scatter,
}
