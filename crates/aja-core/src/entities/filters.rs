use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Maximum options shown per dimension when searching the filter panel.
pub const MAX_OPTION_MATCHES: usize = 20;

/// Multi-select dimension of the dashboard filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    EmployeeId,
    EmployeeName,
    Department,
    Policy,
    ReportId,
    Cluster,
    ExpenseType,
    State,
}

impl FilterDimension {
    pub const ALL: [Self; 8] = [
        Self::EmployeeId,
        Self::EmployeeName,
        Self::Department,
        Self::Policy,
        Self::ReportId,
        Self::Cluster,
        Self::ExpenseType,
        Self::State,
    ];

    /// Wire field name.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::EmployeeId => "employee_id",
            Self::EmployeeName => "employee_name",
            Self::Department => "department",
            Self::Policy => "policy",
            Self::ReportId => "report_id",
            Self::Cluster => "cluster",
            Self::ExpenseType => "expense_type",
            Self::State => "state",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

impl FromStr for FilterDimension {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|dim| dim.field().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| CoreError::Validation(format!("unknown filter dimension '{s}'")))
    }
}

/// Distinct values per dimension, from `GET /filter-options`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterOptions {
    #[serde(default)]
    pub employee_id: Vec<String>,
    #[serde(default)]
    pub employee_name: Vec<String>,
    #[serde(default)]
    pub department: Vec<String>,
    #[serde(default)]
    pub policy: Vec<String>,
    #[serde(default)]
    pub report_id: Vec<String>,
    #[serde(default)]
    pub cluster: Vec<String>,
    #[serde(default)]
    pub expense_type: Vec<String>,
    #[serde(default)]
    pub state: Vec<String>,
}

impl FilterOptions {
    #[must_use]
    pub fn values(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            FilterDimension::EmployeeId => &self.employee_id,
            FilterDimension::EmployeeName => &self.employee_name,
            FilterDimension::Department => &self.department,
            FilterDimension::Policy => &self.policy,
            FilterDimension::ReportId => &self.report_id,
            FilterDimension::Cluster => &self.cluster,
            FilterDimension::ExpenseType => &self.expense_type,
            FilterDimension::State => &self.state,
        }
    }

    /// Case-insensitive substring search over one dimension, capped at
    /// [`MAX_OPTION_MATCHES`]. An empty term returns the first options.
    #[must_use]
    pub fn search(&self, dimension: FilterDimension, term: &str) -> Vec<&str> {
        let needle = term.trim().to_lowercase();
        self.values(dimension)
            .iter()
            .filter(|option| needle.is_empty() || option.to_lowercase().contains(&needle))
            .take(MAX_OPTION_MATCHES)
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmountRange {
    pub min: f64,
    pub max: f64,
}

/// Selected filter values sent with `POST /dashboard-data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterValues {
    #[serde(default)]
    pub employee_id: Vec<String>,
    #[serde(default)]
    pub employee_name: Vec<String>,
    #[serde(default)]
    pub department: Vec<String>,
    #[serde(default)]
    pub policy: Vec<String>,
    #[serde(default)]
    pub report_id: Vec<String>,
    #[serde(default)]
    pub cluster: Vec<String>,
    #[serde(default)]
    pub expense_type: Vec<String>,
    #[serde(default)]
    pub state: Vec<String>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub amount_range: Option<AmountRange>,
}

impl FilterValues {
    fn selected_mut(&mut self, dimension: FilterDimension) -> &mut Vec<String> {
        match dimension {
            FilterDimension::EmployeeId => &mut self.employee_id,
            FilterDimension::EmployeeName => &mut self.employee_name,
            FilterDimension::Department => &mut self.department,
            FilterDimension::Policy => &mut self.policy,
            FilterDimension::ReportId => &mut self.report_id,
            FilterDimension::Cluster => &mut self.cluster,
            FilterDimension::ExpenseType => &mut self.expense_type,
            FilterDimension::State => &mut self.state,
        }
    }

    /// Add `value` to the selection for `dimension`, or remove it if present.
    pub fn toggle(&mut self, dimension: FilterDimension, value: &str) {
        let selected = self.selected_mut(dimension);
        if let Some(index) = selected.iter().position(|v| v == value) {
            selected.remove(index);
        } else {
            selected.push(value.to_string());
        }
    }

    /// Whether any dimension or range is set.
    #[must_use]
    pub fn has_active(&self) -> bool {
        self.date_range.is_some()
            || self.amount_range.is_some()
            || FilterDimension::ALL.into_iter().any(|dim| match dim {
                FilterDimension::EmployeeId => !self.employee_id.is_empty(),
                FilterDimension::EmployeeName => !self.employee_name.is_empty(),
                FilterDimension::Department => !self.department.is_empty(),
                FilterDimension::Policy => !self.policy.is_empty(),
                FilterDimension::ReportId => !self.report_id.is_empty(),
                FilterDimension::Cluster => !self.cluster.is_empty(),
                FilterDimension::ExpenseType => !self.expense_type.is_empty(),
                FilterDimension::State => !self.state.is_empty(),
            })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
