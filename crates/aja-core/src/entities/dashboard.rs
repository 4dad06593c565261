use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One KPI card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Kpi {
    pub value: f64,
    pub label: String,
    #[serde(default)]
    pub is_currency: bool,
    #[serde(default)]
    pub is_percentage: bool,
}

/// A chart data point: categorical (`bar`/`pie`/`donut`/`line`) or `x`/`y`
/// (`scatter`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ChartPoint {
    Category {
        category: String,
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        date: Option<i64>,
    },
    Xy {
        x: f64,
        y: f64,
    },
}

impl ChartPoint {
    #[must_use]
    pub fn category(category: impl Into<String>, value: f64) -> Self {
        Self::Category {
            category: category.into(),
            value,
            date: None,
        }
    }
}

/// Response of `POST /dashboard-data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardData {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub kpis: BTreeMap<String, Kpi>,
    #[serde(default)]
    pub charts: BTreeMap<String, Vec<ChartPoint>>,
}
