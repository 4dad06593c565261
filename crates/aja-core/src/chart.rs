//! Chart layouts for dashboard data and insight results.
//!
//! The analytics backend returns chart series keyed by name; which series
//! exist, and how each is drawn, depends on the dataset type. Insight result
//! views build their series locally with [`crate::kpi::aggregate`].

use serde::Serialize;
use serde_json::Value;

use crate::entities::{ChartPoint, DashboardData};
use crate::enums::ChartKind;
use crate::kpi::aggregate;

/// Presentation of one named series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartLayout {
    pub key: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
}

const fn chart(key: &'static str, title: &'static str, kind: ChartKind) -> ChartLayout {
    ChartLayout { key, title, kind }
}

#[rustfmt::skip]
const CLAIMS_CHARTS: &[ChartLayout] = &[
    chart("claims_by_employee", "Total Claims by Employee", ChartKind::Bar),
    chart("spend_by_employee", "Total Spend by Employee", ChartKind::Bar),
    chart("claims_by_policy", "Claims by Policy", ChartKind::Pie),
    chart("high_risk_employees", "High Risk Employees", ChartKind::Bar),
];

#[rustfmt::skip]
const TRAVEL_CHARTS: &[ChartLayout] = &[
    chart("flag_distribution", "Flag Distribution", ChartKind::Donut),
    chart("rare_by_expense", "Rare Trips by Expense Type", ChartKind::Bar),
    chart("rare_travellers", "Rare Travellers", ChartKind::Bar),
    chart("amount_vs_usage", "Amount vs Usage", ChartKind::Scatter),
];

#[rustfmt::skip]
const EMPLOYEE_CHARTS: &[ChartLayout] = &[
    chart("emp_by_department", "Employees by Department", ChartKind::Bar),
    chart("aging_bucket", "Aging Bucket", ChartKind::Bar),
    chart("year_trend", "Year Trend", ChartKind::Line),
];

/// Known layout for a dataset type (`PJPA37`, `PJPA38`, `PJPA39`).
#[must_use]
pub fn layout_for(file_type: &str) -> Option<&'static [ChartLayout]> {
    match file_type.trim().to_ascii_uppercase().as_str() {
        "PJPA37" => Some(CLAIMS_CHARTS),
        "PJPA38" => Some(TRAVEL_CHARTS),
        "PJPA39" => Some(EMPLOYEE_CHARTS),
        _ => None,
    }
}

/// A series ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub key: String,
    pub title: String,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

impl ChartSpec {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Charts to show for a dashboard response.
///
/// Known dataset types follow their layout, with absent series rendered
/// empty. Unknown types show every returned series as a bar chart titled by
/// its key.
#[must_use]
pub fn dashboard_charts(data: &DashboardData) -> Vec<ChartSpec> {
    match data.file_type.as_deref().and_then(layout_for) {
        Some(layout) => layout
            .iter()
            .map(|entry| ChartSpec {
                key: entry.key.to_string(),
                title: entry.title.to_string(),
                kind: entry.kind,
                points: data.charts.get(entry.key).cloned().unwrap_or_default(),
            })
            .collect(),
        None => data
            .charts
            .iter()
            .map(|(key, points)| ChartSpec {
                key: key.clone(),
                title: key.replace('_', " "),
                kind: ChartKind::Bar,
                points: points.clone(),
            })
            .collect(),
    }
}

/// A chart over insight result rows, grouped by one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultChart {
    pub field: &'static str,
    pub title: &'static str,
    pub kind: ChartKind,
    pub limit: Option<usize>,
}

#[rustfmt::skip]
pub const RESULT_CHARTS: &[ResultChart] = &[
    ResultChart { field: "Risk Category", title: "Amount Distribution across Risk Category", kind: ChartKind::Donut, limit: None },
    ResultChart { field: "Employee Name", title: "Amount Distribution by Employee", kind: ChartKind::Bar, limit: Some(10) },
    ResultChart { field: "Notice Period Days", title: "Amount Approved by Days of Separation", kind: ChartKind::Bar, limit: Some(15) },
    ResultChart { field: "Policy", title: "Amount Distribution across Policy", kind: ChartKind::Pie, limit: None },
];

/// Charts summarizing approved amounts in insight result rows. Charts whose
/// grouping column does not appear in any row are skipped.
#[must_use]
pub fn result_charts(rows: &[Value]) -> Vec<ChartSpec> {
    RESULT_CHARTS
        .iter()
        .filter(|def| rows.iter().any(|row| row.get(def.field).is_some()))
        .map(|def| {
            let mut points = aggregate(rows, def.field);
            if let Some(limit) = def.limit {
                points.truncate(limit);
            }
            ChartSpec {
                key: def.field.to_ascii_lowercase().replace(' ', "_"),
                title: def.title.to_string(),
                kind: def.kind,
                points,
            }
        })
        .collect()
}

/// Draws one chart. Renderers are consumed by `render`, so each chart gets a
/// fresh renderer that is dropped once drawing finishes.
pub trait ChartRenderer {
    type Output;

    fn render(self, chart: &ChartSpec) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn known_layout_fills_missing_series() {
        let data: DashboardData = serde_json::from_value(json!({
            "file_type": "pjpa39",
            "charts": {"year_trend": [{"category": "2023", "value": 4}]}
        }))
        .unwrap();

        let charts = dashboard_charts(&data);
        assert_eq!(
            charts.iter().map(|c| c.key.as_str()).collect::<Vec<_>>(),
            vec!["emp_by_department", "aging_bucket", "year_trend"]
        );
        assert!(charts[0].is_empty());
        assert_eq!(charts[2].kind, ChartKind::Line);
        assert_eq!(charts[2].points.len(), 1);
    }

    #[test]
    fn unknown_type_shows_every_series() {
        let data: DashboardData = serde_json::from_value(json!({
            "charts": {"by_state": [{"category": "KA", "value": 1}]}
        }))
        .unwrap();
        let charts = dashboard_charts(&data);
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].title, "by state");
        assert_eq!(charts[0].kind, ChartKind::Bar);
    }

    #[test]
    fn result_charts_skip_absent_columns_and_truncate() {
        let rows: Vec<Value> = (0..12)
            .map(|i| json!({"Employee Name": format!("E{i}"), "Amount Approved": 10}))
            .collect();
        let charts = result_charts(&rows);
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].key, "employee_name");
        assert_eq!(charts[0].points.len(), 10);
    }

    struct CountingRenderer;

    impl ChartRenderer for CountingRenderer {
        type Output = usize;

        fn render(self, chart: &ChartSpec) -> usize {
            chart.points.len()
        }
    }

    #[test]
    fn renderer_is_used_once_per_chart() {
        let spec = ChartSpec {
            key: "k".into(),
            title: "t".into(),
            kind: ChartKind::Pie,
            points: vec![ChartPoint::category("a", 1.0)],
        };
        assert_eq!(CountingRenderer.render(&spec), 1);
    }
}
