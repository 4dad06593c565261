//! Text rendering of dashboard and result charts.

use aja_core::chart::{ChartRenderer, ChartSpec};
use aja_core::entities::ChartPoint;
use aja_core::enums::ChartKind;
use aja_core::kpi::format_number;

const LABEL_WIDTH: usize = 24;
const MAX_SCATTER_POINTS: usize = 10;

/// Draws one chart as lines of text: bars for categorical series, shares
/// for pie and donut charts, a point list for scatter plots.
#[derive(Clone, Copy, Debug)]
pub struct TerminalChart {
    pub bar_width: usize,
}

impl Default for TerminalChart {
    fn default() -> Self {
        Self { bar_width: 30 }
    }
}

impl ChartRenderer for TerminalChart {
    type Output = String;

    fn render(self, chart: &ChartSpec) -> String {
        let mut lines = vec![format!("{} ({})", chart.title, kind_name(chart.kind))];
        if chart.is_empty() {
            lines.push("  (no data)".to_string());
            return lines.join("\n");
        }
        match chart.kind {
            ChartKind::Bar | ChartKind::Line => lines.extend(self.bars(&categories(chart))),
            ChartKind::Pie | ChartKind::Donut => lines.extend(self.shares(&categories(chart))),
            ChartKind::Scatter => lines.extend(scatter(chart)),
        }
        lines.join("\n")
    }
}

impl TerminalChart {
    fn bars(self, points: &[(String, f64)]) -> Vec<String> {
        let max = points.iter().map(|(_, value)| value.abs()).fold(0.0, f64::max);
        let width = label_width(points);
        points
            .iter()
            .map(|(label, value)| {
                let bar = "█".repeat(self.scaled(value.abs(), max));
                format!("  {label:<width$}  {bar} {}", format_number(*value))
            })
            .collect()
    }

    fn shares(self, points: &[(String, f64)]) -> Vec<String> {
        let total: f64 = points.iter().map(|(_, value)| value.abs()).sum();
        let width = label_width(points);
        points
            .iter()
            .map(|(label, value)| {
                let share = if total > 0.0 { value.abs() / total * 100.0 } else { 0.0 };
                let bar = "█".repeat(self.scaled(value.abs(), total));
                format!("  {label:<width$}  {share:>5.1}% {bar}")
            })
            .collect()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn scaled(self, value: f64, max: f64) -> usize {
        if max <= 0.0 {
            return 0;
        }
        let cells = (value / max * self.bar_width as f64).round() as usize;
        // Keep non-zero values visible.
        if value > 0.0 { cells.max(1) } else { cells }
    }
}

const fn kind_name(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Bar => "bar",
        ChartKind::Pie => "pie",
        ChartKind::Donut => "donut",
        ChartKind::Line => "line",
        ChartKind::Scatter => "scatter",
    }
}

fn categories(chart: &ChartSpec) -> Vec<(String, f64)> {
    chart
        .points
        .iter()
        .filter_map(|point| match point {
            ChartPoint::Category { category, value, .. } => Some((shorten(category), *value)),
            ChartPoint::Xy { .. } => None,
        })
        .collect()
}

fn scatter(chart: &ChartSpec) -> Vec<String> {
    let points: Vec<(f64, f64)> = chart
        .points
        .iter()
        .filter_map(|point| match point {
            ChartPoint::Xy { x, y } => Some((*x, *y)),
            ChartPoint::Category { .. } => None,
        })
        .collect();

    let mut lines = vec![format!("  {} points", points.len())];
    lines.extend(
        points
            .iter()
            .take(MAX_SCATTER_POINTS)
            .map(|(x, y)| format!("  ({}, {})", format_number(*x), format_number(*y))),
    );
    if points.len() > MAX_SCATTER_POINTS {
        lines.push(format!("  … {} more", points.len() - MAX_SCATTER_POINTS));
    }
    lines
}

fn shorten(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        return label.to_string();
    }
    let mut out: String = label.chars().take(LABEL_WIDTH - 1).collect();
    out.push('…');
    out
}

fn label_width(points: &[(String, f64)]) -> usize {
    points
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
}
