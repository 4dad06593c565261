//! KPI value formatting and client-side amount aggregation.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::Value;

use crate::entities::{ChartPoint, Kpi};

/// Column summed by [`aggregate`] for insight result dashboards.
pub const AMOUNT_FIELD: &str = "Amount Approved";

/// Column counted distinct for the employee KPI.
pub const EMPLOYEE_FIELD: &str = "Employee ID";

/// Column holding `CRITICAL` / `HIGH` / ... per result row.
pub const RISK_FIELD: &str = "Risk Category";

/// Category used when a row has no value for the grouping field.
pub const MISSING_CATEGORY: &str = "N/A";

const CURRENCY_PREFIX: &str = "₹";

/// Format a KPI card value.
///
/// Currency values get a `₹` prefix, percentages one decimal and a `%`
/// suffix; everything else is abbreviated with `K`/`M`.
#[must_use]
pub fn format_kpi(kpi: &Kpi) -> String {
    if kpi.is_currency {
        format!("{CURRENCY_PREFIX}{}", format_number(kpi.value))
    } else if kpi.is_percentage {
        format!("{:.1}%", kpi.value)
    } else {
        format_number(kpi.value)
    }
}

/// `1.2M`, `12.5K`, or the value rounded to a whole number.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        let rounded = value.round();
        // Avoid printing "-0" for small negatives.
        format!("{}", if rounded == 0.0 { 0.0 } else { rounded })
    }
}

/// Sum [`AMOUNT_FIELD`] per distinct value of `field`, in first-seen order.
///
/// Amounts may arrive as numbers or as strings with thousands separators;
/// anything unparseable counts as zero.
#[must_use]
pub fn aggregate(rows: &[Value], field: &str) -> Vec<ChartPoint> {
    aggregate_by(rows, field, AMOUNT_FIELD)
}

/// Like [`aggregate`] with an explicit amount column.
#[must_use]
pub fn aggregate_by(rows: &[Value], field: &str, amount_field: &str) -> Vec<ChartPoint> {
    let mut order: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let category = category_of(row.get(field));
        let amount = row.get(amount_field).map_or(0.0, parse_amount);
        match index.get(&category) {
            Some(&i) => order[i].1 += amount,
            None => {
                index.insert(category.clone(), order.len());
                order.push((category, amount));
            }
        }
    }

    order
        .into_iter()
        .map(|(category, value)| ChartPoint::category(category, value))
        .collect()
}

/// KPI cards for insight result rows.
///
/// Rows without an employee id count as one distinct employee. Risk spend
/// sums approved amounts of `CRITICAL` and `HIGH` rows.
#[must_use]
pub fn result_kpis(rows: &[Value]) -> BTreeMap<String, Kpi> {
    let employees = rows
        .iter()
        .map(|row| row.get(EMPLOYEE_FIELD).map(Value::to_string))
        .collect::<HashSet<_>>()
        .len();

    let (mut critical, mut high) = (0_usize, 0_usize);
    let (mut approved, mut risk_spend) = (0.0, 0.0);
    for row in rows {
        let amount = row.get(AMOUNT_FIELD).map_or(0.0, parse_amount);
        approved += amount;
        match row.get(RISK_FIELD).and_then(Value::as_str) {
            Some("CRITICAL") => {
                critical += 1;
                risk_spend += amount;
            }
            Some("HIGH") => {
                high += 1;
                risk_spend += amount;
            }
            _ => {}
        }
    }
    let avg_spend = if employees == 0 {
        0.0
    } else {
        approved / as_value(employees)
    };

    [
        ("employees", "Employee", as_value(employees), false),
        ("critical_risks", "Critical Risks", as_value(critical), false),
        ("high_risks", "High Risks", as_value(high), false),
        ("avg_spend", "Avg Spend", avg_spend, true),
        ("risk_spend", "Risk Spend", risk_spend, true),
        ("approved", "Approved", approved, true),
    ]
    .into_iter()
    .map(|(key, label, value, is_currency)| {
        let kpi = Kpi {
            value,
            label: label.to_string(),
            is_currency,
            is_percentage: false,
        };
        (key.to_string(), kpi)
    })
    .collect()
}

fn as_value(count: usize) -> f64 {
    f64::from(u32::try_from(count).unwrap_or(u32::MAX))
}

fn category_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => MISSING_CATEGORY.to_string(),
    }
}

fn parse_amount(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.replace(',', "").trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}
