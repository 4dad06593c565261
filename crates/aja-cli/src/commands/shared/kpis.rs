use std::collections::BTreeMap;

use aja_core::chart::ChartSpec;
use aja_core::entities::Kpi;
use aja_core::kpi::format_kpi;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::output::{output, output_charts};

/// A KPI with its display value.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
}

/// Format every KPI, keeping the keys.
pub fn kpi_cards(kpis: &BTreeMap<String, Kpi>) -> BTreeMap<String, KpiCard> {
    kpis.iter()
        .map(|(key, kpi)| {
            let card = KpiCard {
                label: kpi.label.clone(),
                value: format_kpi(kpi),
            };
            (key.clone(), card)
        })
        .collect()
}

/// Table format: a card table followed by the drawn charts.
pub fn print_cards_and_charts(
    cards: BTreeMap<String, KpiCard>,
    charts: &[ChartSpec],
) -> anyhow::Result<()> {
    let cards = cards.into_values().collect::<Vec<_>>();
    output(&cards, OutputFormat::Table)?;
    if !charts.is_empty() {
        println!();
        output_charts(charts, OutputFormat::Table)?;
    }
    Ok(())
}
