//! CSV export of the currently loaded table page.

use serde_json::Value;

use crate::entities::TablePage;
use crate::errors::CoreError;

/// Serialize the loaded page (not the full dataset) to CSV.
///
/// The header line holds the column headers; each row emits its cells in
/// column order. Cells containing a comma, a double quote or a line break
/// are quoted with inner quotes doubled. Missing or null cells are empty.
///
/// # Errors
///
/// Returns [`CoreError::Csv`] if the writer fails.
pub fn export_page(page: &TablePage) -> Result<String, CoreError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(page.columns.iter().map(|col| col.header.as_str()))?;
    for row in &page.data {
        writer.write_record(
            page.columns
                .iter()
                .map(|col| row.get(&col.field).map(cell_text).unwrap_or_default()),
        )?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| CoreError::Validation(format!("csv flush failed: {error}")))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Default download name: `<uploaded file>.csv`, or `data.csv`.
#[must_use]
pub fn export_file_name(uploaded: Option<&str>) -> String {
    format!("{}.csv", uploaded.filter(|name| !name.is_empty()).unwrap_or("data"))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{TableColumn, TablePage};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page(rows: Vec<Value>) -> TablePage {
        TablePage {
            data: rows
                .into_iter()
                .filter_map(|row| row.as_object().cloned())
                .collect(),
            columns: vec![
                TableColumn { field: "emp".into(), header: "Employee".into() },
                TableColumn { field: "note".into(), header: "Note".into() },
                TableColumn { field: "amount".into(), header: "Amount".into() },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn quotes_commas_and_double_quotes() {
        let csv = export_page(&page(vec![
            json!({"emp": "Rao, K", "note": "said \"ok\"", "amount": 1200.5}),
            json!({"emp": "Iyer", "note": null}),
        ]))
        .unwrap();

        assert_eq!(
            csv,
            "Employee,Note,Amount\n\"Rao, K\",\"said \"\"ok\"\"\",1200.5\nIyer,,"
        );
    }

    #[test]
    fn header_only_for_empty_page() {
        assert_eq!(export_page(&page(Vec::new())).unwrap(), "Employee,Note,Amount");
    }

    #[test]
    fn export_name_falls_back_to_data() {
        assert_eq!(export_file_name(Some("claims.xlsx")), "claims.xlsx.csv");
        assert_eq!(export_file_name(None), "data.csv");
        assert_eq!(export_file_name(Some("")), "data.csv");
    }
}
