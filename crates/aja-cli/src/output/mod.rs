use aja_core::chart::{ChartRenderer, ChartSpec};
use aja_core::entities::TablePage;
use aja_core::pagination::pager_line;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod chart;
pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a table page. The table format keeps the backend's column order and
/// ends with a pager line.
pub fn output_page(page: &TablePage, format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(page, format);
    }
    println!("{}", render_page(page, table_options()));
    Ok(())
}

/// Print charts: JSON specs, or text drawings in table format.
pub fn output_charts(charts: &[ChartSpec], format: OutputFormat) -> anyhow::Result<()> {
    if format != OutputFormat::Table {
        return output(&charts, format);
    }
    let drawings = charts
        .iter()
        .map(|spec| chart::TerminalChart::default().render(spec))
        .collect::<Vec<_>>();
    println!("{}", drawings.join("\n\n"));
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_page(page: &TablePage, options: table::TableOptions) -> String {
    if page.is_empty() {
        return String::from("(no rows)");
    }
    let headers = page
        .columns
        .iter()
        .map(|column| column.header.as_str())
        .collect::<Vec<_>>();
    let rows = page
        .data
        .iter()
        .map(|row| {
            page.columns
                .iter()
                .map(|column| row.get(&column.field).map_or_else(String::new, value_to_cell))
                .collect()
        })
        .collect::<Vec<Vec<String>>>();

    format!(
        "{}\n\nPage {} of {} ({} rows)  {}",
        table::render_entity_table(&headers, &rows, options),
        page.page,
        page.total_pages,
        page.total_rows,
        pager_line(page.page, page.total_pages)
    )
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let options = table_options();
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&["key", "value"], &rows, options))
        }
        scalar => Ok(value_to_cell(&scalar)),
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, options);
    }

    // Columns in first-seen order.
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) => items.iter().map(value_to_cell).collect::<Vec<_>>().join(", "),
        other @ Value::Object(_) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use aja_core::entities::TablePage;
    use serde::Serialize;
    use serde_json::json;

    use super::table::TableOptions;
    use super::{render, render_page};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        value: u32,
    }

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&Example { id: "x", value: 7 }, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert_eq!(parsed["value"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&Example { id: "x", value: 7 }, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let out = render(&Example { id: "x", value: 7 }, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("id"));
    }

    #[test]
    fn arrays_render_as_columns() {
        let rows = vec![
            json!({"id": "PJPA27", "required": ["leftEmpFile", "concurFile"]}),
            json!({"id": "PJPA28", "required": ["lineItemFile"]}),
        ];
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.starts_with("id")));
        assert!(out.contains("leftEmpFile, concurFile"));
    }

    #[test]
    fn page_keeps_column_order_and_shows_pager() {
        let page: TablePage = serde_json::from_value(json!({
            "data": [{"Employee": "Rao", "Amount": 1200, "Note": null}],
            "columns": [
                {"field": "Note", "header": "Note"},
                {"field": "Employee", "header": "Employee"},
                {"field": "Amount", "header": "Amount"}
            ],
            "total_rows": 180,
            "page": 5,
            "page_size": 25,
            "total_pages": 8
        }))
        .expect("page should parse");

        let out = render_page(&page, PLAIN);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Note  Employee  Amount");
        assert_eq!(lines.last().copied(), Some("Page 5 of 8 (180 rows)  1 ... 4 [5] 6 ... 8"));
    }

    #[test]
    fn empty_page_has_placeholder() {
        assert_eq!(render_page(&TablePage::default(), PLAIN), "(no rows)");
    }
}
