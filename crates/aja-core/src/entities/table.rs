use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entities::filters::FilterValues;
use crate::enums::SortDirection;

/// One table row keyed by column field.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableColumn {
    pub field: String,
    pub header: String,
}

/// One server-computed page of the loaded dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TablePage {
    #[serde(default)]
    pub data: Vec<Row>,
    #[serde(default)]
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl TablePage {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Build a page from raw insight rows, using the first row's keys as
    /// columns. Used for results that come back unpaged.
    ///
    /// Columns follow the decoded map's key order, which is sorted.
    #[must_use]
    pub fn from_rows(rows: &[Value]) -> Self {
        let data: Vec<Row> = rows
            .iter()
            .filter_map(|row| row.as_object().cloned())
            .collect();
        let columns = data
            .first()
            .map(|first| {
                first
                    .keys()
                    .map(|key| TableColumn {
                        field: key.clone(),
                        header: key.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let total_rows = data.len() as u64;
        let page_size = u32::try_from(data.len()).unwrap_or(u32::MAX).max(1);
        Self {
            data,
            columns,
            total_rows,
            page: 1,
            page_size,
            total_pages: u32::from(total_rows > 0),
        }
    }
}

const fn first_page() -> u32 {
    1
}

const fn default_page_size() -> u32 {
    25
}

/// Parameters for `POST /table-data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_column: Option<String>,
    pub sort_direction: SortDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterValues>,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self::new(default_page_size())
    }
}

impl TableQuery {
    #[must_use]
    pub const fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            search: None,
            sort_column: None,
            sort_direction: SortDirection::Asc,
            filters: None,
        }
    }

    /// Set the search term and go back to the first page. Blank terms clear
    /// the search.
    pub fn search(&mut self, term: &str) {
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
        self.page = 1;
    }

    /// Sort by `column`: the current column flips direction, a new column
    /// starts ascending.
    pub fn sort_by(&mut self, column: &str) {
        if self.sort_column.as_deref() == Some(column) {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_column = Some(column.to_string());
            self.sort_direction = SortDirection::Asc;
        }
    }

    /// Jump to `page`, clamped to at least 1.
    pub fn go_to(&mut self, page: u32) {
        self.page = page.max(1);
    }
}
