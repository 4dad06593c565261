use std::path::Path;

use serde::{Deserialize, Serialize};

/// A file known to the analytics backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

/// Response of `GET /files`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileListing {
    #[serde(default)]
    pub files: Vec<FileInfo>,
}

/// Response of `POST /upload` and `POST /load-file`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadedFile {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub filename: String,
    pub file_type: String,
    #[serde(default)]
    pub rows: u64,
    #[serde(default)]
    pub columns: u64,
}

impl LoadedFile {
    #[must_use]
    pub fn file_info(&self) -> FileInfo {
        FileInfo {
            name: self.filename.clone(),
            file_type: self.file_type.clone(),
            path: String::new(),
        }
    }
}

/// Whether `path` looks like an Excel workbook the analytics backend accepts.
#[must_use]
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx") || ext.eq_ignore_ascii_case("xls"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreadsheet_extensions() {
        assert!(is_spreadsheet(Path::new("PJPA38_claims.xlsx")));
        assert!(is_spreadsheet(Path::new("legacy.XLS")));
        assert!(!is_spreadsheet(Path::new("export.csv")));
    }

    #[test]
    fn file_listing_parses_type_field() {
        let listing: FileListing = serde_json::from_str(
            r#"{"files":[{"name":"a.xlsx","type":"PJPA37","path":"uploads/a.xlsx"}]}"#,
        )
        .unwrap();
        assert_eq!(listing.files[0].file_type, "PJPA37");
    }
}
