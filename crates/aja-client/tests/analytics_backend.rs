//! Analytics endpoints against an in-process mock backend.

mod common;

use aja_client::ClientError;
use aja_core::entities::{FilterDimension, FilterValues, TableQuery};
use common::{MockBackend, Route};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn lists_files() {
    let mock = MockBackend::start(vec![Route::json(
        "GET",
        "/files",
        200,
        json!({"files": [{"name": "PJPA37_claims.xlsx", "type": "PJPA37", "path": "uploads/PJPA37_claims.xlsx"}]}),
    )]);

    let files = mock.client().list_files().await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_type, "PJPA37");
}

#[tokio::test]
async fn upload_sends_multipart_file_field() {
    let mock = MockBackend::start(vec![Route::json(
        "POST",
        "/upload",
        200,
        json!({"success": true, "message": "File uploaded successfully", "filename": "PJPA38_trips.xlsx", "file_type": "PJPA38", "rows": 120, "columns": 14}),
    )]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("PJPA38_trips.xlsx");
    std::fs::write(&path, b"fake workbook").unwrap();

    let loaded = mock.client().upload_file(&path).await.unwrap();
    assert_eq!(loaded.rows, 120);

    let sent = &mock.requests_to("/upload")[0];
    assert!(sent.content_type.starts_with("multipart/form-data"));
    assert!(sent.body.contains(r#"name="file""#));
    assert!(sent.body.contains(r#"filename="PJPA38_trips.xlsx""#));
    assert!(sent.body.contains("fake workbook"));
}

#[tokio::test]
async fn load_file_reports_detail_on_404() {
    let mock = MockBackend::start(vec![Route::json(
        "POST",
        "/load-file",
        404,
        json!({"detail": "File not found"}),
    )]);

    let err = mock.client().load_file("missing.xlsx").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Api { status: 404, ref message } if message == "File not found"
    ));
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&mock.requests_to("/load-file")[0].body).unwrap(),
        json!({"filename": "missing.xlsx"})
    );
}

#[tokio::test]
async fn dashboard_posts_filter_selection() {
    let mock = MockBackend::start(vec![Route::json(
        "POST",
        "/dashboard-data",
        200,
        json!({"filename": "a.xlsx", "file_type": "PJPA37", "total_rows": 3, "kpis": {}, "charts": {}}),
    )]);
    let mut filters = FilterValues::default();
    filters.toggle(FilterDimension::Department, "Finance");

    let data = mock.client().dashboard_data(&filters).await.unwrap();
    assert_eq!(data.total_rows, 3);

    let body: serde_json::Value =
        serde_json::from_str(&mock.requests_to("/dashboard-data")[0].body).unwrap();
    assert_eq!(body["department"], json!(["Finance"]));
}

#[tokio::test]
async fn table_page_round_trip() {
    let mock = MockBackend::start(vec![Route::json(
        "POST",
        "/table-data",
        200,
        json!({
            "data": [{"Employee ID": "E7"}],
            "columns": [{"field": "Employee ID", "header": "Employee ID"}],
            "total_rows": 26, "page": 2, "page_size": 25, "total_pages": 2
        }),
    )]);
    let mut query = TableQuery::default();
    query.go_to(2);
    query.sort_by("Employee ID");

    let page = mock.client().table_data(&query).await.unwrap();
    assert_eq!(page.page, 2);

    let body: serde_json::Value =
        serde_json::from_str(&mock.requests_to("/table-data")[0].body).unwrap();
    assert_eq!(body["page"], 2);
    assert_eq!(body["sort_column"], "Employee ID");
    assert_eq!(body["sort_direction"], "asc");
}

#[tokio::test]
async fn no_file_loaded_surfaces_as_api_error() {
    let mock = MockBackend::start(vec![Route::json(
        "POST",
        "/table-data",
        400,
        json!({"detail": "No file loaded"}),
    )]);
    let err = mock.client().table_data(&TableQuery::default()).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "API error (400): No file loaded");
}
