//! Audit endpoints (login, insights, users) against an in-process mock.

mod common;

use aja_client::ClientError;
use aja_core::catalog::FileSlot;
use aja_core::entities::UserDraft;
use aja_core::enums::{Role, UserStatus};
use common::{MockBackend, Route};
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn login_returns_session() {
    let mock = MockBackend::start(vec![Route::json(
        "POST",
        "/login",
        200,
        json!({"id": "1", "username": "admin", "role": "admin", "status": "Active"}),
    )]);

    let session = mock.client().login("admin", "password123").await.unwrap();
    assert_eq!(session.role, Role::Admin);

    let body: serde_json::Value =
        serde_json::from_str(&mock.requests_to("/login")[0].body).unwrap();
    assert_eq!(body, json!({"username": "admin", "password": "password123"}));
}

#[tokio::test]
async fn bad_credentials_carry_backend_message() {
    let mock = MockBackend::start(vec![Route::json(
        "POST",
        "/login",
        401,
        json!({"message": "Invalid username or password"}),
    )]);

    let err = mock.client().login("admin", "nope").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Api { status: 401, ref message } if message == "Invalid username or password"
    ));
}

#[tokio::test]
async fn upload_sources_uses_slot_keys() {
    let mock = MockBackend::start(vec![Route::json(
        "POST",
        "/api/upload",
        200,
        json!({"status": "success", "message": "Files uploaded successfully!"}),
    )]);
    let dir = tempfile::tempdir().unwrap();
    let concur = dir.path().join("header.csv");
    let left = dir.path().join("left.xlsx");
    std::fs::write(&concur, "Report ID,Amount\nR1,10\n").unwrap();
    std::fs::write(&left, b"xlsx").unwrap();

    mock.client()
        .upload_sources(&[(FileSlot::ConcurFile, concur), (FileSlot::LeftEmpFile, left)])
        .await
        .unwrap();

    let body = &mock.requests_to("/api/upload")[0].body;
    assert!(body.contains(r#"name="concurFile""#));
    assert!(body.contains(r#"name="leftEmpFile""#));
    assert!(body.contains("R1,10"));
}

#[tokio::test]
async fn generate_batches_ids() {
    let mock = MockBackend::start(vec![Route::json(
        "POST",
        "/api/generate",
        200,
        json!({"status": "success", "message": "Generation complete."}),
    )]);

    mock.client().generate(&["PJPA28", "PJPA30"]).await.unwrap();

    let body: serde_json::Value =
        serde_json::from_str(&mock.requests_to("/api/generate")[0].body).unwrap();
    assert_eq!(body, json!({"insights": ["PJPA28", "PJPA30"]}));
}

#[tokio::test]
async fn insight_data_unwraps_envelope_and_arrays() {
    let mock = MockBackend::start(vec![
        Route::json(
            "GET",
            "/api/insight/PJPA27/data",
            200,
            json!({"status": "success", "insight_id": "PJPA27", "data": [{"Employee ID": "E1"}, {"Employee ID": "E2"}]}),
        ),
        Route::json("GET", "/api/insight/PJPA28/data", 200, json!([{"Digit": 1}])),
        Route::json("GET", "/api/insight/PJPA29/data", 200, json!("not rows")),
    ]);
    let client = mock.client();

    assert_eq!(client.insight_data("PJPA27").await.unwrap().len(), 2);
    assert_eq!(client.insight_data("PJPA28").await.unwrap().len(), 1);
    assert!(matches!(
        client.insight_data("PJPA29").await,
        Err(ClientError::Parse(_))
    ));
}

#[tokio::test]
async fn insight_data_not_generated_yet() {
    let mock = MockBackend::start(vec![Route::json(
        "GET",
        "/api/insight/PJPA35/data",
        404,
        json!({"status": "error", "message": "Data not generated yet. Please upload master data first."}),
    )]);
    let err = mock.client().insight_data("PJPA35").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn download_reads_bytes() {
    let mut route = Route::json("GET", "/api/insight/PJPA27/download", 200, json!(null));
    route.body = "PK-workbook".into();
    route.content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
    let mock = MockBackend::start(vec![route]);

    let download = mock.client().download_insight("PJPA27").await.unwrap();
    assert_eq!(download.bytes, b"PK-workbook");
}

#[tokio::test]
async fn user_crud_hits_rest_paths() {
    let mock = MockBackend::start(vec![
        Route::json(
            "GET",
            "/get_users",
            200,
            json!([
                {"id": "1", "username": "admin", "role": "admin", "status": "Active"},
                {"id": "4", "username": "viewer", "role": "viewer", "status": "Inactive"},
                {"id": 9, "name": "", "username": "sam", "role": "Uploader", "status": "Active"}
            ]),
        ),
        Route::json("POST", "/add_user", 201, json!({"message": "User added"})),
        Route::json("PUT", "/update_user/4", 200, json!({"message": "User updated"})),
        Route::json("DELETE", "/delete_user/4", 200, json!({"message": "User deleted successfully"})),
    ]);
    let client = mock.client();

    let users = client.list_users().await.unwrap();
    assert_eq!(users[1].status, UserStatus::Inactive);
    assert_eq!(users[2].id, "9");
    assert_eq!(users[2].username, "sam");
    assert_eq!(users[2].role, Role::Uploader);

    let mut draft = UserDraft::new("priya");
    draft.role = Role::Reviewer;
    draft.password = Some("s3cret".into());
    client.add_user(&draft).await.unwrap();
    client.update_user("4", &UserDraft::from(&users[1])).await.unwrap();
    client.delete_user("4").await.unwrap();

    let added: serde_json::Value =
        serde_json::from_str(&mock.requests_to("/add_user")[0].body).unwrap();
    assert_eq!(
        added,
        json!({"username": "priya", "role": "reviewer", "status": "Active", "password": "s3cret"})
    );
    assert_eq!(mock.requests_to("/update_user/4")[0].method, "PUT");
    assert_eq!(mock.requests_to("/delete_user/4")[0].method, "DELETE");
}

#[tokio::test]
async fn update_unknown_user_is_404() {
    let mock = MockBackend::start(vec![Route::json(
        "PUT",
        "/update_user/99",
        404,
        json!({"message": "User not found"}),
    )]);
    let err = mock
        .client()
        .update_user("99", &UserDraft::new("ghost"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "API error (404): User not found");
}
