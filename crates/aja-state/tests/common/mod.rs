//! In-memory backends that record calls.

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use aja_client::ClientError;
use aja_core::catalog::FileSlot;
use aja_core::entities::{
    DashboardData, FileInfo, FilterOptions, FilterValues, LoadedFile, TablePage, TableQuery,
    UserDraft, UserRecord,
};
use aja_core::enums::{ReportStatus, Role, UserStatus};
use aja_state::backend::{AnalyticsBackend, InsightBackend, UserBackend};
use aja_state::history::ReportHistory;
use serde_json::{Value, json};

fn server_error(message: &str) -> ClientError {
    ClientError::Api {
        status: 500,
        message: message.to_string(),
    }
}

#[derive(Default)]
pub struct FakeInsights {
    pub fail_upload: bool,
    pub fail_generate: bool,
    pub failing_data: HashSet<&'static str>,
    pub calls: Mutex<Vec<String>>,
    /// When set, each `generate` call snapshots the statuses in this history.
    pub observer: Option<Arc<tokio::sync::Mutex<ReportHistory>>>,
    pub observed: Mutex<Vec<Vec<ReportStatus>>>,
}

impl FakeInsights {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl InsightBackend for FakeInsights {
    async fn upload_sources(&self, files: &[(FileSlot, PathBuf)]) -> Result<(), ClientError> {
        let keys: Vec<_> = files.iter().map(|(slot, _)| slot.key()).collect();
        self.record(format!("upload {}", keys.join(",")));
        if self.fail_upload {
            return Err(server_error("No files provided."));
        }
        Ok(())
    }

    async fn generate(&self, insight_ids: &[&str]) -> Result<(), ClientError> {
        self.record(format!("generate {}", insight_ids.join(",")));
        if let Some(history) = &self.observer {
            let statuses = history
                .lock()
                .await
                .entries()
                .iter()
                .map(|entry| entry.status)
                .collect();
            self.observed.lock().unwrap().push(statuses);
        }
        if self.fail_generate {
            return Err(server_error("generation crashed"));
        }
        Ok(())
    }

    async fn insight_data(&self, insight_id: &str) -> Result<Vec<Value>, ClientError> {
        self.record(format!("data {insight_id}"));
        if self.failing_data.contains(insight_id) {
            return Err(ClientError::Parse("expected rows".into()));
        }
        Ok(vec![json!({"insight": insight_id, "Amount Approved": 100})])
    }
}

#[derive(Default)]
pub struct FakeAnalytics {
    pub fail_dashboard: bool,
    pub calls: Mutex<Vec<String>>,
    pub last_query: Mutex<Option<TableQuery>>,
    pub last_filters: Mutex<Option<FilterValues>>,
}

impl FakeAnalytics {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

fn loaded(filename: &str) -> LoadedFile {
    LoadedFile {
        success: true,
        message: "File loaded successfully".into(),
        filename: filename.to_string(),
        file_type: "PJPA37".into(),
        rows: 40,
        columns: 6,
    }
}

impl AnalyticsBackend for FakeAnalytics {
    async fn list_files(&self) -> Result<Vec<FileInfo>, ClientError> {
        self.record("files");
        Ok(vec![FileInfo {
            name: "PJPA37_claims.xlsx".into(),
            file_type: "PJPA37".into(),
            path: "uploads/PJPA37_claims.xlsx".into(),
        }])
    }

    async fn upload_file(&self, path: &Path) -> Result<LoadedFile, ClientError> {
        self.record("upload");
        Ok(loaded(&path.file_name().unwrap().to_string_lossy()))
    }

    async fn load_file(&self, filename: &str) -> Result<LoadedFile, ClientError> {
        self.record("load-file");
        if filename == "missing.xlsx" {
            return Err(ClientError::Api {
                status: 404,
                message: "File not found".into(),
            });
        }
        Ok(loaded(filename))
    }

    async fn dashboard_data(&self, filters: &FilterValues) -> Result<DashboardData, ClientError> {
        self.record("dashboard-data");
        *self.last_filters.lock().unwrap() = Some(filters.clone());
        if self.fail_dashboard {
            return Err(ClientError::Api {
                status: 400,
                message: "No file loaded".into(),
            });
        }
        Ok(DashboardData {
            file_type: Some("PJPA37".into()),
            total_rows: 40,
            ..Default::default()
        })
    }

    async fn table_data(&self, query: &TableQuery) -> Result<TablePage, ClientError> {
        self.record("table-data");
        *self.last_query.lock().unwrap() = Some(query.clone());
        Ok(serde_json::from_value(json!({
            "data": [{"Employee": "Rao, K", "Amount": 1200}],
            "columns": [{"field": "Employee", "header": "Employee"}, {"field": "Amount", "header": "Amount"}],
            "total_rows": 40,
            "page": query.page,
            "page_size": query.page_size,
            "total_pages": 2
        }))
        .unwrap())
    }

    async fn filter_options(&self) -> Result<FilterOptions, ClientError> {
        self.record("filter-options");
        Ok(FilterOptions {
            department: vec!["Finance".into(), "Sales".into()],
            ..Default::default()
        })
    }
}

#[derive(Default)]
pub struct FakeUsers {
    pub users: Mutex<Vec<UserRecord>>,
}

impl FakeUsers {
    pub fn seeded() -> Self {
        let users = [
            ("1", "admin", Role::Admin),
            ("2", "uploader", Role::Uploader),
            ("3", "reviewer", Role::Reviewer),
            ("4", "viewer", Role::Viewer),
        ]
        .into_iter()
        .map(|(id, username, role)| UserRecord {
            id: id.into(),
            username: username.into(),
            role,
            status: UserStatus::Active,
        })
        .collect();
        Self {
            users: Mutex::new(users),
        }
    }

    /// Users as stored by the backend, decoded the way `GET /get_users` is.
    pub fn from_stored(records: Value) -> Self {
        Self {
            users: Mutex::new(serde_json::from_value(records).unwrap()),
        }
    }
}

impl UserBackend for FakeUsers {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ClientError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn add_user(&self, draft: &UserDraft) -> Result<(), ClientError> {
        let mut users = self.users.lock().unwrap();
        let id = (users.len() + 1).to_string();
        users.push(UserRecord {
            id,
            username: draft.username.clone(),
            role: draft.role,
            status: draft.status,
        });
        Ok(())
    }

    async fn update_user(&self, id: &str, draft: &UserDraft) -> Result<(), ClientError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| ClientError::Api {
                status: 404,
                message: "User not found".into(),
            })?;
        user.username.clone_from(&draft.username);
        user.role = draft.role;
        user.status = draft.status;
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<(), ClientError> {
        self.users.lock().unwrap().retain(|user| user.id != id);
        Ok(())
    }
}
