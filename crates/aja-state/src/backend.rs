//! Backend seams used by the state holders.
//!
//! [`AjaClient`] implements every trait; tests substitute in-memory fakes.

use std::future::Future;
use std::path::{Path, PathBuf};

use aja_client::{AjaClient, ClientError};
use aja_core::catalog::FileSlot;
use aja_core::entities::{
    DashboardData, FileInfo, FilterOptions, FilterValues, LoadedFile, TablePage, TableQuery,
    UserDraft, UserRecord,
};
use serde_json::Value;

/// Audit backend operations behind the insight workflow.
pub trait InsightBackend: Sync {
    fn upload_sources(
        &self,
        files: &[(FileSlot, PathBuf)],
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn generate(&self, insight_ids: &[&str]) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn insight_data(
        &self,
        insight_id: &str,
    ) -> impl Future<Output = Result<Vec<Value>, ClientError>> + Send;
}

/// Analytics backend operations behind the dashboard and table views.
pub trait AnalyticsBackend: Sync {
    fn list_files(&self) -> impl Future<Output = Result<Vec<FileInfo>, ClientError>> + Send;

    fn upload_file(&self, path: &Path)
    -> impl Future<Output = Result<LoadedFile, ClientError>> + Send;

    fn load_file(&self, filename: &str)
    -> impl Future<Output = Result<LoadedFile, ClientError>> + Send;

    fn dashboard_data(
        &self,
        filters: &FilterValues,
    ) -> impl Future<Output = Result<DashboardData, ClientError>> + Send;

    fn table_data(
        &self,
        query: &TableQuery,
    ) -> impl Future<Output = Result<TablePage, ClientError>> + Send;

    fn filter_options(&self) -> impl Future<Output = Result<FilterOptions, ClientError>> + Send;
}

/// User management operations.
pub trait UserBackend: Sync {
    fn list_users(&self) -> impl Future<Output = Result<Vec<UserRecord>, ClientError>> + Send;

    fn add_user(&self, draft: &UserDraft) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn update_user(
        &self,
        id: &str,
        draft: &UserDraft,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn delete_user(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;
}

impl InsightBackend for AjaClient {
    fn upload_sources(
        &self,
        files: &[(FileSlot, PathBuf)],
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        Self::upload_sources(self, files)
    }

    fn generate(&self, insight_ids: &[&str]) -> impl Future<Output = Result<(), ClientError>> + Send {
        Self::generate(self, insight_ids)
    }

    fn insight_data(
        &self,
        insight_id: &str,
    ) -> impl Future<Output = Result<Vec<Value>, ClientError>> + Send {
        Self::insight_data(self, insight_id)
    }
}

impl AnalyticsBackend for AjaClient {
    fn list_files(&self) -> impl Future<Output = Result<Vec<FileInfo>, ClientError>> + Send {
        Self::list_files(self)
    }

    fn upload_file(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<LoadedFile, ClientError>> + Send {
        Self::upload_file(self, path)
    }

    fn load_file(
        &self,
        filename: &str,
    ) -> impl Future<Output = Result<LoadedFile, ClientError>> + Send {
        Self::load_file(self, filename)
    }

    fn dashboard_data(
        &self,
        filters: &FilterValues,
    ) -> impl Future<Output = Result<DashboardData, ClientError>> + Send {
        Self::dashboard_data(self, filters)
    }

    fn table_data(
        &self,
        query: &TableQuery,
    ) -> impl Future<Output = Result<TablePage, ClientError>> + Send {
        Self::table_data(self, query)
    }

    fn filter_options(&self) -> impl Future<Output = Result<FilterOptions, ClientError>> + Send {
        Self::filter_options(self)
    }
}

impl UserBackend for AjaClient {
    fn list_users(&self) -> impl Future<Output = Result<Vec<UserRecord>, ClientError>> + Send {
        Self::list_users(self)
    }

    fn add_user(&self, draft: &UserDraft) -> impl Future<Output = Result<(), ClientError>> + Send {
        Self::add_user(self, draft)
    }

    fn update_user(
        &self,
        id: &str,
        draft: &UserDraft,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        Self::update_user(self, id, draft)
    }

    fn delete_user(&self, id: &str) -> impl Future<Output = Result<(), ClientError>> + Send {
        Self::delete_user(self, id)
    }
}
