//! Analytics backend: uploaded spreadsheets, dashboards, tables, filters.

use std::path::Path;

use aja_core::entities::{
    DashboardData, FileInfo, FileListing, FilterOptions, FilterValues, LoadedFile, TablePage,
    TableQuery,
};
use reqwest::multipart::{Form, Part};

use crate::http::decode;
use crate::{AjaClient, ClientError};

impl AjaClient {
    /// `GET /files`: spreadsheets already on the analytics backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is malformed.
    pub async fn list_files(&self) -> Result<Vec<FileInfo>, ClientError> {
        tracing::debug!("listing analytics files");
        let resp = self.http.get(self.analytics_url("/files")).send().await?;
        Ok(decode::<FileListing>(resp).await?.files)
    }

    /// `POST /upload` with the workbook as the multipart `file` field.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if the file cannot be read, otherwise the
    /// usual request errors.
    pub async fn upload_file(&self, path: &Path) -> Result<LoadedFile, ClientError> {
        let form = Form::new().part("file", file_part(path).await?);
        tracing::debug!(path = %path.display(), "uploading analytics file");
        let resp = self
            .http
            .post(self.analytics_url("/upload"))
            .multipart(form)
            .send()
            .await?;
        decode(resp).await
    }

    /// `POST /load-file`: make a previously uploaded file current.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] (404) if the backend does not know the file.
    pub async fn load_file(&self, filename: &str) -> Result<LoadedFile, ClientError> {
        tracing::debug!(filename, "loading analytics file");
        let resp = self
            .http
            .post(self.analytics_url("/load-file"))
            .json(&serde_json::json!({ "filename": filename }))
            .send()
            .await?;
        decode(resp).await
    }

    /// `POST /dashboard-data` with the current filter selection.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] (400) when no file is loaded.
    pub async fn dashboard_data(&self, filters: &FilterValues) -> Result<DashboardData, ClientError> {
        tracing::debug!(filtered = filters.has_active(), "fetching dashboard data");
        let resp = self
            .http
            .post(self.analytics_url("/dashboard-data"))
            .json(filters)
            .send()
            .await?;
        decode(resp).await
    }

    /// `POST /table-data` for one page.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] (400) when no file is loaded.
    pub async fn table_data(&self, query: &TableQuery) -> Result<TablePage, ClientError> {
        tracing::debug!(page = query.page, page_size = query.page_size, "fetching table page");
        let resp = self
            .http
            .post(self.analytics_url("/table-data"))
            .json(query)
            .send()
            .await?;
        decode(resp).await
    }

    /// `GET /filter-options`. Empty lists when no file is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is malformed.
    pub async fn filter_options(&self) -> Result<FilterOptions, ClientError> {
        let resp = self
            .http
            .get(self.analytics_url("/filter-options"))
            .send()
            .await?;
        decode(resp).await
    }
}

/// Read a local file into a multipart part named after the file.
pub(crate) async fn file_part(path: &Path) -> Result<Part, ClientError> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(Part::bytes(bytes).file_name(name))
}
