//! Data/view state for the analytics backend: files, dashboard, table.

use std::path::Path;

use aja_core::csv_export;
use aja_core::entities::{
    DashboardData, FileInfo, FilterDimension, FilterOptions, FilterValues, LoadedFile, TablePage,
    TableQuery, is_spreadsheet,
};
use aja_core::enums::ViewKind;

use crate::backend::AnalyticsBackend;
use crate::error::StateError;

/// Everything the dashboard and table views show.
///
/// Every fetch sets `loading` while in flight and records a failure's
/// message in `error` before returning it.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsView {
    pub view: ViewKind,
    pub uploaded_file: Option<FileInfo>,
    pub files: Vec<FileInfo>,
    pub dashboard: Option<DashboardData>,
    pub table: Option<TablePage>,
    pub filter_options: FilterOptions,
    pub filters: FilterValues,
    pub query: TableQuery,
    pub loading: bool,
    pub error: Option<String>,
}

impl AnalyticsView {
    /// A view requesting `page_size` rows per table page.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            query: TableQuery::new(page_size),
            ..Self::default()
        }
    }

    fn track<T>(&mut self, result: Result<T, StateError>) -> Result<T, StateError> {
        self.loading = false;
        match result {
            Ok(value) => {
                self.error = None;
                Ok(value)
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// `GET /files`.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    pub async fn refresh_files<B: AnalyticsBackend>(&mut self, backend: &B) -> Result<(), StateError> {
        self.loading = true;
        let result = backend.list_files().await.map_err(StateError::from);
        let files = self.track(result)?;
        self.files = files;
        Ok(())
    }

    /// Upload a workbook, then open its dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NotSpreadsheet`] for non-Excel files, or the
    /// request failure.
    pub async fn upload<B: AnalyticsBackend>(
        &mut self,
        backend: &B,
        path: &Path,
    ) -> Result<LoadedFile, StateError> {
        if !is_spreadsheet(path) {
            return self.track(Err(StateError::NotSpreadsheet));
        }
        self.loading = true;
        let result = backend.upload_file(path).await.map_err(StateError::from);
        let loaded = self.track(result)?;
        self.open(backend, &loaded).await?;
        Ok(loaded)
    }

    /// Make an already uploaded file current, then open its dashboard.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    pub async fn load<B: AnalyticsBackend>(
        &mut self,
        backend: &B,
        filename: &str,
    ) -> Result<LoadedFile, StateError> {
        self.loading = true;
        let result = backend.load_file(filename).await.map_err(StateError::from);
        let loaded = self.track(result)?;
        self.open(backend, &loaded).await?;
        Ok(loaded)
    }

    async fn open<B: AnalyticsBackend>(
        &mut self,
        backend: &B,
        loaded: &LoadedFile,
    ) -> Result<(), StateError> {
        self.uploaded_file = Some(loaded.file_info());
        self.filters.clear();
        self.query = TableQuery::new(self.query.page_size);
        self.table = None;
        self.fetch_dashboard(backend).await?;
        self.fetch_filter_options(backend).await?;
        self.view = ViewKind::Dashboard;
        Ok(())
    }

    /// `POST /dashboard-data` with the current filters.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    pub async fn fetch_dashboard<B: AnalyticsBackend>(&mut self, backend: &B) -> Result<(), StateError> {
        self.loading = true;
        let result = backend.dashboard_data(&self.filters).await.map_err(StateError::from);
        let dashboard = self.track(result)?;
        self.dashboard = Some(dashboard);
        Ok(())
    }

    /// `GET /filter-options`.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    pub async fn fetch_filter_options<B: AnalyticsBackend>(
        &mut self,
        backend: &B,
    ) -> Result<(), StateError> {
        let result = backend.filter_options().await.map_err(StateError::from);
        let options = self.track(result)?;
        self.filter_options = options;
        Ok(())
    }

    /// `POST /table-data` for the current query. Active filters go with it.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    pub async fn fetch_table<B: AnalyticsBackend>(&mut self, backend: &B) -> Result<(), StateError> {
        self.loading = true;
        self.query.filters = self.filters.has_active().then(|| self.filters.clone());
        let result = backend.table_data(&self.query).await.map_err(StateError::from);
        let page = self.track(result)?;
        self.table = Some(page);
        Ok(())
    }

    /// Search from the first page.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    pub async fn search<B: AnalyticsBackend>(&mut self, backend: &B, term: &str) -> Result<(), StateError> {
        self.query.search(term);
        self.fetch_table(backend).await
    }

    /// Sort by `column`, flipping direction when it is already the sort column.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    pub async fn sort<B: AnalyticsBackend>(&mut self, backend: &B, column: &str) -> Result<(), StateError> {
        self.query.sort_by(column);
        self.fetch_table(backend).await
    }

    /// # Errors
    ///
    /// Returns the request failure.
    pub async fn go_to_page<B: AnalyticsBackend>(&mut self, backend: &B, page: u32) -> Result<(), StateError> {
        self.query.go_to(page);
        self.fetch_table(backend).await
    }

    /// Toggle a filter value and reload the dashboard.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    pub async fn toggle_filter<B: AnalyticsBackend>(
        &mut self,
        backend: &B,
        dimension: FilterDimension,
        value: &str,
    ) -> Result<(), StateError> {
        self.filters.toggle(dimension, value);
        self.fetch_dashboard(backend).await
    }

    /// Drop all filters and reload the dashboard.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    pub async fn clear_filters<B: AnalyticsBackend>(&mut self, backend: &B) -> Result<(), StateError> {
        self.filters.clear();
        self.fetch_dashboard(backend).await
    }

    pub const fn set_view(&mut self, view: ViewKind) {
        self.view = view;
    }

    /// CSV of the loaded page and its default file name.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NoTable`] before a page is loaded.
    pub fn export_csv(&self) -> Result<(String, String), StateError> {
        let page = self.table.as_ref().ok_or(StateError::NoTable)?;
        let csv = csv_export::export_page(page)?;
        let name = csv_export::export_file_name(self.uploaded_file.as_ref().map(|f| f.name.as_str()));
        Ok((name, csv))
    }
}
