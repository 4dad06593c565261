//! Entity structs exchanged with the backends or persisted by the client.

mod dashboard;
mod files;
mod filters;
mod report;
mod session;
mod table;
mod user;

pub use dashboard::{ChartPoint, DashboardData, Kpi};
pub use files::{FileInfo, FileListing, LoadedFile, is_spreadsheet};
pub use filters::{AmountRange, DateRange, FilterDimension, FilterOptions, FilterValues};
pub use report::{InsightPayload, ReportEntry};
pub use session::Session;
pub use table::{Row, TableColumn, TablePage, TableQuery};
pub use user::{UserDraft, UserRecord};
