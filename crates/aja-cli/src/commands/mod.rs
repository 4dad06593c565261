pub mod audit;
pub mod auth;
pub mod dashboard;
pub mod dispatch;
pub mod files;
pub mod filters;
pub mod insight;
pub mod report;
pub mod schema;
pub mod shared;
pub mod table;
pub mod user;
