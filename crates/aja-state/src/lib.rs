//! # aja-state
//!
//! Client-side state holders for the AJALabs flows:
//!
//! - [`auth::AuthState`]: the logged-in session and role gating
//! - [`analytics::AnalyticsView`]: files, dashboard, filters and table pages
//! - [`workflow::AuditRun`]: the upload → select → process → report machine
//! - [`history::ReportHistory`] / [`history::HistoryStore`]: the capped run log
//! - [`refresh`]: retry, inline re-upload and refresh-all on report rows
//! - [`admin::UserDirectory`]: user management
//!
//! Network access goes through the traits in [`backend`], implemented by
//! `aja_client::AjaClient`.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod backend;
pub mod history;
pub mod refresh;
pub mod store;
pub mod workflow;

mod error;

pub use error::StateError;
