//! # aja-client
//!
//! HTTP client for the two AJALabs backends.
//!
//! - The **audit** backend handles login, source-file upload, insight
//!   generation and results (`/api/*`), and user management.
//! - The **analytics** backend serves uploaded spreadsheets as dashboards,
//!   paged tables and filter options.
//!
//! Every method maps non-success responses to [`ClientError::Api`] using the
//! backend's error message. The client does not retry.

mod analytics;
mod auth;
mod error;
mod http;
mod insights;
mod users;

pub use error::ClientError;
pub use insights::{InsightDownload, RemoteInsight};

use std::time::Duration;

use aja_config::ApiConfig;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("aja/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the audit and analytics backends.
#[derive(Debug, Clone)]
pub struct AjaClient {
    http: reqwest::Client,
    audit_base: String,
    analytics_base: String,
}

impl AjaClient {
    /// Create a client for the configured backends.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(api: &ApiConfig) -> Self {
        Self::with_urls(
            api.audit_base(),
            api.analytics_base(),
            Duration::from_secs(api.timeout_secs),
        )
    }

    /// Create a client for explicit base URLs.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn with_urls(audit_base: &str, analytics_base: &str, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(timeout)
                .build()
                .expect("reqwest client should build"),
            audit_base: audit_base.trim_end_matches('/').to_string(),
            analytics_base: analytics_base.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn audit_base(&self) -> &str {
        &self.audit_base
    }

    #[must_use]
    pub fn analytics_base(&self) -> &str {
        &self.analytics_base
    }

    fn audit_url(&self, path: &str) -> String {
        format!("{}{path}", self.audit_base)
    }

    fn analytics_url(&self, path: &str) -> String {
        format!("{}{path}", self.analytics_base)
    }
}
