//! Backend endpoint configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_audit_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_analytics_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Audit backend: login, `/api/*` insight endpoints, user management.
    #[serde(default = "default_audit_url")]
    pub audit_url: String,

    /// Analytics backend: file listing/upload, dashboard, table, filters.
    #[serde(default = "default_analytics_url")]
    pub analytics_url: String,

    /// Per-request timeout in seconds. Insight generation can be slow.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            audit_url: default_audit_url(),
            analytics_url: default_analytics_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Both base URLs are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.audit_url.trim().is_empty() && !self.analytics_url.trim().is_empty()
    }

    /// Audit base URL without a trailing slash.
    #[must_use]
    pub fn audit_base(&self) -> &str {
        self.audit_url.trim().trim_end_matches('/')
    }

    /// Analytics base URL without a trailing slash.
    #[must_use]
    pub fn analytics_base(&self) -> &str {
        self.analytics_url.trim().trim_end_matches('/')
    }

    /// Reject empty or non-HTTP URLs and a zero timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when a URL is blank and
    /// [`ConfigError::InvalidValue`] for a bad scheme or zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "api".into(),
            });
        }
        for (field, url) in [
            ("api.audit_url", self.audit_base()),
            ("api.analytics_url", self.analytics_base()),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: format!("expected an http(s) URL, got '{url}'"),
                });
            }
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backends() {
        let config = ApiConfig::default();
        assert!(config.is_configured());
        assert_eq!(config.audit_base(), "http://localhost:5000");
        assert_eq!(config.analytics_base(), "http://localhost:8000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig {
            audit_url: "https://audit.example.com/".into(),
            ..Default::default()
        };
        assert_eq!(config.audit_base(), "https://audit.example.com");
    }

    #[test]
    fn rejects_bad_scheme_and_zero_timeout() {
        let config = ApiConfig {
            analytics_url: "ftp://files".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "api.analytics_url"
        ));

        let config = ApiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ApiConfig {
            audit_url: " ".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }
}
