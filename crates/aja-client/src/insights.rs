//! Audit backend insight endpoints (`/api/*`).

use std::path::PathBuf;

use aja_core::catalog::FileSlot;
use aja_core::entities::InsightPayload;
use reqwest::multipart::Form;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analytics::file_part;
use crate::http::{check_response, decode};
use crate::{AjaClient, ClientError};

/// An insight the audit backend reports as available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteInsight {
    pub id: String,
    /// Generated workbook name.
    pub name: String,
}

/// A generated workbook fetched from `/api/insight/:id/download`.
#[derive(Debug, Clone)]
pub struct InsightDownload {
    /// Name from `Content-Disposition`, if the backend sent one.
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl AjaClient {
    /// `POST /api/upload`: every attached source file in one multipart
    /// request, each under its slot key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Io`] if a file cannot be read, or
    /// [`ClientError::Api`] when the backend rejects the upload.
    pub async fn upload_sources(&self, files: &[(FileSlot, PathBuf)]) -> Result<(), ClientError> {
        let mut form = Form::new();
        for (slot, path) in files {
            form = form.part(slot.key(), file_part(path).await?);
        }
        tracing::debug!(count = files.len(), "uploading audit source files");
        let resp = self
            .http
            .post(self.audit_url("/api/upload"))
            .multipart(form)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    /// `POST /api/generate {insights: [...]}`: run checks on the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when generation fails.
    pub async fn generate(&self, insight_ids: &[&str]) -> Result<(), ClientError> {
        tracing::debug!(?insight_ids, "generating insights");
        let resp = self
            .http
            .post(self.audit_url("/api/generate"))
            .json(&serde_json::json!({ "insights": insight_ids }))
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    /// `GET /api/insight/:id/data`: result rows of a generated insight.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] (404) when the insight has not been
    /// generated and [`ClientError::Parse`] when the body is neither a row
    /// array nor a `{data: [...]}` envelope.
    pub async fn insight_data(&self, insight_id: &str) -> Result<Vec<Value>, ClientError> {
        let url = self.audit_url(&format!(
            "/api/insight/{}/data",
            urlencoding::encode(insight_id)
        ));
        let resp = self.http.get(&url).send().await?;
        Ok(decode::<InsightPayload>(resp).await?.into_rows())
    }

    /// `GET /api/insight/:id/download`: the generated workbook.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] (404) when the workbook does not exist.
    pub async fn download_insight(&self, insight_id: &str) -> Result<InsightDownload, ClientError> {
        let url = self.audit_url(&format!(
            "/api/insight/{}/download",
            urlencoding::encode(insight_id)
        ));
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let file_name = resp
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_name);
        let bytes = resp.bytes().await?.to_vec();
        Ok(InsightDownload { file_name, bytes })
    }

    /// `GET /api/insights`: insights the backend can serve.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is malformed.
    pub async fn remote_insights(&self) -> Result<Vec<RemoteInsight>, ClientError> {
        let resp = self.http.get(self.audit_url("/api/insights")).send().await?;
        decode(resp).await
    }
}

/// File name from an `attachment; filename=...` header value.
fn attachment_name(disposition: &str) -> Option<String> {
    disposition
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_name_strips_quotes() {
        assert_eq!(
            attachment_name(r#"attachment; filename="PJPA27_Generated.xlsx""#).as_deref(),
            Some("PJPA27_Generated.xlsx")
        );
        assert_eq!(
            attachment_name("attachment; filename=report.xlsx").as_deref(),
            Some("report.xlsx")
        );
        assert_eq!(attachment_name("inline"), None);
    }
}
