//! User management on the audit backend.

use aja_core::entities::{UserDraft, UserRecord};

use crate::http::{check_response, decode};
use crate::{AjaClient, ClientError};

impl AjaClient {
    /// `GET /get_users`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the body is malformed.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, ClientError> {
        let resp = self.http.get(self.audit_url("/get_users")).send().await?;
        decode(resp).await
    }

    /// `POST /add_user`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] if the backend rejects the user.
    pub async fn add_user(&self, draft: &UserDraft) -> Result<(), ClientError> {
        tracing::debug!(username = %draft.username, role = %draft.role, "adding user");
        let resp = self
            .http
            .post(self.audit_url("/add_user"))
            .json(draft)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    /// `PUT /update_user/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] (404) for an unknown id.
    pub async fn update_user(&self, id: &str, draft: &UserDraft) -> Result<(), ClientError> {
        tracing::debug!(id, "updating user");
        let url = self.audit_url(&format!("/update_user/{}", urlencoding::encode(id)));
        check_response(self.http.put(&url).json(draft).send().await?).await?;
        Ok(())
    }

    /// `DELETE /delete_user/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn delete_user(&self, id: &str) -> Result<(), ClientError> {
        tracing::debug!(id, "deleting user");
        let url = self.audit_url(&format!("/delete_user/{}", urlencoding::encode(id)));
        check_response(self.http.delete(&url).send().await?).await?;
        Ok(())
    }
}
