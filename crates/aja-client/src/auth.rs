//! `POST /login`.

use aja_core::entities::Session;
use aja_core::enums::{Role, UserStatus};
use serde::Deserialize;

use crate::http::decode;
use crate::{AjaClient, ClientError};

/// The audit backend answers with the user object itself; the analytics
/// backend wraps it as `{success, user}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LoginResponse {
    Wrapped {
        success: bool,
        #[serde(default)]
        message: String,
        #[serde(default)]
        user: Option<LoginUser>,
    },
    Flat(LoginUser),
}

#[derive(Deserialize)]
struct LoginUser {
    username: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    status: UserStatus,
}

impl AjaClient {
    /// Log in against the audit backend.
    ///
    /// A response without a role yields a [`Role::Viewer`] session.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] for rejected credentials (401) or an
    /// inactive account (403), and [`ClientError::Parse`] for an unknown
    /// role or malformed body.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        tracing::debug!(username, "logging in");
        let resp = self
            .http
            .post(self.audit_url("/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;

        match decode::<LoginResponse>(resp).await? {
            LoginResponse::Wrapped {
                success: true,
                user: Some(user),
                ..
            }
            | LoginResponse::Flat(user) => into_session(user),
            LoginResponse::Wrapped { message, .. } => Err(ClientError::Api {
                status: 401,
                message: if message.is_empty() {
                    "Invalid credentials".into()
                } else {
                    message
                },
            }),
        }
    }
}

fn into_session(user: LoginUser) -> Result<Session, ClientError> {
    if user.status == UserStatus::Inactive {
        return Err(ClientError::Api {
            status: 403,
            message: "Account is inactive.".into(),
        });
    }
    let role = match user.role.as_deref() {
        None | Some("") => Role::Viewer,
        Some(raw) => raw
            .parse::<Role>()
            .map_err(|e| ClientError::Parse(e.to_string()))?,
    };
    Ok(Session {
        username: user.username,
        role,
        name: user.name,
        id: user.id.map(|id| match id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        }),
    })
}
