use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::enums::{Role, UserStatus};
use crate::errors::CoreError;

/// A user as listed by the admin endpoints (password never included).
///
/// Stored records may carry `username`, `name` or both, a numeric id, and a
/// role or status in any case. The first non-empty of `username` and `name`
/// wins; a missing role reads as `viewer`.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub status: UserStatus,
}

#[derive(Deserialize)]
struct StoredUser {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl TryFrom<StoredUser> for UserRecord {
    type Error = CoreError;

    fn try_from(stored: StoredUser) -> Result<Self, Self::Error> {
        let username = [stored.username, stored.name]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.trim().is_empty())
            .unwrap_or_default();
        let role = match stored.role.as_deref().map(str::trim) {
            None | Some("") => Role::Viewer,
            Some(raw) => raw.parse()?,
        };
        let status = match stored.status.as_deref() {
            Some(raw) if raw.trim().eq_ignore_ascii_case("inactive") => UserStatus::Inactive,
            _ => UserStatus::Active,
        };
        let id = match stored.id {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(id)) => id,
            Some(other) => other.to_string(),
        };
        Ok(Self {
            id,
            username,
            role,
            status,
        })
    }
}

impl<'de> Deserialize<'de> for UserRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stored = StoredUser::deserialize(deserializer)?;
        Self::try_from(stored).map_err(D::Error::custom)
    }
}

/// Body sent when adding or updating a user.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserDraft {
    pub username: String,
    pub role: Role,
    pub status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserDraft {
    /// A new active viewer, the admin form's starting point.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: Role::Viewer,
            status: UserStatus::Active,
            password: None,
        }
    }
}

impl From<&UserRecord> for UserDraft {
    fn from(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            role: record.role,
            status: record.status,
            password: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_record_accepts_name_alias_and_defaults_status() {
        let user: UserRecord =
            serde_json::from_str(r#"{"id":"2","name":"priya","role":"uploader"}"#).unwrap();
        assert_eq!(user.username, "priya");
        assert_eq!(user.role, Role::Uploader);
        assert_eq!(user.status, UserStatus::Active);
    }

    #[test]
    fn admin_form_records_with_name_and_username_parse() {
        let users: Vec<UserRecord> = serde_json::from_str(
            r#"[
                {"id":"4","name":"","role":"viewer","status":"Active","username":"sam"},
                {"id":7,"name":"Priya","username":"","role":"Admin","status":"inactive"},
                {"name":"legacy"}
            ]"#,
        )
        .unwrap();
        assert_eq!(users[0].username, "sam");
        assert_eq!(users[1].id, "7");
        assert_eq!(users[1].username, "Priya");
        assert_eq!(users[1].role, Role::Admin);
        assert_eq!(users[1].status, UserStatus::Inactive);
        assert_eq!(users[2].id, "");
        assert_eq!(users[2].role, Role::Viewer);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = serde_json::from_str::<UserRecord>(r#"{"username":"x","role":"owner"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown role 'owner'"));
    }

    #[test]
    fn draft_omits_absent_password() {
        let json = serde_json::to_value(UserDraft::new("sam")).unwrap();
        assert_eq!(json["role"], "viewer");
        assert_eq!(json["status"], "Active");
        assert!(json.get("password").is_none());
    }
}
