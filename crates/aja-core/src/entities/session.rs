use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Capability, Role};

/// The logged-in user. Created on login, cleared on logout; no expiry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
            name: None,
            id: None,
        }
    }

    #[must_use]
    pub const fn allows(&self, capability: Capability) -> bool {
        self.role.allows(capability)
    }

    /// Display name when the backend sent one, username otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}
