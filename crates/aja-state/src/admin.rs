//! Admin user management.

use aja_core::entities::{UserDraft, UserRecord};
use aja_core::enums::Role;
use aja_core::errors::CoreError;

use crate::backend::UserBackend;
use crate::error::StateError;

/// Users as last listed, with an optional role tab.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<UserRecord>,
    tab: Option<Role>,
}

impl UserDirectory {
    #[must_use]
    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    /// Show only `role`, or everyone with `None`.
    pub const fn set_tab(&mut self, tab: Option<Role>) {
        self.tab = tab;
    }

    /// Users on the current tab.
    #[must_use]
    pub fn visible(&self) -> Vec<&UserRecord> {
        self.users
            .iter()
            .filter(|user| self.tab.is_none_or(|role| user.role == role))
            .collect()
    }

    /// Reload the list.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    pub async fn refresh<B: UserBackend>(&mut self, backend: &B) -> Result<(), StateError> {
        self.users = backend.list_users().await?;
        Ok(())
    }

    /// Add a user and reload.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] without a username or password, or
    /// the request failure.
    pub async fn add<B: UserBackend>(&mut self, backend: &B, draft: &UserDraft) -> Result<(), StateError> {
        validate(draft)?;
        if draft.password.as_deref().is_none_or(str::is_empty) {
            return Err(CoreError::Validation("a password is required for new users".into()).into());
        }
        backend.add_user(draft).await?;
        self.refresh(backend).await
    }

    /// Update a user and reload.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] without a username, or the request
    /// failure.
    pub async fn update<B: UserBackend>(
        &mut self,
        backend: &B,
        id: &str,
        draft: &UserDraft,
    ) -> Result<(), StateError> {
        validate(draft)?;
        backend.update_user(id, draft).await?;
        self.refresh(backend).await
    }

    /// Delete a user and reload.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    pub async fn delete<B: UserBackend>(&mut self, backend: &B, id: &str) -> Result<(), StateError> {
        backend.delete_user(id).await?;
        self.refresh(backend).await
    }

    /// Find a listed user by id or username.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&UserRecord> {
        self.users
            .iter()
            .find(|user| user.id == key || user.username == key)
    }
}

fn validate(draft: &UserDraft) -> Result<(), CoreError> {
    if draft.username.trim().is_empty() {
        return Err(CoreError::Validation("username must not be empty".into()));
    }
    Ok(())
}
