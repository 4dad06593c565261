//! Current session and role gating.

use aja_client::AjaClient;
use aja_core::entities::Session;
use aja_core::enums::Capability;

use crate::error::StateError;
use crate::store::FileStore;

/// Store key of the persisted session.
pub const SESSION_KEY: &str = "session";

/// Holds the logged-in user across CLI invocations.
#[derive(Debug)]
pub struct AuthState {
    store: FileStore,
    session: Option<Session>,
}

impl AuthState {
    /// Restore the session from `store`. An unreadable session file counts as
    /// logged out.
    #[must_use]
    pub fn load(store: FileStore) -> Self {
        let session = store.get::<Session>(SESSION_KEY).unwrap_or_else(|error| {
            tracing::warn!(%error, "ignoring unreadable session");
            None
        });
        Self { store, session }
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// Authenticate against the audit backend and persist the session.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Client`] for rejected credentials and
    /// [`StateError::Store`] if the session cannot be saved.
    pub async fn login(
        &mut self,
        client: &AjaClient,
        username: &str,
        password: &str,
    ) -> Result<&Session, StateError> {
        let session = client.login(username, password).await?;
        self.establish(session)
    }

    /// Replace the current session and persist it.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Store`] if the session cannot be saved.
    pub fn establish(&mut self, session: Session) -> Result<&Session, StateError> {
        self.store.set(SESSION_KEY, &session)?;
        tracing::debug!(username = %session.username, role = %session.role, "session established");
        Ok(self.session.insert(session))
    }

    /// Clear the session. Logging out twice is fine.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Store`] if the session file cannot be removed.
    pub fn logout(&mut self) -> Result<(), StateError> {
        self.session = None;
        self.store.remove(SESSION_KEY)
    }

    /// The session, if its role grants `capability`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NotLoggedIn`] or [`StateError::Forbidden`].
    pub fn require(&self, capability: Capability) -> Result<&Session, StateError> {
        let session = self.session.as_ref().ok_or(StateError::NotLoggedIn)?;
        if session.allows(capability) {
            Ok(session)
        } else {
            Err(StateError::Forbidden {
                role: session.role,
                capability,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aja_core::enums::Role;

    #[test]
    fn session_survives_reload() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let mut auth = AuthState::load(FileStore::new(tmp.path()));
        assert!(!auth.is_logged_in());

        auth.establish(Session::new("priya", Role::Uploader)).unwrap();

        let reloaded = AuthState::load(FileStore::new(tmp.path()));
        assert_eq!(reloaded.session().map(|s| s.username.as_str()), Some("priya"));
    }

    #[test]
    fn logout_clears_file() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let mut auth = AuthState::load(FileStore::new(tmp.path()));
        auth.establish(Session::new("admin", Role::Admin)).unwrap();
        auth.logout().unwrap();
        auth.logout().unwrap();
        assert!(!AuthState::load(FileStore::new(tmp.path())).is_logged_in());
    }

    #[test]
    fn require_checks_role() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let mut auth = AuthState::load(FileStore::new(tmp.path()));
        assert!(matches!(
            auth.require(Capability::ViewAnalytics),
            Err(StateError::NotLoggedIn)
        ));

        auth.establish(Session::new("rev", Role::Reviewer)).unwrap();
        assert!(auth.require(Capability::ReviewReports).is_ok());
        let err = auth.require(Capability::RunAudits).unwrap_err();
        assert_eq!(err.to_string(), "role 'reviewer' is not allowed to run audits");
    }

    #[test]
    fn corrupt_session_counts_as_logged_out() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileStore::new(tmp.path());
        std::fs::write(store.path_for(SESSION_KEY), "garbage").unwrap();
        assert!(!AuthState::load(store).is_logged_in());
    }
}
