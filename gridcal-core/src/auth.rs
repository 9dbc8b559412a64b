//! Login gate.
//!
//! A session is the `team_member` key in local storage. Logging in either
//! matches the configured admin credentials or finds the member name in the
//! backend table.

use std::future::Future;

use crate::config::AuthConfig;
use crate::error::{GridcalError, GridcalResult};
use crate::remote::RestBackend;
use crate::store::KeyValueStore;

pub const SESSION_KEY: &str = "team_member";

/// Looks up whether a team member exists.
pub trait MemberDirectory {
    fn member_exists(&self, name: &str) -> impl Future<Output = GridcalResult<bool>>;
}

impl MemberDirectory for RestBackend {
    async fn member_exists(&self, name: &str) -> GridcalResult<bool> {
        self.team_member_exists(name).await
    }
}

/// Used when no backend is configured; nobody but the admin can log in.
pub struct NoDirectory;

impl MemberDirectory for NoDirectory {
    async fn member_exists(&self, _name: &str) -> GridcalResult<bool> {
        Err(GridcalError::NoBackendConfigured)
    }
}

pub struct LoginGate<'a, D> {
    store: &'a KeyValueStore,
    auth: &'a AuthConfig,
    directory: D,
}

impl<'a, D: MemberDirectory> LoginGate<'a, D> {
    pub fn new(store: &'a KeyValueStore, auth: &'a AuthConfig, directory: D) -> Self {
        LoginGate {
            store,
            auth,
            directory,
        }
    }

    /// The logged-in member, if any.
    pub fn current_member(&self) -> GridcalResult<Option<String>> {
        Ok(self
            .store
            .get(SESSION_KEY)?
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    pub fn is_admin(&self, member: &str) -> bool {
        member.eq_ignore_ascii_case(self.auth.admin_user.trim())
    }

    /// Log in and return the stored member name.
    ///
    /// An existing session is returned unchanged.
    pub async fn login(&self, member: &str, password: &str) -> GridcalResult<String> {
        if let Some(existing) = self.current_member()? {
            log::debug!("already logged in as {}", existing);
            return Ok(existing);
        }

        let member = member.trim();
        if member.is_empty() {
            return Err(GridcalError::Validation("Team member is required".into()));
        }

        let admin_password = self.auth.admin_password.as_deref();
        if self.is_admin(member) && admin_password.is_some_and(|p| p == password) {
            let admin = self.auth.admin_user.trim().to_string();
            self.store.set(SESSION_KEY, &admin)?;
            return Ok(admin);
        }

        // A wrong admin password still lets a member with that name in
        if !self.directory.member_exists(member).await? {
            return Err(GridcalError::TeamMemberNotFound(member.to_string()));
        }

        self.store.set(SESSION_KEY, member)?;
        log::info!("logged in as {}", member);
        Ok(member.to_string())
    }

    pub fn logout(&self) -> GridcalResult<()> {
        self.store.remove(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteCause;

    struct Members(Vec<&'static str>);

    impl MemberDirectory for Members {
        async fn member_exists(&self, name: &str) -> GridcalResult<bool> {
            Ok(self.0.iter().any(|m| *m == name))
        }
    }

    struct Offline;

    impl MemberDirectory for Offline {
        async fn member_exists(&self, _name: &str) -> GridcalResult<bool> {
            Err(GridcalError::remote(RemoteCause::Network, "connection refused"))
        }
    }

    fn auth_with_admin() -> AuthConfig {
        AuthConfig {
            admin_password: Some("s3cret".into()),
            ..AuthConfig::default()
        }
    }

    #[tokio::test]
    async fn admin_login_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyValueStore::new(dir.path());
        let auth = auth_with_admin();
        let gate = LoginGate::new(&store, &auth, Members(vec![]));

        assert_eq!(gate.login(" Admin ", "s3cret").await.unwrap(), "admin");
        assert_eq!(gate.current_member().unwrap().as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn admin_needs_configured_password() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyValueStore::new(dir.path());
        let auth = AuthConfig::default();
        let gate = LoginGate::new(&store, &auth, Members(vec![]));

        assert!(matches!(
            gate.login("admin", "").await,
            Err(GridcalError::TeamMemberNotFound(name)) if name == "admin"
        ));
        assert_eq!(gate.current_member().unwrap(), None);
    }

    #[tokio::test]
    async fn wrong_admin_password_falls_back_to_member_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyValueStore::new(dir.path());
        let auth = auth_with_admin();
        let gate = LoginGate::new(&store, &auth, Members(vec!["admin"]));

        assert_eq!(gate.login("admin", "wrong").await.unwrap(), "admin");
        assert_eq!(store.get(SESSION_KEY).unwrap().as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn wrong_admin_password_without_member_row_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyValueStore::new(dir.path());
        let auth = auth_with_admin();
        let gate = LoginGate::new(&store, &auth, Members(vec!["alice"]));

        assert!(matches!(
            gate.login("Admin", "wrong").await,
            Err(GridcalError::TeamMemberNotFound(name)) if name == "Admin"
        ));
        assert_eq!(gate.current_member().unwrap(), None);
    }

    #[tokio::test]
    async fn known_member_is_stored_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyValueStore::new(dir.path());
        let auth = AuthConfig::default();
        let gate = LoginGate::new(&store, &auth, Members(vec!["alice"]));

        assert_eq!(gate.login("  alice ", "").await.unwrap(), "alice");
        assert_eq!(store.get(SESSION_KEY).unwrap().as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn unknown_member_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyValueStore::new(dir.path());
        let auth = AuthConfig::default();
        let gate = LoginGate::new(&store, &auth, Members(vec!["alice"]));

        assert!(matches!(
            gate.login("mallory", "").await,
            Err(GridcalError::TeamMemberNotFound(name)) if name == "mallory"
        ));
        assert_eq!(gate.current_member().unwrap(), None);
    }

    #[tokio::test]
    async fn backend_failure_leaves_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyValueStore::new(dir.path());
        let auth = AuthConfig::default();
        let gate = LoginGate::new(&store, &auth, Offline);

        assert!(matches!(
            gate.login("alice", "").await,
            Err(GridcalError::Remote { cause: RemoteCause::Network, .. })
        ));
        assert_eq!(gate.current_member().unwrap(), None);
    }

    #[tokio::test]
    async fn existing_session_short_circuits() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyValueStore::new(dir.path());
        store.set(SESSION_KEY, "bob").unwrap();
        let auth = AuthConfig::default();
        let gate = LoginGate::new(&store, &auth, Offline);

        assert_eq!(gate.login("alice", "").await.unwrap(), "bob");

        gate.logout().unwrap();
        assert_eq!(gate.current_member().unwrap(), None);
    }
}
