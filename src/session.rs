// File: ./src/session.rs
/*! Authenticated identity, persisted across restarts.

The store keeps the login payload (`token`, `user`, `userType`) exactly as the
server returned it in `<data_dir>/session.json`. Everything else in the crate
reads the derived [`Identity`]; only the shell calls `login`/`logout`.
*/
use crate::context::SharedContext;
use crate::model::{LoginKind, Therapist, User};
use crate::storage::FileStore;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of a successful `POST /auth/login`, and the on-disk session format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub token: String,
    pub user: serde_json::Value,
    pub user_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    EndUser,
    Therapist,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::EndUser => write!(f, "User"),
            Role::Therapist => write!(f, "Therapist"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

/// The signed-in account, typed by the table it lives in.
#[derive(Debug, Clone, PartialEq)]
pub enum Account {
    Client(User),
    Therapist(Therapist),
}

impl Account {
    pub fn id(&self) -> i64 {
        match self {
            Account::Client(u) => u.id,
            Account::Therapist(t) => t.id,
        }
    }

    pub fn first_name(&self) -> &str {
        match self {
            Account::Client(u) => &u.first_name,
            Account::Therapist(t) => &t.first_name,
        }
    }

    pub fn last_name(&self) -> &str {
        match self {
            Account::Client(u) => &u.last_name,
            Account::Therapist(t) => &t.last_name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Account::Client(u) => &u.email,
            Account::Therapist(t) => &t.email,
        }
    }

    /// Name as shown in headers; therapists get their title.
    pub fn display_name(&self) -> String {
        match self {
            Account::Client(u) => u.full_name(),
            Account::Therapist(t) => t.display_name(),
        }
    }

    fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Account::Client(u) => serde_json::to_value(u),
            Account::Therapist(t) => serde_json::to_value(t),
        }
    }
}

pub type Owner = (LoginKind, i64);

#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub token: String,
    pub account: Account,
    pub role: Role,
    pub user_type: LoginKind,
}

impl Identity {
    pub fn from_payload(payload: &AuthPayload) -> Result<Self> {
        let user_type = LoginKind::from_wire(&payload.user_type);
        let (account, role) = match user_type {
            LoginKind::Therapist => {
                let t: Therapist = serde_json::from_value(payload.user.clone())
                    .context("Session user is not a therapist record")?;
                (Account::Therapist(t), Role::Therapist)
            }
            LoginKind::User => {
                let u: User = serde_json::from_value(payload.user.clone())
                    .context("Session user is not a user record")?;
                let role = if u.is_admin() {
                    Role::Admin
                } else {
                    Role::EndUser
                };
                (Account::Client(u), role)
            }
        };
        Ok(Self {
            token: payload.token.clone(),
            account,
            role,
            user_type,
        })
    }

    pub fn user_id(&self) -> i64 {
        self.account.id()
    }

    /// Which account a result belongs to. Ids are only unique per user type.
    pub fn owner(&self) -> Owner {
        (self.user_type, self.user_id())
    }

    pub fn is_therapist(&self) -> bool {
        self.role == Role::Therapist
    }

    /// Same token and user type, different account record. Used after a profile save.
    pub fn payload_with(&self, account: &Account) -> Result<AuthPayload> {
        Ok(AuthPayload {
            token: self.token.clone(),
            user: account.to_value()?,
            user_type: self.user_type.as_str().to_string(),
        })
    }
}

#[derive(Debug)]
pub struct SessionStore {
    ctx: SharedContext,
    current: Option<Identity>,
}

impl SessionStore {
    /// Restores a persisted session. A missing or unreadable file means logged out.
    pub fn load(ctx: SharedContext) -> Self {
        let current = match Self::read(&ctx) {
            Ok(Some(payload)) => match Identity::from_payload(&payload) {
                Ok(identity) => {
                    log::info!(
                        "Restored session for user {} ({})",
                        identity.user_id(),
                        identity.role
                    );
                    Some(identity)
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt session file: {:#}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Could not read session file: {:#}", e);
                None
            }
        };
        Self { ctx, current }
    }

    fn read(ctx: &SharedContext) -> Result<Option<AuthPayload>> {
        let path = ctx.get_session_path()?;
        match FileStore::read_locked(&path)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Persists the payload and makes it the current identity.
    pub fn login(&mut self, payload: AuthPayload) -> Result<&Identity> {
        let identity = Identity::from_payload(&payload)?;
        let path = self.ctx.get_session_path()?;
        let json = serde_json::to_string_pretty(&payload)?;
        FileStore::with_lock(&path, || FileStore::atomic_write(&path, &json))?;

        log::info!(
            "Signed in as user {} ({})",
            identity.user_id(),
            identity.role
        );
        Ok(self.current.insert(identity))
    }

    /// Removes the persisted file, then clears the in-memory identity.
    /// If the file cannot be removed the session stays signed in.
    pub fn logout(&mut self) -> Result<()> {
        let path = self.ctx.get_session_path()?;
        FileStore::remove_locked(&path).context("Could not remove the stored session")?;
        if let Some(identity) = self.current.take() {
            log::info!("Signed out user {}", identity.user_id());
        }
        Ok(())
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AppContext, TestContext};
    use serde_json::json;
    use std::sync::Arc;

    fn payload(user_type: &str, user: serde_json::Value) -> AuthPayload {
        AuthPayload {
            token: "tok-123".to_string(),
            user,
            user_type: user_type.to_string(),
        }
    }

    #[test]
    fn test_role_derivation() {
        let end_user = payload(
            "user",
            json!({"id": 1, "firstName": "Sam", "role": {"name": "USER"}}),
        );
        let admin = payload(
            "user",
            json!({"id": 2, "firstName": "Root", "role": {"id": 1, "name": "ADMIN"}}),
        );
        let therapist = payload(
            "therapist",
            json!({"id": 3, "firstName": "Ana", "lastName": "Ruiz", "specialization": "CBT"}),
        );

        assert_eq!(Identity::from_payload(&end_user).unwrap().role, Role::EndUser);
        assert_eq!(Identity::from_payload(&admin).unwrap().role, Role::Admin);
        let t = Identity::from_payload(&therapist).unwrap();
        assert_eq!(t.role, Role::Therapist);
        assert_eq!(t.account.display_name(), "Dr. Ana Ruiz");
    }

    #[test]
    fn test_login_persists_and_reloads() {
        let ctx: SharedContext = Arc::new(TestContext::new());
        let mut store = SessionStore::load(ctx.clone());
        assert!(!store.is_authenticated());

        store
            .login(payload("user", json!({"id": 5, "firstName": "Kim"})))
            .unwrap();
        assert_eq!(store.identity().unwrap().user_id(), 5);

        let restored = SessionStore::load(ctx.clone());
        let identity = restored.identity().unwrap();
        assert_eq!(identity.token, "tok-123");
        assert_eq!(identity.user_type, LoginKind::User);
    }

    #[test]
    fn test_logout_clears_file() {
        let ctx: SharedContext = Arc::new(TestContext::new());
        let mut store = SessionStore::load(ctx.clone());
        store
            .login(payload("therapist", json!({"id": 9})))
            .unwrap();
        assert!(ctx.get_session_path().unwrap().exists());

        store.logout().unwrap();
        assert!(!store.is_authenticated());
        assert!(!ctx.get_session_path().unwrap().exists());
        assert!(!SessionStore::load(ctx).is_authenticated());
    }

    #[test]
    fn test_failed_removal_keeps_session() {
        let ctx: SharedContext = Arc::new(TestContext::new());
        let mut store = SessionStore::load(ctx.clone());
        store
            .login(payload("user", json!({"id": 5, "firstName": "Kim"})))
            .unwrap();

        // A directory in place of the file cannot be removed with remove_file.
        let path = ctx.get_session_path().unwrap();
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        assert!(store.logout().is_err());
        assert!(store.is_authenticated());
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_is_logged_out() {
        let ctx: SharedContext = Arc::new(TestContext::new());
        std::fs::write(ctx.get_session_path().unwrap(), "{not json").unwrap();
        assert!(!SessionStore::load(ctx).is_authenticated());
    }

    #[test]
    fn test_profile_patch_keeps_token() {
        let ctx: SharedContext = Arc::new(TestContext::new());
        let mut store = SessionStore::load(ctx);
        store
            .login(payload("user", json!({"id": 5, "firstName": "Kim"})))
            .unwrap();

        let identity = store.identity().unwrap().clone();
        let mut user = match &identity.account {
            Account::Client(u) => u.clone(),
            Account::Therapist(_) => unreachable!(),
        };
        user.first_name = "Kimberly".to_string();
        let next = identity.payload_with(&Account::Client(user)).unwrap();
        store.login(next).unwrap();

        let after = store.identity().unwrap();
        assert_eq!(after.token, "tok-123");
        assert_eq!(after.account.first_name(), "Kimberly");
    }
}
