//! Session service and authorization gate.
//!
//! `Session` is the only code that reads or writes identities in the session store. Pages
//! and commands receive it explicitly instead of poking at the store themselves.

mod gate;
mod identity;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::api::{ApiClient, ApiError, NETWORK_MESSAGE};
use crate::config::Config;
use crate::models::{AdminCredentials, Member, MemberCredentials};
use crate::routes::Route;
use crate::storage::{SessionStore, Stored};

pub use gate::{Gate, GateState, LOADING_PLACEHOLDER};
pub use identity::{AdminSession, Identity, IdentityKind, MemberSession};

pub const MEMBER_LOGIN_FALLBACK: &str = "Invalid credentials. Please try again.";
pub const ADMIN_LOGIN_FALLBACK: &str = "Invalid Admin ID or password.";
pub const ADMIN_FIELDS_REQUIRED: &str = "Admin ID and password are required.";

/// How long identities stay valid
#[derive(Debug, Clone, Copy)]
pub struct SessionPolicy {
    pub ttl: Duration,
    pub expire_members: bool,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(24),
            expire_members: true,
        }
    }
}

impl SessionPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ttl: Duration::hours(config.session.ttl_hours),
            expire_members: config.session.expire_members,
        }
    }

    fn is_fresh(&self, login_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - login_time < self.ttl
    }
}

/// Outcome of `Session::check`
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCheck {
    pub valid: bool,
    pub identity: Option<Identity>,
}

impl SessionCheck {
    fn valid(identity: Identity) -> Self {
        Self {
            valid: true,
            identity: Some(identity),
        }
    }

    fn invalid() -> Self {
        Self {
            valid: false,
            identity: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoginError {
    /// Rejected before any request was sent
    #[error("{0}")]
    Invalid(String),

    /// Backend refused or could not be reached; the text is ready for display
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct Session {
    store: SessionStore,
    policy: SessionPolicy,
}

impl Session {
    pub fn new(store: SessionStore, policy: SessionPolicy) -> Self {
        Self { store, policy }
    }

    /// Open the on-disk store named by the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = SessionStore::open(&config.session_store_path()?)?;
        Ok(Self::new(store, SessionPolicy::from_config(config)))
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    pub fn check(&self, kind: IdentityKind) -> Result<SessionCheck> {
        self.check_at(kind, Utc::now())
    }

    /// Validate the stored identity of `kind` as of `now`.
    ///
    /// Expired and unreadable records are purged; both count as "not signed in".
    pub fn check_at(&self, kind: IdentityKind, now: DateTime<Utc>) -> Result<SessionCheck> {
        let key = kind.store_key();

        let identity = match kind {
            IdentityKind::Admin => self.store.get::<AdminSession>(key)?.map_identity(Identity::Admin),
            IdentityKind::Member => self.store.get::<MemberSession>(key)?.map_identity(Identity::Member),
        };

        let identity = match identity {
            Stored::Missing => return Ok(SessionCheck::invalid()),
            Stored::Corrupt(reason) => {
                tracing::warn!("Discarding unreadable {} record: {}", key, reason);
                self.store.remove(key)?;
                return Ok(SessionCheck::invalid());
            }
            Stored::Found(identity) => identity,
        };

        let fresh = match (&identity, identity.login_time()) {
            (Identity::Member(_), _) if !self.policy.expire_members => true,
            (_, Some(login_time)) => self.policy.is_fresh(login_time, now),
            (_, None) => false,
        };

        if fresh {
            Ok(SessionCheck::valid(identity))
        } else {
            tracing::info!("{} session expired", key);
            self.store.remove(key)?;
            Ok(SessionCheck::invalid())
        }
    }

    /// First valid identity, admin before member
    pub fn current_identity(&self) -> Result<Option<Identity>> {
        for kind in [IdentityKind::Admin, IdentityKind::Member] {
            let check = self.check(kind)?;
            if check.valid {
                return Ok(check.identity);
            }
        }
        Ok(None)
    }

    pub async fn login_member(
        &self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<MemberSession, LoginError> {
        let credentials = MemberCredentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let login = api
            .login_member(&credentials)
            .await
            .map_err(|e| LoginError::Rejected(member_login_message(&e)))?;

        let session = MemberSession {
            member: login.member,
            token: login.token,
            login_time: Some(Utc::now()),
        };
        self.store.put(IdentityKind::Member.store_key(), &session)?;

        tracing::info!("Member {} signed in", session.member.email);
        Ok(session)
    }

    pub async fn login_admin(
        &self,
        api: &ApiClient,
        admin_id: &str,
        password: &str,
    ) -> Result<AdminSession, LoginError> {
        if admin_id.trim().is_empty() || password.trim().is_empty() {
            return Err(LoginError::Invalid(ADMIN_FIELDS_REQUIRED.to_string()));
        }

        let credentials = AdminCredentials {
            admin_id: admin_id.trim().to_string(),
            password: password.to_string(),
        };

        let admin = api
            .login_admin(&credentials)
            .await
            .map_err(|e| LoginError::Rejected(e.user_message(ADMIN_LOGIN_FALLBACK)))?;

        let session = AdminSession {
            admin,
            login_time: Utc::now(),
        };
        self.store.put(IdentityKind::Admin.store_key(), &session)?;

        tracing::info!("Admin {} signed in", session.admin.admin_id);
        Ok(session)
    }

    /// Forget the identity of `kind`; returns the login page to go to next
    pub fn logout(&self, kind: IdentityKind) -> Result<Route> {
        if self.store.remove(kind.store_key())? {
            tracing::info!("Signed out {}", kind.store_key());
        }
        Ok(kind.login_route())
    }

    /// Signed-in member, if the member session is still valid
    pub fn current_member(&self) -> Result<Option<MemberSession>> {
        Ok(self
            .check(IdentityKind::Member)?
            .identity
            .and_then(Identity::into_member))
    }

    /// Replace the stored member after a profile edit, keeping token and login time
    pub fn update_member(&self, member: Member) -> Result<()> {
        let key = IdentityKind::Member.store_key();
        let previous = self.store.get::<MemberSession>(key)?.found();

        let session = MemberSession {
            member,
            token: previous.as_ref().and_then(|s| s.token.clone()),
            login_time: previous.and_then(|s| s.login_time),
        };

        self.store.put(key, &session)
    }

    /// Write an identity verbatim (used when restoring or seeding sessions)
    pub fn store_identity(&self, identity: &Identity) -> Result<()> {
        match identity {
            Identity::Member(s) => self.store.put(IdentityKind::Member.store_key(), s),
            Identity::Admin(s) => self.store.put(IdentityKind::Admin.store_key(), s),
        }
    }
}

/// A rejected password is always reported the same way; other failures surface the
/// backend's message
fn member_login_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized(_) => MEMBER_LOGIN_FALLBACK.to_string(),
        ApiError::Network(_) => NETWORK_MESSAGE.to_string(),
        other => other.user_message(MEMBER_LOGIN_FALLBACK),
    }
}

trait MapIdentity<T> {
    fn map_identity(self, f: impl FnOnce(T) -> Identity) -> Stored<Identity>;
}

impl<T> MapIdentity<T> for Stored<T> {
    fn map_identity(self, f: impl FnOnce(T) -> Identity) -> Stored<Identity> {
        match self {
            Stored::Missing => Stored::Missing,
            Stored::Corrupt(reason) => Stored::Corrupt(reason),
            Stored::Found(value) => Stored::Found(f(value)),
        }
    }
}
