use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AdminLogin, Member};
use crate::routes::Route;
use crate::storage::{ADMIN_KEY, MEMBER_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKind {
    Member,
    Admin,
}

impl IdentityKind {
    /// Session-store key holding this identity
    pub fn store_key(&self) -> &'static str {
        match self {
            IdentityKind::Member => MEMBER_KEY,
            IdentityKind::Admin => ADMIN_KEY,
        }
    }

    /// Where a visitor without this identity is sent
    pub fn login_route(&self) -> Route {
        match self {
            IdentityKind::Member => Route::Login,
            IdentityKind::Admin => Route::AdminLogin,
        }
    }
}

/// Stored member identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSession {
    #[serde(flatten)]
    pub member: Member,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_time: Option<DateTime<Utc>>,
}

/// Stored admin identity; `loginTime` is mandatory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    #[serde(flatten)]
    pub admin: AdminLogin,

    pub login_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    Member(MemberSession),
    Admin(AdminSession),
}

impl Identity {
    pub fn kind(&self) -> IdentityKind {
        match self {
            Identity::Member(_) => IdentityKind::Member,
            Identity::Admin(_) => IdentityKind::Admin,
        }
    }

    pub fn token(&self) -> Option<String> {
        match self {
            Identity::Member(s) => s.token.clone(),
            Identity::Admin(s) => s.admin.token.clone(),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Identity::Member(s) => &s.member.name,
            Identity::Admin(s) => s.admin.name.as_deref().unwrap_or(&s.admin.admin_id),
        }
    }

    pub fn login_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Identity::Member(s) => s.login_time,
            Identity::Admin(s) => Some(s.login_time),
        }
    }

    pub fn into_member(self) -> Option<MemberSession> {
        match self {
            Identity::Member(s) => Some(s),
            Identity::Admin(_) => None,
        }
    }

    pub fn into_admin(self) -> Option<AdminSession> {
        match self {
            Identity::Admin(s) => Some(s),
            Identity::Member(_) => None,
        }
    }
}
