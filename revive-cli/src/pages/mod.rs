//! Page view-models.
//!
//! A page owns its transient state (form fields, fetched lists, loading and error flags),
//! talks to the backend through `ApiClient`, and never lets a fetch failure escape as an
//! error: failures become `PageState::Error` or a `StatusBanner`. Protected pages are
//! built from a resolved `GateState` only.

pub mod admin;
pub mod auth;
pub mod contact;
pub mod home;
pub mod membership;
pub mod nav;
pub mod profile;
pub mod programs;

use thiserror::Error;

use crate::routes::Route;
use crate::session::{AdminSession, GateState, Identity, MemberSession};

pub use admin::{AdminDashboardPage, AdminData};
pub use auth::{avatar_url, password_is_strong, LoginForm, SignupError, SignupForm};
pub use contact::{ContactForm, ContactPage};
pub use home::MarketingPage;
pub use membership::{MembershipData, MembershipPage};
pub use nav::NavBar;
pub use profile::{ProfileEditPage, ProfileForm};
pub use programs::{ProgramsPage, ProgramsView};

/// Client-side checks that block a submission before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required.")]
    Required(&'static str),

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Password must be at least 8 characters with uppercase, lowercase, number, and special character (@#$%^&+=)")]
    WeakPassword,

    #[error("Admin ID and password are required.")]
    AdminCredentialsRequired,
}

/// Member identity out of a resolved gate, or where to go instead
pub(crate) fn member_from_gate(state: GateState) -> Result<MemberSession, Route> {
    match state {
        GateState::Allow(Identity::Member(session)) => Ok(session),
        GateState::Redirect(route) => Err(route),
        _ => Err(Route::Login),
    }
}

pub(crate) fn admin_from_gate(state: GateState) -> Result<AdminSession, Route> {
    match state {
        GateState::Allow(Identity::Admin(session)) => Ok(session),
        GateState::Redirect(route) => Err(route),
        _ => Err(Route::AdminLogin),
    }
}
