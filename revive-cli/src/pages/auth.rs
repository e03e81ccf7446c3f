//! Signup, member login and admin login forms.

use chrono::NaiveDate;
use reqwest::Url;
use thiserror::Error;

use super::ValidationError;
use crate::api::{ApiClient, ApiError, NETWORK_MESSAGE};
use crate::models::{Member, NewMember};
use crate::routes::Route;
use crate::session::{AdminSession, LoginError, MemberSession, Session};

const AVATAR_BASE: &str = "https://ui-avatars.com/api/";
const PASSWORD_SPECIALS: &str = "@#$%^&+=";

pub const SIGNUP_FAILED: &str = "Failed to create account. Please try again.";
pub const EMAIL_TAKEN: &str = "An account with this email already exists";
pub const ADMIN_SIGNUP_UNAVAILABLE: &str =
    "Admin signup is not available. Please contact system administrator.";
pub const SIGNUP_SUCCESS: &str = "Account created successfully! Please login to continue.";

/// Generated initials avatar, yellow on black
pub fn avatar_url(name: &str, size: Option<u32>) -> String {
    let mut params = vec![
        ("name", name.to_string()),
        ("background", "ffcc00".to_string()),
        ("color", "000".to_string()),
    ];
    if let Some(size) = size {
        params.push(("size", size.to_string()));
    }

    match Url::parse_with_params(AVATAR_BASE, &params) {
        Ok(url) => url.to_string(),
        Err(_) => AVATAR_BASE.to_string(),
    }
}

/// 8+ characters with upper, lower, digit and one of `@#$%^&+=`, no whitespace
pub fn password_is_strong(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
        && !password.chars().any(char::is_whitespace)
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub admin_id: String,
    pub password: String,
    pub confirm: String,
    pub as_admin: bool,
}

#[derive(Debug, Error, PartialEq)]
pub enum SignupError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("{}", ADMIN_SIGNUP_UNAVAILABLE)]
    AdminUnavailable,

    #[error("{0}")]
    Rejected(String),
}

impl SignupForm {
    /// Checks run in a fixed order; the first failure wins
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.as_admin && self.name.trim().is_empty() {
            return Err(ValidationError::Required("Name"));
        }
        if self.password != self.confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.as_admin && self.admin_id.trim().is_empty() {
            return Err(ValidationError::Required("Admin ID"));
        }
        if !self.as_admin && self.email.trim().is_empty() {
            return Err(ValidationError::Required("Email"));
        }
        if !password_is_strong(&self.password) {
            return Err(ValidationError::WeakPassword);
        }
        Ok(())
    }

    pub fn to_new_member(&self, today: NaiveDate) -> NewMember {
        NewMember {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            join_date: today,
            profile_photo_url: avatar_url(&self.name, None),
        }
    }

    /// Create the account. Signing up does not sign in; the caller moves on to `/login`.
    pub async fn submit(&self, api: &ApiClient, today: NaiveDate) -> Result<Member, SignupError> {
        self.validate()?;

        if self.as_admin {
            return Err(SignupError::AdminUnavailable);
        }

        let member = api
            .create_member(&self.to_new_member(today))
            .await
            .map_err(|e| SignupError::Rejected(signup_message(&e)))?;

        tracing::info!("Created member account {}", member.email);
        Ok(member)
    }
}

fn signup_message(error: &ApiError) -> String {
    match error {
        ApiError::Network(_) => NETWORK_MESSAGE.to_string(),
        other => match other.server_message() {
            Some(message) if message.contains("email already exists") => EMAIL_TAKEN.to_string(),
            Some(message) => message.to_string(),
            None => SIGNUP_FAILED.to_string(),
        },
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Email for members, admin id for admins
    pub identifier: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }

    /// Member login; lands on the membership page
    pub async fn submit_member(
        &self,
        session: &Session,
        api: &ApiClient,
    ) -> Result<(MemberSession, Route), LoginError> {
        let member = session
            .login_member(api, &self.identifier, &self.password)
            .await?;
        Ok((member, Route::Membership))
    }

    /// Admin login; lands on the admin dashboard
    pub async fn submit_admin(
        &self,
        session: &Session,
        api: &ApiClient,
    ) -> Result<(AdminSession, Route), LoginError> {
        let admin = session
            .login_admin(api, &self.identifier, &self.password)
            .await?;
        Ok((admin, Route::AdminDashboard))
    }
}
