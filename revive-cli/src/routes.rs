//! Route table: URL paths to pages, and which identity each page needs.

use std::fmt;

use crate::session::IdentityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Programs,
    Contact,
    Membership,
    ProfileEdit,
    AdminDashboard,
    Signup,
    Login,
    AdminLogin,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 10] = [
        Route::Home,
        Route::About,
        Route::Programs,
        Route::Contact,
        Route::Membership,
        Route::ProfileEdit,
        Route::AdminDashboard,
        Route::Signup,
        Route::Login,
        Route::AdminLogin,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Programs => "/programs",
            Route::Contact => "/contact",
            Route::Membership => "/membership",
            Route::ProfileEdit => "/profile/edit",
            Route::AdminDashboard => "/admin/dashboard",
            Route::Signup => "/signup",
            Route::Login => "/login",
            Route::AdminLogin => "/adminlogin",
            Route::NotFound => "/404",
        }
    }

    /// Resolve a path; tolerant of a missing leading slash and a trailing slash
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim().trim_matches('/');
        let normalized = format!("/{}", trimmed);

        Route::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .unwrap_or(Route::NotFound)
    }

    /// Identity a visitor must hold to see this page
    pub fn required_identity(&self) -> Option<IdentityKind> {
        match self {
            Route::Membership | Route::ProfileEdit => Some(IdentityKind::Member),
            Route::AdminDashboard => Some(IdentityKind::Admin),
            _ => None,
        }
    }

    pub fn is_protected(&self) -> bool {
        self.required_identity().is_some()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
