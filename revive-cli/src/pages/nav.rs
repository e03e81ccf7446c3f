use anyhow::Result;

use crate::routes::Route;
use crate::session::{IdentityKind, Session};

/// Navigation links every page shows
pub const NAV_LINKS: [Route; 5] = [
    Route::Home,
    Route::About,
    Route::Programs,
    Route::Contact,
    Route::Membership,
];

/// Who the navigation bar is rendered for; an admin identity wins over a member one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavBar {
    Guest,
    Member { name: String },
    Admin { admin_id: String },
}

impl NavBar {
    pub fn for_session(session: &Session) -> Result<Self> {
        if let Some(admin) = session
            .check(IdentityKind::Admin)?
            .identity
            .and_then(|i| i.into_admin())
        {
            return Ok(NavBar::Admin {
                admin_id: admin.admin.admin_id,
            });
        }

        Ok(match session.current_member()? {
            Some(member) => NavBar::Member {
                name: member.member.name,
            },
            None => NavBar::Guest,
        })
    }

    /// Extra entry next to the common links
    pub fn account_link(&self) -> Route {
        match self {
            NavBar::Admin { .. } => Route::AdminDashboard,
            NavBar::Member { .. } => Route::Membership,
            NavBar::Guest => Route::Login,
        }
    }

    /// Sign out whoever the bar shows; returns the next route, if anyone was signed in
    pub fn logout(&self, session: &Session) -> Result<Option<Route>> {
        let kind = match self {
            NavBar::Admin { .. } => IdentityKind::Admin,
            NavBar::Member { .. } => IdentityKind::Member,
            NavBar::Guest => return Ok(None),
        };
        session.logout(kind).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdminLogin, Member};
    use crate::session::{AdminSession, Identity, MemberSession, SessionPolicy};
    use crate::storage::SessionStore;
    use chrono::Utc;

    fn session() -> Session {
        Session::new(SessionStore::temporary().unwrap(), SessionPolicy::default())
    }

    #[test]
    fn test_admin_takes_precedence() -> Result<()> {
        let session = session();
        session.store_identity(&Identity::Member(MemberSession {
            member: Member {
                id: 1,
                name: "Noor".to_string(),
                email: "noor@example.com".to_string(),
                join_date: None,
                profile_photo_url: None,
            },
            token: None,
            login_time: Some(Utc::now()),
        }))?;

        let nav = NavBar::for_session(&session)?;
        assert_eq!(nav, NavBar::Member { name: "Noor".to_string() });

        session.store_identity(&Identity::Admin(AdminSession {
            admin: AdminLogin {
                admin_id: "root".to_string(),
                token: None,
                name: None,
                email: None,
                role: None,
            },
            login_time: Utc::now(),
        }))?;

        let nav = NavBar::for_session(&session)?;
        assert_eq!(nav.account_link(), Route::AdminDashboard);
        assert_eq!(nav.logout(&session)?, Some(Route::AdminLogin));

        // Member identity survives the admin logout
        assert!(matches!(NavBar::for_session(&session)?, NavBar::Member { .. }));
        Ok(())
    }

    #[test]
    fn test_guest_logout_is_noop() -> Result<()> {
        let session = session();
        let nav = NavBar::for_session(&session)?;
        assert_eq!(nav, NavBar::Guest);
        assert_eq!(nav.logout(&session)?, None);
        Ok(())
    }
}
