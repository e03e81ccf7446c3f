use anyhow::Result;

use super::{Identity, Session};
use crate::routes::Route;

/// Shown while a protected page waits on its session check
pub const LOADING_PLACEHOLDER: &str = "Loading...";

#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    /// Session check not finished; render the placeholder
    Pending,
    /// Public page, nothing to check
    Open,
    /// Protected page, visitor holds the right identity
    Allow(Identity),
    /// Protected page, visitor must sign in first
    Redirect(Route),
}

/// Guard in front of one route.
///
/// Protected page view-models are built from the identity inside `Allow`, so no page can
/// start fetching before its gate has resolved.
#[derive(Debug)]
pub struct Gate {
    route: Route,
    state: GateState,
}

impl Gate {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            state: GateState::Pending,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        matches!(self.state, GateState::Pending).then_some(LOADING_PLACEHOLDER)
    }

    pub fn resolve(&mut self, session: &Session) -> Result<&GateState> {
        self.state = match self.route.required_identity() {
            None => GateState::Open,
            Some(kind) => {
                let check = session.check(kind)?;
                match check.identity {
                    Some(identity) if check.valid => GateState::Allow(identity),
                    _ => {
                        tracing::debug!("{} requires sign-in, redirecting", self.route);
                        GateState::Redirect(kind.login_route())
                    }
                }
            }
        };

        Ok(&self.state)
    }

    /// Resolve and hand over the final state
    pub fn into_resolved(mut self, session: &Session) -> Result<GateState> {
        self.resolve(session)?;
        Ok(self.state)
    }
}
