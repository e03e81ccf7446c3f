use crate::api::{ApiClient, ApiResult};
use crate::models::{Challenge, Program, Trainer};
use crate::sync::{Liveness, PageState};

/// Everything the public programs page shows.
///
/// Each section degrades to empty on its own; a dead trainers endpoint does not hide
/// the program catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramsView {
    pub programs: Vec<Program>,
    pub challenge: Option<Challenge>,
    pub trainers: Vec<Trainer>,
}

pub struct ProgramsPage {
    api: ApiClient,
    live: Liveness,
    state: PageState<ProgramsView>,
}

impl ProgramsPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            live: Liveness::new(),
            state: PageState::Idle,
        }
    }

    pub fn state(&self) -> &PageState<ProgramsView> {
        &self.state
    }

    pub fn liveness(&self) -> Liveness {
        self.live.clone()
    }

    pub async fn fetch(api: &ApiClient) -> ProgramsView {
        let (programs, challenge, trainers) = futures::join!(
            api.list_programs(),
            api.current_challenge(),
            api.list_trainers()
        );

        ProgramsView {
            programs: section(programs, "programs"),
            challenge: section(challenge, "current challenge"),
            trainers: section(trainers, "trainers"),
        }
    }

    pub async fn load(&mut self) -> &PageState<ProgramsView> {
        self.state.begin_loading();
        let view = Self::fetch(&self.api).await;
        self.live.guard(|| self.state.settle(Ok(view)));
        &self.state
    }
}

fn section<T: Default>(result: ApiResult<T>, what: &str) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!("Could not load {}: {}", what, e);
        T::default()
    })
}
