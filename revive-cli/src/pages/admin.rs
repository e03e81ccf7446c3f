//! Admin console: counters, member search, and CRUD over programs, trainers and challenges.

use std::time::Duration;

use crate::api::{ApiClient, ApiResult, OrEmpty};
use crate::models::{
    AdminStats, Challenge, ChallengeInput, Member, Program, ProgramInput, Trainer, TrainerInput,
};
use crate::routes::Route;
use crate::session::{AdminSession, GateState};
use crate::sync::{ChallengeBoard, IdCollection, Liveness, MemberSearch, PageState, StatusSlot};

pub const ADMIN_LOAD_FAILED: &str = "Failed to load data. Please check the server connection.";
pub const ADMIN_SAVE_FAILED: &str = "Failed to save changes. Please try again.";
pub const ADMIN_DELETE_FAILED: &str = "Failed to delete. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminData {
    pub stats: AdminStats,
    pub members: Vec<Member>,
    pub programs: IdCollection<Program>,
    pub trainers: IdCollection<Trainer>,
    pub challenges: ChallengeBoard,
}

impl AdminData {
    fn recount(&mut self) {
        self.stats.total_members = self.members.len() as u64;
        self.stats.total_programs = self.programs.len() as u64;
        self.stats.total_trainers = self.trainers.len() as u64;
        self.stats.total_challenges = self.challenges.all().len() as u64;
    }
}

pub struct AdminDashboardPage {
    api: ApiClient,
    admin: AdminSession,
    live: Liveness,
    state: PageState<AdminData>,
    search: MemberSearch,
    status: StatusSlot,
}

impl AdminDashboardPage {
    pub fn new(api: ApiClient, admin: AdminSession, status_ttl: Duration) -> Self {
        Self {
            api,
            admin,
            live: Liveness::new(),
            state: PageState::Idle,
            search: MemberSearch::default(),
            status: StatusSlot::new(status_ttl),
        }
    }

    pub fn from_gate(api: ApiClient, gate: GateState, status_ttl: Duration) -> Result<Self, Route> {
        super::admin_from_gate(gate).map(|admin| Self::new(api, admin, status_ttl))
    }

    pub fn admin(&self) -> &AdminSession {
        &self.admin
    }

    pub fn state(&self) -> &PageState<AdminData> {
        &self.state
    }

    pub fn status(&mut self) -> &mut StatusSlot {
        &mut self.status
    }

    pub fn unmount(&self) {
        self.live.unmount();
    }

    /// Load lists concurrently.
    ///
    /// The counters endpoint is optional: when it fails the counters are taken from the
    /// lists instead. Any list failing fails the whole page.
    pub async fn fetch(api: &ApiClient) -> Result<AdminData, String> {
        let lists = async {
            futures::try_join!(
                async { api.list_members().await.or_empty("members") },
                async { api.list_programs().await.or_empty("programs") },
                async { api.list_trainers().await.or_empty("trainers") },
                async { api.all_challenges().await.or_empty("challenges") },
                async { api.current_challenge().await.or_empty("current challenge") },
            )
        };
        let (lists, stats) = futures::join!(lists, api.admin_stats());

        let (members, programs, trainers, challenges, current) = lists.map_err(|e| {
            tracing::error!("Admin data failed to load: {}", e);
            e.user_message(ADMIN_LOAD_FAILED)
        })?;

        let mut data = AdminData {
            stats: AdminStats::default(),
            members,
            programs: programs.into(),
            trainers: trainers.into(),
            challenges: ChallengeBoard::new(challenges, current),
        };

        match stats {
            Ok(stats) => data.stats = stats,
            Err(e) => {
                tracing::warn!("Admin stats unavailable, counting locally: {}", e);
                data.recount();
            }
        }

        Ok(data)
    }

    pub async fn load(&mut self) {
        self.state.begin_loading();
        let outcome = Self::fetch(&self.api).await;
        self.live.guard(|| self.state.settle(outcome));
    }

    pub fn search_query(&self) -> &str {
        self.search.query()
    }

    /// Update the member search; filtering always starts from the full list
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search.set_query(query);
    }

    pub fn visible_members(&self) -> Vec<&Member> {
        match self.state.ready() {
            Some(data) => self.search.apply(&data.members),
            None => Vec::new(),
        }
    }

    /// Apply a mutation's outcome: update local data on success, banner either way
    fn settle<T>(
        &mut self,
        result: ApiResult<T>,
        success: &str,
        fallback: &str,
        apply: impl FnOnce(&mut AdminData, T),
    ) -> bool {
        match result {
            Ok(value) => self
                .live
                .guard(|| {
                    if let Some(data) = self.state.ready_mut() {
                        apply(data, value);
                    }
                    self.status.success(success);
                    true
                })
                .unwrap_or(false),
            Err(e) => {
                tracing::warn!("Admin action failed: {}", e);
                self.live.guard(|| self.status.error(e.user_message(fallback)));
                false
            }
        }
    }

    pub async fn create_program(&mut self, input: &ProgramInput) -> bool {
        let result = self.api.create_program(input).await;
        self.settle(result, "Program created.", ADMIN_SAVE_FAILED, |data, program| {
            data.programs.insert(program);
            data.stats.total_programs += 1;
        })
    }

    pub async fn update_program(&mut self, id: i64, input: &ProgramInput) -> bool {
        let result = self.api.update_program(id, input).await;
        self.settle(result, "Program updated.", ADMIN_SAVE_FAILED, |data, program| {
            data.programs.replace(program);
        })
    }

    pub async fn delete_program(&mut self, id: i64) -> bool {
        let result = self.api.delete_program(id).await;
        self.settle(result, "Program deleted.", ADMIN_DELETE_FAILED, |data, ()| {
            if data.programs.remove(id).is_some() {
                data.stats.total_programs = data.stats.total_programs.saturating_sub(1);
            }
        })
    }

    pub async fn create_trainer(&mut self, input: &TrainerInput) -> bool {
        let result = self.api.create_trainer(input).await;
        self.settle(result, "Trainer created.", ADMIN_SAVE_FAILED, |data, trainer| {
            data.trainers.insert(trainer);
            data.stats.total_trainers += 1;
        })
    }

    pub async fn update_trainer(&mut self, id: i64, input: &TrainerInput) -> bool {
        let result = self.api.update_trainer(id, input).await;
        self.settle(result, "Trainer updated.", ADMIN_SAVE_FAILED, |data, trainer| {
            data.trainers.replace(trainer);
        })
    }

    pub async fn delete_trainer(&mut self, id: i64) -> bool {
        let result = self.api.delete_trainer(id).await;
        self.settle(result, "Trainer deleted.", ADMIN_DELETE_FAILED, |data, ()| {
            if data.trainers.remove(id).is_some() {
                data.stats.total_trainers = data.stats.total_trainers.saturating_sub(1);
            }
        })
    }

    pub async fn create_challenge(&mut self, input: &ChallengeInput) -> bool {
        let result = self.api.create_challenge(input).await;
        self.settle(result, "Challenge created.", ADMIN_SAVE_FAILED, |data, challenge| {
            data.challenges.created(challenge);
            data.stats.total_challenges += 1;
        })
    }

    pub async fn update_challenge(&mut self, id: i64, input: &ChallengeInput) -> bool {
        let result = self.api.update_challenge(id, input).await;
        self.settle(result, "Challenge updated.", ADMIN_SAVE_FAILED, |data, challenge| {
            data.challenges.updated(challenge);
        })
    }

    pub async fn delete_challenge(&mut self, id: i64) -> bool {
        let result = self.api.delete_challenge(id).await;
        self.settle(result, "Challenge deleted.", ADMIN_DELETE_FAILED, |data, ()| {
            data.challenges.deleted(id);
            data.stats.total_challenges = data.challenges.all().len() as u64;
        })
    }

    pub async fn set_current_challenge(&mut self, id: i64) -> bool {
        let result = self.api.set_current_challenge(id).await;
        self.settle(result, "Current challenge updated.", ADMIN_SAVE_FAILED, |data, challenge: Challenge| {
            data.challenges.set_current(challenge);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::config::Config;
    use crate::models::AdminLogin;
    use chrono::Utc;

    fn page_with(data: AdminData) -> AdminDashboardPage {
        let api = ApiClient::new(&Config::default()).unwrap();
        let admin = AdminSession {
            admin: AdminLogin {
                admin_id: "ADM-1".to_string(),
                token: None,
                name: None,
                email: None,
                role: None,
            },
            login_time: Utc::now(),
        };
        let mut page = AdminDashboardPage::new(api, admin, Duration::from_secs(3));
        page.state.settle(Ok(data));
        page
    }

    fn member(id: i64, name: &str, email: &str) -> Member {
        Member {
            id,
            name: name.to_string(),
            email: email.to_string(),
            join_date: None,
            profile_photo_url: None,
        }
    }

    #[test]
    fn test_search_runs_against_loaded_members() {
        let mut page = page_with(AdminData {
            members: vec![
                member(1, "Grace Kim", "grace@example.com"),
                member(2, "Omar Diaz", "omar@revive.fit"),
            ],
            ..AdminData::default()
        });

        page.set_search("REVIVE");
        let ids: Vec<i64> = page.visible_members().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2]);

        page.set_search("");
        assert_eq!(page.visible_members().len(), 2);
    }

    #[test]
    fn test_failed_action_keeps_data_and_shows_fallback() {
        let mut page = page_with(AdminData::default());
        let before = page.state().clone();

        let ok = page.settle(
            Err::<Program, _>(ApiError::ServerError(None)),
            "Program created.",
            ADMIN_SAVE_FAILED,
            |data, program| data.programs.insert(program),
        );

        assert!(!ok);
        assert_eq!(page.state(), &before);
        let banner = page.status().current().cloned().unwrap();
        assert!(banner.is_error());
        assert_eq!(banner.text, ADMIN_SAVE_FAILED);
    }

    #[test]
    fn test_server_message_wins_over_fallback() {
        let mut page = page_with(AdminData::default());
        page.settle(
            Err::<(), _>(ApiError::BadRequest(Some("Name is required".to_string()))),
            "Trainer updated.",
            ADMIN_SAVE_FAILED,
            |_, ()| {},
        );
        assert_eq!(page.status().current().map(|b| b.text.as_str()), Some("Name is required"));
    }
}
