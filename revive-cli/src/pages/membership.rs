//! Member dashboard: profile, attendance calendar, program and challenge enrollment.

use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use std::time::Duration;

use crate::api::{ApiClient, ApiResult, OrEmpty};
use crate::models::{Challenge, Member};
use crate::routes::Route;
use crate::session::{GateState, MemberSession};
use crate::sync::{AttendanceSet, CalendarCursor, Enrollment, Liveness, MonthGrid, PageState, StatusSlot};

pub const LOAD_FAILED: &str = "Failed loading data";
pub const JOIN_PROGRAM_FAILED: &str = "Failed to join program. Please try again.";
pub const LEAVE_PROGRAM_FAILED: &str = "Failed to leave program. Please try again.";
pub const JOIN_CHALLENGE_FAILED: &str = "Failed to join challenge. Please try again.";
pub const LEAVE_CHALLENGE_FAILED: &str = "Failed to leave challenge. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MembershipData {
    pub attendance: AttendanceSet,
    pub enrollment: Enrollment,
    pub challenge: Option<Challenge>,
    pub joined_challenges: HashSet<i64>,
}

impl MembershipData {
    pub fn challenge_joined(&self) -> bool {
        self.challenge
            .as_ref()
            .is_some_and(|c| self.joined_challenges.contains(&c.id))
    }
}

pub struct MembershipPage {
    api: ApiClient,
    member: Member,
    live: Liveness,
    state: PageState<MembershipData>,
    cursor: CalendarCursor,
    status: StatusSlot,
}

impl MembershipPage {
    pub fn new(api: ApiClient, session: MemberSession, status_ttl: Duration) -> Self {
        Self {
            api,
            member: session.member,
            live: Liveness::new(),
            state: PageState::Idle,
            cursor: CalendarCursor::today(),
            status: StatusSlot::new(status_ttl),
        }
    }

    /// Build the page from a resolved gate, or return the route to redirect to
    pub fn from_gate(api: ApiClient, gate: GateState, status_ttl: Duration) -> Result<Self, Route> {
        super::member_from_gate(gate).map(|session| Self::new(api, session, status_ttl))
    }

    pub fn member(&self) -> &Member {
        &self.member
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn state(&self) -> &PageState<MembershipData> {
        &self.state
    }

    pub fn status(&mut self) -> &mut StatusSlot {
        &mut self.status
    }

    pub fn liveness(&self) -> Liveness {
        self.live.clone()
    }

    pub fn unmount(&self) {
        self.live.unmount();
    }

    /// The five reads behind the page, issued concurrently; all succeed or the page errors
    pub async fn fetch(api: &ApiClient, member_id: i64) -> Result<MembershipData, String> {
        let reads = futures::try_join!(
            async { api.member_attendance(member_id).await.or_empty("attendance") },
            async { api.member_programs(member_id).await.or_empty("enrolled programs") },
            async { api.list_programs().await.or_empty("programs") },
            async { api.member_challenges(member_id).await.or_empty("enrolled challenges") },
            async { api.current_challenge().await.or_empty("current challenge") },
        );

        let (attendance, enrolled, all, challenges, challenge) = reads.map_err(|e| {
            tracing::error!("Membership data failed to load: {}", e);
            e.user_message(LOAD_FAILED)
        })?;

        Ok(MembershipData {
            attendance: AttendanceSet::from_records(&attendance),
            enrollment: Enrollment::new(all, enrolled),
            challenge,
            joined_challenges: challenges.iter().map(|c| c.id).collect(),
        })
    }

    pub async fn load(&mut self) {
        self.state.begin_loading();
        let outcome = Self::fetch(&self.api, self.member.id).await;
        self.apply_load(outcome);
    }

    /// Settle a load that ran elsewhere; dropped once the page is unmounted
    pub fn apply_load(&mut self, outcome: Result<MembershipData, String>) {
        self.live.guard(|| self.state.settle(outcome));
    }

    pub fn begin_loading(&mut self) {
        self.state.begin_loading();
    }

    pub fn cursor(&self) -> CalendarCursor {
        self.cursor
    }

    pub fn prev_month(&mut self) {
        self.cursor = self.cursor.prev();
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
    }

    pub fn go_to_today(&mut self) {
        self.cursor = CalendarCursor::today();
    }

    pub fn set_cursor(&mut self, cursor: CalendarCursor) {
        self.cursor = cursor;
    }

    pub fn grid(&self) -> MonthGrid {
        self.grid_at(Local::now().date_naive())
    }

    pub fn grid_at(&self, today: NaiveDate) -> MonthGrid {
        let empty = AttendanceSet::default();
        let attendance = self.state.ready().map(|d| &d.attendance).unwrap_or(&empty);
        MonthGrid::build(self.cursor, attendance, today)
    }

    /// "Total this month" for the month under the cursor
    pub fn month_total(&self) -> usize {
        self.state
            .ready()
            .map(|d| d.attendance.count_in(self.cursor))
            .unwrap_or(0)
    }

    pub async fn join_program(&mut self, program_id: i64) -> bool {
        let result = self.api.join_program(self.member.id, program_id).await;
        self.apply_program_change(program_id, true, result)
    }

    pub async fn leave_program(&mut self, program_id: i64) -> bool {
        let result = self.api.leave_program(self.member.id, program_id).await;
        self.apply_program_change(program_id, false, result)
    }

    /// Reconcile local lists after a join/leave request; failures leave them untouched
    pub fn apply_program_change(&mut self, program_id: i64, join: bool, result: ApiResult<()>) -> bool {
        match result {
            Ok(()) => self
                .live
                .guard(|| match self.state.ready_mut() {
                    Some(data) if join => data.enrollment.join(program_id),
                    Some(data) => data.enrollment.leave(program_id),
                    None => false,
                })
                .unwrap_or(false),
            Err(e) => {
                let fallback = if join { JOIN_PROGRAM_FAILED } else { LEAVE_PROGRAM_FAILED };
                tracing::warn!("Program {} change failed: {}", program_id, e);
                self.live.guard(|| self.status.error(e.user_message(fallback)));
                false
            }
        }
    }

    /// Join the current challenge; no-op without one
    pub async fn join_challenge(&mut self) -> bool {
        let Some(id) = self.current_challenge_id() else {
            return false;
        };
        let result = self.api.join_challenge(self.member.id, id).await;
        self.apply_challenge_change(id, true, result)
    }

    pub async fn leave_challenge(&mut self) -> bool {
        let Some(id) = self.current_challenge_id() else {
            return false;
        };
        let result = self.api.leave_challenge(self.member.id, id).await;
        self.apply_challenge_change(id, false, result)
    }

    pub fn current_challenge_id(&self) -> Option<i64> {
        self.state
            .ready()
            .and_then(|d| d.challenge.as_ref())
            .map(|c| c.id)
    }

    pub fn apply_challenge_change(&mut self, challenge_id: i64, join: bool, result: ApiResult<()>) -> bool {
        match result {
            Ok(()) => self
                .live
                .guard(|| match self.state.ready_mut() {
                    Some(data) if join => data.joined_challenges.insert(challenge_id),
                    Some(data) => data.joined_challenges.remove(&challenge_id),
                    None => false,
                })
                .unwrap_or(false),
            Err(e) => {
                let fallback = if join { JOIN_CHALLENGE_FAILED } else { LEAVE_CHALLENGE_FAILED };
                tracing::warn!("Challenge {} change failed: {}", challenge_id, e);
                self.live.guard(|| self.status.error(e.user_message(fallback)));
                false
            }
        }
    }
}
