use anyhow::Result;
use crossterm::event::KeyCode;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::ApiResult;
use crate::models::Program;
use crate::pages::{MembershipData, MembershipPage};

/// Application state for the membership dashboard
pub struct App {
    /// Should the application quit?
    pub should_quit: bool,
    /// Currently selected panel
    pub selected_panel: Panel,
    /// Selected index in the current panel
    pub selected_index: usize,
    /// Show help overlay
    pub show_help: bool,
    /// Format for the join date
    pub date_format: String,
    pub page: MembershipPage,
    /// Requests sent but not yet answered
    pub in_flight: usize,
    tx: UnboundedSender<Outcome>,
    rx: UnboundedReceiver<Outcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Calendar,
    Enrolled,
    Available,
    Challenge,
}

/// Result of a background request, applied on the UI loop
#[derive(Debug)]
pub enum Outcome {
    Loaded(Result<MembershipData, String>),
    Program {
        id: i64,
        join: bool,
        result: ApiResult<()>,
    },
    Challenge {
        id: i64,
        join: bool,
        result: ApiResult<()>,
    },
}

impl App {
    pub fn new(page: MembershipPage, date_format: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            should_quit: false,
            selected_panel: Panel::Calendar,
            selected_index: 0,
            show_help: false,
            date_format: date_format.into(),
            page,
            in_flight: 0,
            tx,
            rx,
        }
    }

    /// Start (or restart) the page load in the background
    pub fn reload(&mut self) {
        self.page.begin_loading();

        let api = self.page.api().clone();
        let member_id = self.page.member().id;
        let tx = self.tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let outcome = MembershipPage::fetch(&api, member_id).await;
            // Receiver is gone once the dashboard has closed
            let _ = tx.send(Outcome::Loaded(outcome));
        });
    }

    /// Apply every finished request
    pub fn drain(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply(outcome);
        }
    }

    pub fn apply(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match outcome {
            Outcome::Loaded(result) => {
                self.page.apply_load(result);
                self.clamp_selection();
            }
            Outcome::Program { id, join, result } => {
                self.page.apply_program_change(id, join, result);
                self.clamp_selection();
            }
            Outcome::Challenge { id, join, result } => {
                self.page.apply_challenge_change(id, join, result);
            }
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) -> Result<()> {
        // Help overlay takes precedence
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return Ok(());
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload(),

            // Calendar
            KeyCode::Left | KeyCode::Char('h') => self.page.prev_month(),
            KeyCode::Right | KeyCode::Char('l') => self.page.next_month(),
            KeyCode::Char('t') | KeyCode::Char('T') => self.page.go_to_today(),

            KeyCode::Tab => self.next_panel(),
            KeyCode::BackTab => self.prev_panel(),

            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),

            KeyCode::Enter => self.activate(),

            _ => {}
        }

        Ok(())
    }

    /// Leave the dashboard; late answers are dropped from here on
    pub fn quit(&mut self) {
        self.should_quit = true;
        self.page.unmount();
    }

    pub fn enrolled(&self) -> Vec<&Program> {
        self.page
            .state()
            .ready()
            .map(|d| d.enrollment.enrolled().iter().collect())
            .unwrap_or_default()
    }

    pub fn available(&self) -> Vec<&Program> {
        self.page
            .state()
            .ready()
            .map(|d| d.enrollment.available())
            .unwrap_or_default()
    }

    /// Join/leave whatever is selected
    fn activate(&mut self) {
        match self.selected_panel {
            Panel::Enrolled => {
                let selected = self.enrolled().get(self.selected_index).map(|p| p.id);
                if let Some(id) = selected {
                    self.spawn_program_change(id, false);
                }
            }
            Panel::Available => {
                let selected = self.available().get(self.selected_index).map(|p| p.id);
                if let Some(id) = selected {
                    self.spawn_program_change(id, true);
                }
            }
            Panel::Challenge => {
                let joined = self
                    .page
                    .state()
                    .ready()
                    .is_some_and(|d| d.challenge_joined());
                if let Some(id) = self.page.current_challenge_id() {
                    self.spawn_challenge_change(id, !joined);
                }
            }
            Panel::Calendar => {}
        }
    }

    fn spawn_program_change(&mut self, id: i64, join: bool) {
        let api = self.page.api().clone();
        let member_id = self.page.member().id;
        let tx = self.tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let result = if join {
                api.join_program(member_id, id).await
            } else {
                api.leave_program(member_id, id).await
            };
            let _ = tx.send(Outcome::Program { id, join, result });
        });
    }

    fn spawn_challenge_change(&mut self, id: i64, join: bool) {
        let api = self.page.api().clone();
        let member_id = self.page.member().id;
        let tx = self.tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let result = if join {
                api.join_challenge(member_id, id).await
            } else {
                api.leave_challenge(member_id, id).await
            };
            let _ = tx.send(Outcome::Challenge { id, join, result });
        });
    }

    /// Move to next panel
    fn next_panel(&mut self) {
        self.selected_panel = match self.selected_panel {
            Panel::Calendar => Panel::Enrolled,
            Panel::Enrolled => Panel::Available,
            Panel::Available => Panel::Challenge,
            Panel::Challenge => Panel::Calendar,
        };
        self.selected_index = 0;
    }

    /// Move to previous panel
    fn prev_panel(&mut self) {
        self.selected_panel = match self.selected_panel {
            Panel::Calendar => Panel::Challenge,
            Panel::Enrolled => Panel::Calendar,
            Panel::Available => Panel::Enrolled,
            Panel::Challenge => Panel::Available,
        };
        self.selected_index = 0;
    }

    fn panel_len(&self) -> usize {
        match self.selected_panel {
            Panel::Enrolled => self.enrolled().len(),
            Panel::Available => self.available().len(),
            Panel::Challenge | Panel::Calendar => 0,
        }
    }

    /// Move selection up within current panel
    fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Move selection down within current panel
    fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.panel_len() {
            self.selected_index += 1;
        }
    }

    /// Lists shrink after join/leave; keep the cursor on an existing row
    fn clamp_selection(&mut self) {
        let len = self.panel_len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::api::ApiClient;
    use crate::models::Member;
    use crate::session::MemberSession;
    use crate::sync::{CalendarCursor, Enrollment};
    use std::time::Duration;

    fn program(id: i64) -> Program {
        Program {
            id,
            name: format!("P{}", id),
            description: String::new(),
            image_url: None,
            duration: None,
            benefits: None,
            trainer_id: None,
        }
    }

    fn app() -> App {
        let api = ApiClient::new(&Config::default()).unwrap();
        let session = MemberSession {
            member: Member {
                id: 1,
                name: "Kai".to_string(),
                email: "kai@example.com".to_string(),
                join_date: None,
                profile_photo_url: None,
            },
            token: None,
            login_time: None,
        };
        let mut app = App::new(MembershipPage::new(api, session, Duration::from_secs(3)), "%Y-%m-%d");
        app.apply(Outcome::Loaded(Ok(MembershipData {
            enrollment: Enrollment::new(vec![program(1), program(2), program(3)], vec![program(1)]),
            ..MembershipData::default()
        })));
        app
    }

    #[test]
    fn test_panel_cycle_and_selection_bounds() -> Result<()> {
        let mut app = app();
        app.handle_key(KeyCode::Tab)?;
        app.handle_key(KeyCode::Tab)?;
        assert_eq!(app.selected_panel, Panel::Available);

        app.handle_key(KeyCode::Char('j'))?;
        app.handle_key(KeyCode::Char('j'))?;
        assert_eq!(app.selected_index, 1);

        app.handle_key(KeyCode::BackTab)?;
        assert_eq!(app.selected_panel, Panel::Enrolled);
        assert_eq!(app.selected_index, 0);
        Ok(())
    }

    #[test]
    fn test_month_keys_move_cursor() -> Result<()> {
        let mut app = app();
        let start = app.page.cursor();

        app.handle_key(KeyCode::Left)?;
        assert_eq!(app.page.cursor(), start.prev());
        app.handle_key(KeyCode::Right)?;
        app.handle_key(KeyCode::Right)?;
        assert_eq!(app.page.cursor(), start.next());
        app.handle_key(KeyCode::Char('t'))?;
        assert_eq!(app.page.cursor(), CalendarCursor::today());
        Ok(())
    }

    #[test]
    fn test_help_swallows_keys_until_closed() -> Result<()> {
        let mut app = app();
        app.handle_key(KeyCode::Char('?'))?;
        app.handle_key(KeyCode::Char('q'))?;
        assert!(!app.should_quit);

        app.handle_key(KeyCode::Esc)?;
        app.handle_key(KeyCode::Char('q'))?;
        assert!(app.should_quit);
        Ok(())
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let mut app = app();
        app.selected_panel = Panel::Available;
        app.selected_index = 1;

        app.apply(Outcome::Program {
            id: 3,
            join: true,
            result: Ok(()),
        });
        assert_eq!(app.available().len(), 1);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_answers_after_quit_are_ignored() {
        let mut app = app();
        app.quit();
        app.apply(Outcome::Program {
            id: 2,
            join: true,
            result: Ok(()),
        });
        assert_eq!(app.enrolled().len(), 1);
    }
}
