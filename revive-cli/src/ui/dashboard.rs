use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use super::app::{App, Panel};
use super::widgets;
use crate::sync::PageState;

/// Dashboard manages the TUI lifecycle
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    tick_rate: Duration,
}

impl Dashboard {
    /// Take over the terminal for `app`
    pub fn new(app: App, tick_rate: Duration) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self {
            terminal,
            app,
            tick_rate,
        })
    }

    /// Run the dashboard event loop
    pub fn run(&mut self) -> Result<()> {
        self.app.reload();

        loop {
            self.app.drain();

            let app = &mut self.app;
            self.terminal.draw(|f| ui(f, app))?;

            if event::poll(self.tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        self.app.handle_key(key.code)?;
                    }
                }
            }

            if self.app.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Cleanup terminal on exit
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;

        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.app.page.unmount();
        let _ = self.cleanup();
    }
}

/// Render the UI
fn ui(f: &mut Frame, app: &mut App) {
    let size = f.area();

    // Main layout: top area + status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    let banner = app.page.status().current().cloned();
    widgets::render_status_bar(main_chunks[1], f.buffer_mut(), banner.as_ref(), app.in_flight);

    match app.page.state() {
        PageState::Ready(_) => {}
        PageState::Error(message) => {
            let message = message.clone();
            widgets::render_placeholder(main_chunks[0], f.buffer_mut(), Some(&message));
            return;
        }
        PageState::Idle | PageState::Loading => {
            widgets::render_placeholder(main_chunks[0], f.buffer_mut(), None);
            return;
        }
    }

    // Split main area into columns
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main_chunks[0]);

    // Left column: profile (top) + calendar (bottom)
    let left_panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(columns[0]);

    // Right column: enrolled, available, challenge
    let right_panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ])
        .split(columns[1]);

    widgets::render_profile(left_panels[0], f.buffer_mut(), app.page.member(), &app.date_format);

    let grid = app.page.grid_at(Local::now().date_naive());
    widgets::render_calendar(
        left_panels[1],
        f.buffer_mut(),
        &grid,
        app.page.month_total(),
        app.selected_panel == Panel::Calendar,
    );

    widgets::render_programs(
        right_panels[0],
        f.buffer_mut(),
        " 💪 Enrolled Programs ",
        &app.enrolled(),
        app.selected_index,
        app.selected_panel == Panel::Enrolled,
        "No programs enrolled yet.",
    );

    widgets::render_programs(
        right_panels[1],
        f.buffer_mut(),
        " ➕ Available Programs ",
        &app.available(),
        app.selected_index,
        app.selected_panel == Panel::Available,
        "No more programs available.",
    );

    let data = app.page.state().ready();
    widgets::render_challenge(
        right_panels[2],
        f.buffer_mut(),
        data.and_then(|d| d.challenge.as_ref()),
        data.is_some_and(|d| d.challenge_joined()),
        app.selected_panel == Panel::Challenge,
    );

    // Render help overlay if active
    if app.show_help {
        let help_area = centered_rect(60, 80, size);
        widgets::render_help_overlay(help_area, f.buffer_mut());
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
