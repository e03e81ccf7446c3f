// Terminal UI module using ratatui

mod app;
mod dashboard;
mod widgets;

pub use app::{App, Outcome, Panel};
pub use dashboard::Dashboard;
