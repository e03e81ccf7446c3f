//! Terminal rendering shared by the page commands.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::models::{Challenge, Member, Program, Trainer};
use crate::routes::Route;
use crate::sync::{GridCell, MonthGrid, StatusBanner};

pub fn heading(title: &str) {
    println!("{}", console::style(title).bold().yellow());
    println!("{}", "─".repeat(title.chars().count().max(32)));
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn failure(message: &str) {
    println!("{} {}", "✗".red(), message);
}

pub fn banner(banner: &StatusBanner) {
    if banner.is_error() {
        failure(&banner.text);
    } else {
        success(&banner.text);
    }
}

pub fn redirect(route: Route) {
    println!("{} Please sign in first: {}", "→".cyan(), route.path());
}

/// Spinner for a request in flight
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.yellow} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

pub fn member_line(member: &Member) -> String {
    format!("#{:<5} {:<24} {}", member.id, member.name, member.email)
}

pub fn program_line(program: &Program) -> String {
    format!(
        "#{:<5} {:<24} {} · {}",
        program.id,
        program.name.bold(),
        program.price_label(),
        program.duration_label()
    )
}

pub fn print_program(program: &Program) {
    println!("  {}", program_line(program));
    if !program.description.is_empty() {
        println!("         {}", program.description.dimmed());
    }
}

pub fn print_trainer(trainer: &Trainer) {
    let title = trainer.title.as_deref().unwrap_or_default();
    println!("  #{:<5} {} {}", trainer.id, trainer.name.bold(), title.cyan());
    if let Some(bio) = trainer.bio.as_deref().filter(|b| !b.is_empty()) {
        println!("         {}", bio.dimmed());
    }
    for achievement in &trainer.achievements {
        println!("         • {}", achievement);
    }
}

pub fn print_challenge(challenge: Option<&Challenge>) {
    match challenge {
        Some(challenge) => {
            println!("  #{:<5} {}", challenge.id, challenge.title.bold());
            if !challenge.description.is_empty() {
                println!("         {}", challenge.description);
            }
        }
        None => println!("  {}", "No active challenges at the moment.".dimmed()),
    }
}

pub fn print_calendar(grid: &MonthGrid, month_total: usize) {
    println!("{}", grid.cursor.title().bold());
    println!("{}", grid.header.iter().map(|d| format!("{:>4}", d)).collect::<String>());

    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                GridCell::Blank => "    ".to_string(),
                GridCell::Day(day) => {
                    let text = format!("{:>3}{}", day.day, if day.attended { "•" } else { " " });
                    match (day.attended, day.today) {
                        (true, _) => text.black().on_yellow().to_string(),
                        (false, true) => text.underline().to_string(),
                        (false, false) => text,
                    }
                }
            })
            .collect();
        println!("{}", row);
    }

    println!();
    println!("Total this month: {} days", month_total.to_string().green().bold());
}
