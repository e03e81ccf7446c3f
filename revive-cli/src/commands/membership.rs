use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;

use super::{output, Context};
use crate::pages::MembershipPage;
use crate::routes::Route;
use crate::sync::{CalendarCursor, PageState};

/// Pass the membership guard and load the page; `None` after printing a redirect
pub(super) async fn open_page(ctx: &Context) -> Result<Option<MembershipPage>> {
    let gate = ctx.gate(Route::Membership)?;
    let api = ctx.api_for_gate(&gate)?;

    let mut page = match MembershipPage::from_gate(api, gate, ctx.config.ui.form_status_timeout()) {
        Ok(page) => page,
        Err(route) => {
            output::redirect(route);
            return Ok(None);
        }
    };

    let spinner = output::spinner("Loading membership...");
    page.load().await;
    spinner.finish_and_clear();

    Ok(Some(page))
}

pub(super) fn render(page: &MembershipPage, date_format: &str) {
    let member = page.member();

    output::heading(&format!("Welcome back, {}!", member.name));
    println!("Email:       {}", member.email);
    println!("Member since {}", member.join_date_label(date_format));
    println!();

    let data = match page.state() {
        PageState::Ready(data) => data,
        PageState::Error(message) => {
            output::failure(message);
            return;
        }
        _ => {
            println!("{}", crate::session::LOADING_PLACEHOLDER);
            return;
        }
    };

    output::print_calendar(&page.grid(), page.month_total());
    println!();

    output::heading("Your Programs");
    if data.enrollment.enrolled().is_empty() {
        println!("  {}", "No programs enrolled yet.".dimmed());
    }
    for program in data.enrollment.enrolled() {
        output::print_program(program);
    }
    println!();

    output::heading("Available Programs");
    let available = data.enrollment.available();
    if available.is_empty() {
        println!("  {}", "No more programs available.".dimmed());
    }
    for program in available {
        output::print_program(program);
    }
    println!();

    output::heading("Current Challenge");
    output::print_challenge(data.challenge.as_ref());
    if data.challenge.is_some() {
        let state = if data.challenge_joined() {
            "Joined".green()
        } else {
            "Not joined".yellow()
        };
        println!("         {}", state);
    }
}

fn parse_month(value: &str) -> Result<CalendarCursor> {
    match NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d") {
        Ok(date) => Ok(CalendarCursor::from_date(date)),
        Err(_) => bail!("Invalid month '{}'. Use YYYY-MM", value),
    }
}

#[derive(Args)]
pub struct MembershipCommand {
    /// Month to show in the attendance calendar (YYYY-MM)
    #[arg(short, long)]
    month: Option<String>,
}

impl MembershipCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let cursor = self.month.as_deref().map(parse_month).transpose()?;

        let Some(mut page) = open_page(ctx).await? else {
            return Ok(());
        };
        if let Some(cursor) = cursor {
            page.set_cursor(cursor);
        }

        render(&page, &ctx.config.ui.date_format);
        page.unmount();

        Ok(())
    }
}

#[derive(Subcommand)]
pub enum ProgramSubcommands {
    /// Enroll in a program
    Join {
        /// Program ID
        id: i64,
    },

    /// Leave a program
    Leave {
        /// Program ID
        id: i64,
    },
}

impl ProgramSubcommands {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let Some(mut page) = open_page(ctx).await? else {
            return Ok(());
        };
        if let Some(message) = page.state().error() {
            output::failure(message);
            return Ok(());
        }

        let (changed, verb) = match self {
            ProgramSubcommands::Join { id } => (page.join_program(id).await, "Joined"),
            ProgramSubcommands::Leave { id } => (page.leave_program(id).await, "Left"),
        };

        report(&mut page, changed, &format!("{} program.", verb));
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum ChallengeSubcommands {
    /// Join the current challenge
    Join,

    /// Leave the current challenge
    Leave,
}

impl ChallengeSubcommands {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let Some(mut page) = open_page(ctx).await? else {
            return Ok(());
        };
        if let Some(message) = page.state().error() {
            output::failure(message);
            return Ok(());
        }
        if page.current_challenge_id().is_none() {
            println!("No active challenges at the moment.");
            return Ok(());
        }

        let (changed, verb) = match self {
            ChallengeSubcommands::Join => (page.join_challenge().await, "Joined"),
            ChallengeSubcommands::Leave => (page.leave_challenge().await, "Left"),
        };

        report(&mut page, changed, &format!("{} the current challenge.", verb));
        Ok(())
    }
}

fn report(page: &mut MembershipPage, changed: bool, done: &str) {
    page.unmount();

    match page.status().last() {
        Some(banner) if banner.is_error() => output::banner(banner),
        _ if changed => output::success(done),
        _ => println!("Nothing to change."),
    }
}
