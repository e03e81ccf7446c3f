use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;

use super::{output, Context};
use crate::models::{ChallengeInput, ProgramInput, TrainerInput};
use crate::pages::{AdminDashboardPage, AdminData};
use crate::routes::Route;
use crate::sync::PageState;

#[derive(Subcommand)]
pub enum AdminSubcommands {
    /// Show counters and the current challenge
    Stats,

    /// List members
    Members {
        /// Filter by name or email (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Manage programs
    #[command(subcommand)]
    Program(ProgramAdmin),

    /// Manage trainers
    #[command(subcommand)]
    Trainer(TrainerAdmin),

    /// Manage challenges
    #[command(subcommand)]
    Challenge(ChallengeAdmin),
}

#[derive(Subcommand)]
pub enum ProgramAdmin {
    List,
    Add(ProgramFields),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ProgramFields,
    },
    Delete {
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args)]
pub struct ProgramFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    duration: Option<String>,
    /// Price or benefits line
    #[arg(long)]
    benefits: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
    #[arg(long)]
    trainer_id: Option<i64>,
}

impl ProgramFields {
    fn apply(self, input: &mut ProgramInput) {
        if let Some(name) = self.name {
            input.name = name;
        }
        if let Some(description) = self.description {
            input.description = description;
        }
        if self.duration.is_some() {
            input.duration = self.duration;
        }
        if self.benefits.is_some() {
            input.benefits = self.benefits;
        }
        if self.image_url.is_some() {
            input.image_url = self.image_url;
        }
        if self.trainer_id.is_some() {
            input.trainer_id = self.trainer_id;
        }
    }
}

#[derive(Subcommand)]
pub enum TrainerAdmin {
    List,
    Add(TrainerFields),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: TrainerFields,
    },
    Delete {
        id: i64,
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args)]
pub struct TrainerFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    bio: Option<String>,
    #[arg(long)]
    img_url: Option<String>,
    /// Achievement line (repeatable; replaces the list)
    #[arg(long = "achievement")]
    achievements: Vec<String>,
}

impl TrainerFields {
    fn apply(self, input: &mut TrainerInput) {
        if let Some(name) = self.name {
            input.name = name;
        }
        if self.title.is_some() {
            input.title = self.title;
        }
        if self.bio.is_some() {
            input.bio = self.bio;
        }
        if self.img_url.is_some() {
            input.img_url = self.img_url;
        }
        if !self.achievements.is_empty() {
            input.achievements = self.achievements;
        }
    }
}

#[derive(Subcommand)]
pub enum ChallengeAdmin {
    List,
    Add(ChallengeFields),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: ChallengeFields,
    },
    Delete {
        id: i64,
        #[arg(short, long)]
        force: bool,
    },
    /// Make a challenge the current one
    SetCurrent { id: i64 },
}

#[derive(Args)]
pub struct ChallengeFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
}

impl ChallengeFields {
    fn apply(self, input: &mut ChallengeInput) {
        if let Some(title) = self.title {
            input.title = title;
        }
        if let Some(description) = self.description {
            input.description = description;
        }
        if self.image_url.is_some() {
            input.image_url = self.image_url;
        }
    }
}

/// Pass the admin guard and load the dashboard; `None` after printing why not
async fn open_page(ctx: &Context) -> Result<Option<AdminDashboardPage>> {
    let gate = ctx.gate(Route::AdminDashboard)?;
    let api = ctx.api_for_gate(&gate)?;

    let mut page = match AdminDashboardPage::from_gate(api, gate, ctx.config.ui.admin_status_timeout()) {
        Ok(page) => page,
        Err(route) => {
            output::redirect(route);
            return Ok(None);
        }
    };

    let spinner = output::spinner("Loading admin data...");
    page.load().await;
    spinner.finish_and_clear();

    if let PageState::Error(message) = page.state() {
        output::failure(message);
        return Ok(None);
    }
    Ok(Some(page))
}

fn confirm_delete(what: &str, id: i64, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }
    Ok(Confirm::new()
        .with_prompt(format!("Delete {} #{}?", what, id))
        .default(false)
        .interact()?)
}

fn data(page: &AdminDashboardPage) -> Result<&AdminData> {
    match page.state().ready() {
        Some(data) => Ok(data),
        None => bail!("Admin data is not loaded"),
    }
}

pub(super) fn render_stats(data: &AdminData) {
    output::heading("Admin Dashboard");
    println!("  Members:    {}", data.stats.total_members.to_string().bold());
    println!("  Programs:   {}", data.stats.total_programs.to_string().bold());
    println!("  Trainers:   {}", data.stats.total_trainers.to_string().bold());
    println!("  Challenges: {}", data.stats.total_challenges.to_string().bold());
    println!();
    output::heading("Current Challenge");
    output::print_challenge(data.challenges.current());
}

fn report(page: &mut AdminDashboardPage) {
    page.unmount();
    if let Some(banner) = page.status().last() {
        output::banner(banner);
    }
}

impl AdminSubcommands {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let Some(mut page) = open_page(ctx).await? else {
            return Ok(());
        };

        match self {
            AdminSubcommands::Stats => render_stats(data(&page)?),
            AdminSubcommands::Members { search } => {
                page.set_search(search.unwrap_or_default());
                let members = page.visible_members();
                output::heading(&format!("Members ({})", members.len()));
                if members.is_empty() {
                    println!("  {}", "No members match.".dimmed());
                }
                for member in members {
                    println!("  {}", output::member_line(member));
                }
            }
            AdminSubcommands::Program(cmd) => cmd.run(&mut page).await?,
            AdminSubcommands::Trainer(cmd) => cmd.run(&mut page).await?,
            AdminSubcommands::Challenge(cmd) => cmd.run(&mut page).await?,
        }

        Ok(())
    }
}

impl ProgramAdmin {
    async fn run(self, page: &mut AdminDashboardPage) -> Result<()> {
        match self {
            ProgramAdmin::List => {
                let programs = &data(page)?.programs;
                output::heading(&format!("Programs ({})", programs.len()));
                for program in programs.iter() {
                    output::print_program(program);
                }
                return Ok(());
            }
            ProgramAdmin::Add(fields) => {
                let mut input = ProgramInput::default();
                fields.apply(&mut input);
                if input.name.trim().is_empty() {
                    bail!("--name is required");
                }
                page.create_program(&input).await;
            }
            ProgramAdmin::Edit { id, fields } => {
                let Some(existing) = data(page)?.programs.get(id) else {
                    bail!("No program with id {}", id);
                };
                let mut input = ProgramInput::from(existing);
                fields.apply(&mut input);
                page.update_program(id, &input).await;
            }
            ProgramAdmin::Delete { id, force } => {
                if !confirm_delete("program", id, force)? {
                    return Ok(());
                }
                page.delete_program(id).await;
            }
        }

        report(page);
        Ok(())
    }
}

impl TrainerAdmin {
    async fn run(self, page: &mut AdminDashboardPage) -> Result<()> {
        match self {
            TrainerAdmin::List => {
                let trainers = &data(page)?.trainers;
                output::heading(&format!("Trainers ({})", trainers.len()));
                for trainer in trainers.iter() {
                    output::print_trainer(trainer);
                }
                return Ok(());
            }
            TrainerAdmin::Add(fields) => {
                let mut input = TrainerInput::default();
                fields.apply(&mut input);
                if input.name.trim().is_empty() {
                    bail!("--name is required");
                }
                page.create_trainer(&input).await;
            }
            TrainerAdmin::Edit { id, fields } => {
                let Some(existing) = data(page)?.trainers.get(id) else {
                    bail!("No trainer with id {}", id);
                };
                let mut input = TrainerInput::from(existing);
                fields.apply(&mut input);
                page.update_trainer(id, &input).await;
            }
            TrainerAdmin::Delete { id, force } => {
                if !confirm_delete("trainer", id, force)? {
                    return Ok(());
                }
                page.delete_trainer(id).await;
            }
        }

        report(page);
        Ok(())
    }
}

impl ChallengeAdmin {
    async fn run(self, page: &mut AdminDashboardPage) -> Result<()> {
        match self {
            ChallengeAdmin::List => {
                let board = &data(page)?.challenges;
                output::heading(&format!("Challenges ({})", board.all().len()));
                for challenge in board.all() {
                    let marker = if board.is_current(challenge.id) {
                        "★".yellow().to_string()
                    } else {
                        " ".to_string()
                    };
                    println!("{} #{:<5} {}", marker, challenge.id, challenge.title.bold());
                }
                return Ok(());
            }
            ChallengeAdmin::Add(fields) => {
                let mut input = ChallengeInput::default();
                fields.apply(&mut input);
                if input.title.trim().is_empty() {
                    bail!("--title is required");
                }
                page.create_challenge(&input).await;
            }
            ChallengeAdmin::Edit { id, fields } => {
                let Some(existing) = data(page)?.challenges.all().iter().find(|c| c.id == id) else {
                    bail!("No challenge with id {}", id);
                };
                let mut input = ChallengeInput::from(existing);
                fields.apply(&mut input);
                page.update_challenge(id, &input).await;
            }
            ChallengeAdmin::Delete { id, force } => {
                if !confirm_delete("challenge", id, force)? {
                    return Ok(());
                }
                page.delete_challenge(id).await;
            }
            ChallengeAdmin::SetCurrent { id } => {
                page.set_current_challenge(id).await;
            }
        }

        report(page);
        Ok(())
    }
}
