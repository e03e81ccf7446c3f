use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{output, Context};
use crate::pages::{MarketingPage, ProgramsPage, ProgramsView};

pub(super) fn render_marketing(page: &MarketingPage) {
    println!("{}", console::style(page.title).bold().yellow());
    println!("{}", page.tagline.italic());
    println!();

    for (heading, body) in page.sections {
        println!("{}", heading.bold());
        println!("  {}", body);
        println!();
    }
}

pub(super) fn render_programs(view: &ProgramsView) {
    output::heading("Our Programs");
    if view.programs.is_empty() {
        println!("  {}", "No programs available right now.".dimmed());
    }
    for program in &view.programs {
        output::print_program(program);
        if let Some(benefits) = program.benefits.as_deref().filter(|b| !b.is_empty()) {
            println!("         {}", benefits.cyan());
        }
    }
    println!();

    output::heading("Current Challenge");
    output::print_challenge(view.challenge.as_ref());
    println!();

    output::heading("Our Trainers");
    if view.trainers.is_empty() {
        println!("  {}", "No trainers listed yet.".dimmed());
    }
    for trainer in &view.trainers {
        output::print_trainer(trainer);
    }
}

/// Load the public programs page
pub(super) async fn show_programs(ctx: &Context) -> Result<()> {
    let mut page = ProgramsPage::new(ctx.api()?);

    let spinner = output::spinner("Loading programs...");
    let state = page.load().await;
    spinner.finish_and_clear();

    if let Some(view) = state.ready() {
        render_programs(view);
    }
    Ok(())
}

#[derive(Args)]
pub struct CatalogCommand {}

impl CatalogCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        show_programs(ctx).await
    }
}
