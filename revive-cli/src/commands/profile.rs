use anyhow::{Context as _, Result};
use clap::Args;
use dialoguer::{Input, MultiSelect, Select};
use std::path::{Path, PathBuf};

use super::{output, Context};
use crate::api::PhotoFile;
use crate::pages::ProfileEditPage;
use crate::routes::Route;
use crate::sync::PageState;

#[derive(Args)]
pub struct ProfileCommand {
    /// New display name
    #[arg(short, long)]
    name: Option<String>,

    /// Use this image URL as the profile photo
    #[arg(long, conflicts_with_all = ["photo", "generate_avatar"])]
    photo_url: Option<String>,

    /// Upload this image file as the profile photo
    #[arg(long, conflicts_with = "generate_avatar")]
    photo: Option<PathBuf>,

    /// Replace the photo with a generated avatar
    #[arg(long)]
    generate_avatar: bool,

    /// Toggle enrollment in a program (repeatable)
    #[arg(short, long = "toggle", value_name = "PROGRAM_ID")]
    toggles: Vec<i64>,
}

impl ProfileCommand {
    fn is_interactive(&self) -> bool {
        self.name.is_none()
            && self.photo_url.is_none()
            && self.photo.is_none()
            && !self.generate_avatar
            && self.toggles.is_empty()
    }

    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let gate = ctx.gate(Route::ProfileEdit)?;
        let api = ctx.api_for_gate(&gate)?;

        let mut page = match ProfileEditPage::from_gate(api, gate, ctx.config.ui.form_status_timeout()) {
            Ok(page) => page,
            Err(route) => {
                output::redirect(route);
                return Ok(());
            }
        };

        let spinner = output::spinner("Loading profile...");
        page.load().await;
        spinner.finish_and_clear();

        if let PageState::Error(message) = page.state() {
            output::failure(message);
            return Ok(());
        }

        output::heading("Edit Profile");

        if self.is_interactive() {
            edit_interactively(&mut page)?;
        } else {
            if let Some(name) = self.name {
                page.form.name = name;
            }
            if let Some(url) = self.photo_url {
                page.form.set_photo_url(url);
            }
            if let Some(path) = self.photo.as_deref() {
                page.form.choose_file(read_photo(path)?);
            }
            if self.generate_avatar {
                page.form.generate_avatar();
            }
            for id in self.toggles {
                let now = page.form.toggle_program(id);
                println!("  program #{} {}", id, if now { "selected" } else { "removed" });
            }
        }

        let spinner = output::spinner("Saving...");
        let next = page.submit(&ctx.session).await?;
        spinner.finish_and_clear();

        page.unmount();
        if let Some(banner) = page.status().last() {
            output::banner(banner);
        }
        if let Some(route) = next {
            println!("See your membership with: revive open {}", route);
        }

        Ok(())
    }
}

fn read_photo(path: &Path) -> Result<PhotoFile> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());

    Ok(PhotoFile { file_name, bytes })
}

fn edit_interactively(page: &mut ProfileEditPage) -> Result<()> {
    let name: String = Input::new()
        .with_prompt("Name")
        .with_initial_text(page.form.name.clone())
        .interact_text()?;
    page.form.name = name;

    let choices = ["Keep current photo", "Photo URL", "Upload a file", "Generate avatar"];
    match Select::new()
        .with_prompt("Profile photo")
        .items(&choices)
        .default(0)
        .interact()?
    {
        1 => {
            let url: String = Input::new()
                .with_prompt("Photo URL")
                .with_initial_text(page.form.photo_url.clone())
                .interact_text()?;
            page.form.set_photo_url(url);
        }
        2 => {
            let path: String = Input::new().with_prompt("Image file").interact_text()?;
            page.form.choose_file(read_photo(Path::new(path.trim()))?);
        }
        3 => page.form.generate_avatar(),
        _ => {}
    }

    let programs = match page.state().ready() {
        Some(data) => data.programs.clone(),
        None => Vec::new(),
    };
    if programs.is_empty() {
        return Ok(());
    }

    let labels: Vec<String> = programs.iter().map(output::program_line).collect();
    let selected: Vec<bool> = programs
        .iter()
        .map(|p| page.form.program_ids.contains(&p.id))
        .collect();

    let picked = MultiSelect::new()
        .with_prompt("Enrolled programs (space to toggle)")
        .items(&labels)
        .defaults(&selected)
        .interact()?;

    page.form.program_ids = picked.into_iter().map(|i| programs[i].id).collect();
    Ok(())
}
