use anyhow::Result;
use clap::Args;
use dialoguer::Input;

use super::{output, Context};
use crate::pages::ContactPage;

#[derive(Args)]
pub struct ContactCommand {
    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(short, long)]
    email: Option<String>,

    /// Optional phone number
    #[arg(short, long)]
    phone: Option<String>,

    #[arg(short, long)]
    message: Option<String>,
}

fn field(value: Option<String>, prompt: &str, optional: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new()
            .with_prompt(prompt)
            .allow_empty(optional)
            .interact_text()?),
    }
}

impl ContactCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        println!("Revive Fitness - Contact Us");
        println!();

        let mut page = ContactPage::new(ctx.api()?, ctx.config.ui.form_status_timeout());
        page.form.first_name = field(self.first_name, "First name", false)?;
        page.form.last_name = field(self.last_name, "Last name", false)?;
        page.form.email = field(self.email, "Email", false)?;
        page.form.phone = field(self.phone, "Phone (optional)", true)?;
        page.form.message = field(self.message, "Message", false)?;

        let spinner = output::spinner("Sending...");
        let submitted = page.submit().await;
        spinner.finish_and_clear();

        match submitted {
            Ok(_) => {
                if let Some(banner) = page.status().last() {
                    output::banner(banner);
                }
            }
            Err(e) => output::failure(&e.to_string()),
        }

        Ok(())
    }
}
