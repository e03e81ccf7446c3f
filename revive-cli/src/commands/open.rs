use anyhow::Result;
use clap::Args;

use super::{admin, catalog, membership, output, Context};
use crate::pages::{AdminDashboardPage, MarketingPage, ProfileEditPage};
use crate::routes::Route;

/// Resolve a page path the way the site router does, guard included
#[derive(Args)]
pub struct OpenCommand {
    /// Page path, e.g. /programs or /admin/dashboard
    path: String,
}

impl OpenCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let route = Route::from_path(&self.path);
        tracing::debug!("Opening {} as {:?}", self.path, route);

        match route {
            Route::Home => catalog::render_marketing(&MarketingPage::home()),
            Route::About => catalog::render_marketing(&MarketingPage::about()),
            Route::Programs => catalog::show_programs(ctx).await?,
            Route::Contact => {
                println!("Send us a message with: revive contact");
            }
            Route::Signup => println!("Create an account with: revive signup"),
            Route::Login => println!("Sign in with: revive login"),
            Route::AdminLogin => println!("Sign in with: revive admin-login"),
            Route::Membership => {
                if let Some(page) = membership::open_page(ctx).await? {
                    membership::render(&page, &ctx.config.ui.date_format);
                    page.unmount();
                }
            }
            Route::ProfileEdit => {
                let gate = ctx.gate(route)?;
                match ProfileEditPage::from_gate(
                    ctx.api_for_gate(&gate)?,
                    gate,
                    ctx.config.ui.form_status_timeout(),
                ) {
                    Ok(_) => println!("Edit your profile with: revive profile"),
                    Err(next) => output::redirect(next),
                }
            }
            Route::AdminDashboard => {
                let gate = ctx.gate(route)?;
                let api = ctx.api_for_gate(&gate)?;
                match AdminDashboardPage::from_gate(api, gate, ctx.config.ui.admin_status_timeout()) {
                    Ok(mut page) => {
                        page.load().await;
                        match page.state().ready() {
                            Some(data) => admin::render_stats(data),
                            None => output::failure(page.state().error().unwrap_or_default()),
                        }
                        page.unmount();
                    }
                    Err(next) => output::redirect(next),
                }
            }
            Route::NotFound => {
                output::failure(&format!("Page not found: {}", self.path));
            }
        }

        Ok(())
    }
}
