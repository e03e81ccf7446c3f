use anyhow::Result;
use clap::Args;
use std::time::Duration;

use super::{output, Context};
use crate::pages::MembershipPage;
use crate::routes::Route;
use crate::ui::{App, Dashboard};

#[derive(Args)]
pub struct DashboardCommand {
    /// Refresh interval in milliseconds
    #[arg(long)]
    tick_rate: Option<u64>,
}

impl DashboardCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let gate = ctx.gate(Route::Membership)?;
        let api = ctx.api_for_gate(&gate)?;

        let page = match MembershipPage::from_gate(api, gate, ctx.config.ui.form_status_timeout()) {
            Ok(page) => page,
            Err(route) => {
                output::redirect(route);
                return Ok(());
            }
        };

        let tick_rate = Duration::from_millis(self.tick_rate.unwrap_or(ctx.config.ui.tick_rate_ms));
        let app = App::new(page, ctx.config.ui.date_format.clone());

        let mut dashboard = Dashboard::new(app, tick_rate)?;
        // Terminal polling blocks; keep the runtime free for the page's fetches
        tokio::task::block_in_place(|| dashboard.run())
    }
}
