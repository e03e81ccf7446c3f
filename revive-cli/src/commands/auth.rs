use anyhow::Result;
use chrono::Local;
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Password};

use super::{output, Context};
use crate::pages::{LoginForm, NavBar, SignupError, SignupForm};
use crate::session::{IdentityKind, LoginError};

/// Prompt for a value unless it was given on the command line
fn text_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

fn password_or_prompt(value: Option<String>) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Password::new().with_prompt("Password").interact()?),
    }
}

#[derive(Args)]
pub struct LoginCommand {
    /// Member email
    #[arg(short, long)]
    email: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long, env = "REVIVE_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        println!("Revive Fitness - Member Login");
        println!();

        let email = text_or_prompt(self.email, "Email")?;
        let password = password_or_prompt(self.password)?;

        let form = LoginForm::new(email, password);
        let api = ctx.api()?;

        let spinner = output::spinner("Signing in...");
        let result = form.submit_member(&ctx.session, &api).await;
        spinner.finish_and_clear();

        match result {
            Ok((session, next)) => {
                output::success("Login successful!");
                println!();
                println!("Welcome back, {}!", session.member.name.bold());
                println!("Continue with: revive open {}", next);
                Ok(())
            }
            Err(LoginError::Store(e)) => Err(e),
            Err(e) => {
                output::failure(&e.to_string());
                Ok(())
            }
        }
    }
}

#[derive(Args)]
pub struct AdminLoginCommand {
    /// Administrator id
    #[arg(long)]
    admin_id: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long, env = "REVIVE_ADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl AdminLoginCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        println!("Revive Fitness - Admin Login");
        println!();

        let admin_id = text_or_prompt(self.admin_id, "Admin ID")?;
        let password = password_or_prompt(self.password)?;

        let form = LoginForm::new(admin_id, password);
        let api = ctx.api()?;

        let spinner = output::spinner("Signing in...");
        let result = form.submit_admin(&ctx.session, &api).await;
        spinner.finish_and_clear();

        match result {
            Ok((session, next)) => {
                output::success("Admin login successful!");
                println!();
                println!("Signed in as {}", session.admin.admin_id.bold());
                println!("Continue with: revive open {}", next);
                Ok(())
            }
            Err(LoginError::Store(e)) => Err(e),
            Err(e) => {
                output::failure(&e.to_string());
                Ok(())
            }
        }
    }
}

#[derive(Args)]
pub struct SignupCommand {
    /// Full name
    #[arg(short, long)]
    name: Option<String>,

    /// Email address
    #[arg(short, long)]
    email: Option<String>,

    /// Request an administrator account
    #[arg(long)]
    admin: bool,

    /// Administrator id (with --admin)
    #[arg(long, requires = "admin")]
    admin_id: Option<String>,

    /// Password (prompted twice when omitted)
    #[arg(long, env = "REVIVE_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl SignupCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        println!("Revive Fitness - Create Account");
        println!();

        let mut form = SignupForm {
            as_admin: self.admin,
            ..SignupForm::default()
        };

        if form.as_admin {
            form.admin_id = text_or_prompt(self.admin_id, "Admin ID")?;
        } else {
            form.name = text_or_prompt(self.name, "Full name")?;
            form.email = text_or_prompt(self.email, "Email")?;
        }

        match self.password {
            Some(password) => {
                form.confirm = password.clone();
                form.password = password;
            }
            None => {
                form.password = Password::new().with_prompt("Password").interact()?;
                form.confirm = Password::new().with_prompt("Confirm password").interact()?;
            }
        }

        let api = ctx.api()?;
        let today = Local::now().date_naive();

        match form.submit(&api, today).await {
            Ok(_) => {
                output::success(crate::pages::auth::SIGNUP_SUCCESS);
                println!();
                println!("Sign in with: revive login");
            }
            Err(SignupError::AdminUnavailable) => {
                output::failure(crate::pages::auth::ADMIN_SIGNUP_UNAVAILABLE);
            }
            Err(e) => output::failure(&e.to_string()),
        }

        Ok(())
    }
}

#[derive(Args)]
pub struct LogoutCommand {
    /// Sign out the administrator instead of the member
    #[arg(long)]
    admin: bool,
}

impl LogoutCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let kind = if self.admin {
            IdentityKind::Admin
        } else {
            IdentityKind::Member
        };

        if !ctx.session.check(kind)?.valid {
            println!("You are not logged in.");
            return Ok(());
        }

        let next = ctx.session.logout(kind)?;
        output::success("Logged out.");
        println!("Sign in again with: revive open {}", next);

        Ok(())
    }
}

#[derive(Args)]
pub struct WhoamiCommand {}

impl WhoamiCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let nav = NavBar::for_session(&ctx.session)?;

        match &nav {
            NavBar::Guest => {
                println!("You are not logged in.");
                println!();
                println!("Use 'revive login' or 'revive admin-login' to sign in.");
            }
            NavBar::Member { name } => {
                println!("✓ Signed in as member:");
                println!();
                println!("  Name: {}", name);
                if let Some(member) = ctx.session.current_member()? {
                    println!("  Email: {}", member.member.email);
                    println!("  Member ID: {}", member.member.id);
                }
            }
            NavBar::Admin { admin_id } => {
                println!("✓ Signed in as administrator:");
                println!();
                println!("  Admin ID: {}", admin_id);
            }
        }

        println!();
        let links: Vec<&str> = crate::pages::nav::NAV_LINKS.iter().map(|r| r.path()).collect();
        println!("Pages: {}  ·  account: {}", links.join("  "), nav.account_link());

        Ok(())
    }
}
