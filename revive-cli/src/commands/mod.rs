mod admin;
mod auth;
mod catalog;
mod config_cmd;
mod contact;
mod dashboard;
mod membership;
mod open;
mod output;
mod profile;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::api::ApiClient;
use crate::config::Config;
use crate::routes::Route;
use crate::session::{Gate, GateState, Identity, Session};

pub use admin::AdminSubcommands;
pub use auth::{AdminLoginCommand, LoginCommand, LogoutCommand, SignupCommand, WhoamiCommand};
pub use catalog::CatalogCommand;
pub use contact::ContactCommand;
pub use dashboard::DashboardCommand;
pub use membership::{ChallengeSubcommands, MembershipCommand, ProgramSubcommands};
pub use open::OpenCommand;
pub use profile::ProfileCommand;

#[derive(Parser)]
#[command(name = "revive")]
#[command(about = "Terminal client for the Revive Fitness gym", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "REVIVE_CONFIG")]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as a member
    Login(LoginCommand),

    /// Sign in as an administrator
    AdminLogin(AdminLoginCommand),

    /// Create a member account
    Signup(SignupCommand),

    /// Sign out
    Logout(LogoutCommand),

    /// Show who is signed in
    Whoami(WhoamiCommand),

    /// Show your membership: attendance calendar, programs and challenge
    Membership(MembershipCommand),

    /// Join or leave programs
    #[command(subcommand)]
    Programs(ProgramSubcommands),

    /// Join or leave the current challenge
    #[command(subcommand)]
    Challenge(ChallengeSubcommands),

    /// Edit your profile and enrolled programs
    Profile(ProfileCommand),

    /// Browse programs, trainers and the current challenge
    Catalog(CatalogCommand),

    /// Send a message to the gym
    Contact(ContactCommand),

    /// Administer members, programs, trainers and challenges
    #[command(subcommand)]
    Admin(AdminSubcommands),

    /// Open a page by its path, e.g. /about or /membership
    Open(OpenCommand),

    /// Launch interactive membership dashboard
    Dashboard(DashboardCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Edit configuration file
    Edit,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// What every page command needs: configuration and the session store
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub session: Session,
}

impl Context {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => PathBuf::from(path),
            None => Config::config_file()?,
        };
        let config = Config::load_from(&config_path)?;
        let session = Session::from_config(&config)?;

        Ok(Self {
            config,
            config_path,
            session,
        })
    }

    /// Anonymous client
    pub fn api(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config)
    }

    /// Client carrying the identity's token
    pub fn api_for(&self, identity: &Identity) -> Result<ApiClient> {
        Ok(self.api()?.with_token(identity.token()))
    }

    /// Run the route guard for `route`
    pub fn gate(&self, route: Route) -> Result<GateState> {
        Gate::new(route).into_resolved(&self.session)
    }

    /// Client for a guarded page, authenticated when the gate let someone through
    pub fn api_for_gate(&self, gate: &GateState) -> Result<ApiClient> {
        match gate {
            GateState::Allow(identity) => self.api_for(identity),
            _ => self.api(),
        }
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        match self.command {
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
            Commands::Config(subcmd) => {
                let path = match self.config.as_deref() {
                    Some(path) => PathBuf::from(path),
                    None => Config::config_file()?,
                };
                match subcmd {
                    ConfigSubcommands::Show => config_cmd::show_config(&path).await,
                    ConfigSubcommands::Edit => config_cmd::edit_config(&path).await,
                    ConfigSubcommands::Init { force } => config_cmd::init_config(&path, force).await,
                }
            }
            command => {
                let ctx = Context::load(self.config.as_deref())?;
                command.run(&ctx).await
            }
        }
    }
}

impl Commands {
    async fn run(self, ctx: &Context) -> Result<()> {
        match self {
            Commands::Login(cmd) => cmd.execute(ctx).await,
            Commands::AdminLogin(cmd) => cmd.execute(ctx).await,
            Commands::Signup(cmd) => cmd.execute(ctx).await,
            Commands::Logout(cmd) => cmd.execute(ctx).await,
            Commands::Whoami(cmd) => cmd.execute(ctx).await,
            Commands::Membership(cmd) => cmd.execute(ctx).await,
            Commands::Programs(subcmd) => subcmd.execute(ctx).await,
            Commands::Challenge(subcmd) => subcmd.execute(ctx).await,
            Commands::Profile(cmd) => cmd.execute(ctx).await,
            Commands::Catalog(cmd) => cmd.execute(ctx).await,
            Commands::Contact(cmd) => cmd.execute(ctx).await,
            Commands::Admin(subcmd) => subcmd.execute(ctx).await,
            Commands::Open(cmd) => cmd.execute(ctx).await,
            Commands::Dashboard(cmd) => cmd.execute(ctx).await,
            // Handled before the session store is opened
            Commands::Config(_) | Commands::Completions { .. } => Ok(()),
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
