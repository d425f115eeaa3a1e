//! CLI argument parsing

mod common;
mod invite;
mod remove;

use clap::{Parser, Subcommand};

use crate::config::{credentials, defaults};

pub use common::{AuthArgs, OutputFormat};
pub use invite::InviteArgs;
pub use remove::RemoveArgs;

/// Neptune organization member management CLI
#[derive(Parser, Debug)]
#[command(name = "neptune-members")]
#[command(version)]
#[command(about = "Invite and remove Neptune organization members", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Batch mode: no spinners
    #[arg(long, global = true, default_value_t = false)]
    pub batch: bool,

    /// Override the API address carried by the token
    #[arg(long, global = true, env = credentials::API_URL_ENV_VAR)]
    pub api_url: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Invite a user to an organization by email
    Invite(InviteArgs),

    /// Remove a member from an organization
    #[command(visible_alias = "rm")]
    Remove(RemoveArgs),
}

impl Command {
    /// Authentication options of the selected command
    pub fn auth(&self) -> &AuthArgs {
        match self {
            Command::Invite(args) => &args.auth,
            Command::Remove(args) => &args.auth,
        }
    }
}
