//! Common CLI types shared across commands

use clap::{Args, ValueEnum};

use crate::config::credentials;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One invitation URL per line (default)
    Text,
    /// ASCII table
    Table,
    /// JSON array
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Authentication options shared by all commands
#[derive(Args, Debug)]
pub struct AuthArgs {
    /// API token of an organization admin
    #[arg(long, env = credentials::TOKEN_ENV_VAR, hide_env_values = true)]
    pub admin_api_token: Option<String>,
}
