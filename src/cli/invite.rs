//! Invite command arguments

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use super::common::{AuthArgs, OutputFormat};

/// Arguments for 'invite' command
#[derive(Parser, Debug)]
pub struct InviteArgs {
    /// Organization to invite the user to
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub organization: String,

    /// Email address to invite
    #[arg(long = "invitee-email", value_name = "EMAIL")]
    pub email: String,

    #[command(flatten)]
    pub auth: AuthArgs,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}
