//! Remove command arguments

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use super::common::AuthArgs;

/// Arguments for 'remove' command
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Organization to remove the member from
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub organization: String,

    /// Identifier of the member to remove
    ///
    /// The backend expects the member's user id; it is passed through unchanged.
    #[arg(
        long = "removed-username",
        value_name = "USER_ID",
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub username: String,

    #[command(flatten)]
    pub auth: AuthArgs,
}
