//! neptune-members - manage Neptune organization members
//!
//! A CLI tool to invite users to and remove members from a Neptune
//! organization. Every backend call is retried with exponential backoff
//! on transient HTTP failures.
//!
//! # Example
//!
//! ```bash
//! # Invite a user, printing the invitation link
//! neptune-members invite my-org --invitee-email user@example.com
//!
//! # Remove a member
//! neptune-members remove my-org --removed-username jdoe
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod neptune;
pub mod output;
pub mod ui;

pub use cli::{AuthArgs, Cli, Command, InviteArgs, OutputFormat, RemoveArgs};
pub use error::{ErrorKind, NeptuneError, Result};
pub use neptune::{
    run_invite_command, run_remove_command, ApiToken, Invitation, InvitationOutcome,
    NeptuneClient, Removal, RetryPolicy, TokenResolver,
};
