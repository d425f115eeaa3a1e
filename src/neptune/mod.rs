//! Neptune backend client module
//!
//! Token handling, the HTTP client with its retry policy, and the
//! organization member operations built on top of them.

mod client;
mod credentials;
pub mod members;
pub mod retry;

pub use client::NeptuneClient;
pub use credentials::{ApiToken, TokenResolver};
pub use members::{
    run_invite_command, run_remove_command, Invitation, InvitationOutcome, Removal,
};
pub use retry::RetryPolicy;
