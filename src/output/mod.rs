//! Output formatting module
//!
//! Handles the text, table and JSON renderings of command results

pub mod invitations;

pub use invitations::output_invitations;
