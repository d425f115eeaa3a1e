//! Organization members module - invite and remove org members

mod api;
mod commands;
mod models;

pub use commands::{run_invite_command, run_remove_command};
pub use models::{
    Invitation, InvitationEntry, InvitationOutcome, NewOrganizationInvitations,
    OrganizationInvitations, Removal,
};
