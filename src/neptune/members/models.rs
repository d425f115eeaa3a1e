//! Organization invitation and membership data models

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{api, invitation};

/// Request payload for creating organization invitations
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewOrganizationInvitations {
    pub organization_identifier: String,
    pub invitations_entries: Vec<InvitationEntry>,
}

/// Single entry of an invitation request
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InvitationEntry {
    pub invitee: String,
    pub invitation_type: String,
    pub role_grant: String,
    pub add_to_all_projects: bool,
}

impl NewOrganizationInvitations {
    /// Invite one email as a plain member, without access to existing projects
    pub fn new(organization: &str, invitee: &str) -> Self {
        Self {
            organization_identifier: organization.to_string(),
            invitations_entries: vec![InvitationEntry {
                invitee: invitee.to_string(),
                invitation_type: invitation::INVITATION_TYPE.to_string(),
                role_grant: invitation::ROLE_GRANT.to_string(),
                add_to_all_projects: invitation::ADD_TO_ALL_PROJECTS,
            }],
        }
    }
}

/// Response of the invitation endpoint
#[derive(Deserialize, Debug, Default)]
pub struct OrganizationInvitations {
    #[serde(default)]
    pub invitations: Option<Vec<Invitation>>,
}

/// Pending invitation created by the backend
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id: String,
    pub invitee: String,
}

impl Invitation {
    /// Link the invitee opens to accept the invitation
    pub fn acceptance_url(&self, app_url: &str) -> String {
        format!(
            "{}/{}/{}",
            app_url.trim_end_matches('/'),
            api::INVITATION_ACCEPT_PATH,
            self.id
        )
    }
}

/// Result of inviting a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvitationOutcome {
    /// Backend created these invitations (possibly none)
    Created(Vec<Invitation>),
    /// The invitee already has a pending invitation
    AlreadyPending { invitee: String },
}

impl InvitationOutcome {
    /// Invitations created by this call
    pub fn invitations(&self) -> &[Invitation] {
        match self {
            InvitationOutcome::Created(invitations) => invitations,
            InvitationOutcome::AlreadyPending { .. } => &[],
        }
    }

    pub fn is_already_pending(&self) -> bool {
        matches!(self, InvitationOutcome::AlreadyPending { .. })
    }
}

/// Confirmation of a member removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub organization: String,
    pub user_id: String,
}

impl fmt::Display for Removal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Removed '{}' from organization '{}'",
            self.user_id, self.organization
        )
    }
}
