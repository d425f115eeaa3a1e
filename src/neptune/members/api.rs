//! Organization member API operations

use log::{debug, info};

use crate::config::api;
use crate::error::{ErrorKind, NeptuneError, Result};
use crate::neptune::NeptuneClient;

use super::models::{InvitationOutcome, NewOrganizationInvitations, OrganizationInvitations, Removal};

impl NeptuneClient {
    /// Invite an email address to an organization as a member
    ///
    /// A pending invitation for the same email is reported as
    /// `InvitationOutcome::AlreadyPending` instead of an error.
    pub async fn invite_member(&self, org: &str, invitee: &str) -> Result<InvitationOutcome> {
        require_non_empty("organization", org)?;

        let url = format!("{}/{}", self.base_url(), api::ORGANIZATION_INVITATIONS);
        let payload = NewOrganizationInvitations::new(org, invitee);
        let action = format!("invite '{}' to organization '{}'", invitee, org);
        let action = action.as_str();

        debug!("Inviting {} to organization {}", invitee, org);

        let result = self
            .retry_policy()
            .execute(move || {
                let request = self.post(&url).json(&payload);
                async move {
                    let response = request.send().await?;
                    let response = Self::check_status(response, action).await?;
                    Self::parse_json_or_default::<OrganizationInvitations>(response).await
                }
            })
            .await;

        match result {
            Ok(body) => {
                let invitations = body.invitations.unwrap_or_default();
                debug!(
                    "Created {} invitation(s) for {} in {}",
                    invitations.len(),
                    invitee,
                    org
                );
                Ok(InvitationOutcome::Created(invitations))
            }
            Err(err) => match err.kind() {
                ErrorKind::Conflict => {
                    info!("Pending invitation for '{}' already exists: {}", invitee, err);
                    Ok(InvitationOutcome::AlreadyPending {
                        invitee: invitee.to_string(),
                    })
                }
                ErrorKind::Transient | ErrorKind::Other => Err(err),
            },
        }
    }

    /// Remove a member from an organization
    ///
    /// `user_id` is the backend's member identifier, passed through as is.
    pub async fn remove_member(&self, org: &str, user_id: &str) -> Result<Removal> {
        require_non_empty("organization", org)?;
        require_non_empty("user id", user_id)?;

        let url = format!(
            "{}/{}/{}/members/{}",
            self.base_url(),
            api::ORGANIZATIONS,
            urlencoding::encode(org),
            urlencoding::encode(user_id)
        );
        let action = format!("remove '{}' from organization '{}'", user_id, org);
        let action = action.as_str();

        debug!("Removing {} from organization {}", user_id, org);

        self.retry_policy()
            .execute(move || {
                let request = self.delete(&url);
                async move {
                    let response = request.send().await?;
                    Self::check_status(response, action).await?;
                    Ok(())
                }
            })
            .await?;

        debug!("Removed {} from {}", user_id, org);

        Ok(Removal {
            organization: org.to_string(),
            user_id: user_id.to_string(),
        })
    }
}

/// Reject blank identifiers before they end up as empty path segments
fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NeptuneError::Config(format!("{} must not be empty", field)));
    }
    Ok(())
}
