//! Organization member command handlers

use log::debug;

use crate::cli::{Cli, InviteArgs, RemoveArgs};
use crate::neptune::NeptuneClient;
use crate::output::output_invitations;
use crate::ui::{create_spinner, finish_spinner};

use super::models::InvitationOutcome;

/// Run the invite command
pub async fn run_invite_command(
    client: &NeptuneClient,
    cli: &Cli,
    args: &InviteArgs,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let org = &args.organization;
    let email = &args.email;

    let spinner = create_spinner(&format!("Inviting {} to '{}'...", email, org), cli.batch);
    let outcome = client.invite_member(org, email).await;
    finish_spinner(spinner);

    match outcome? {
        InvitationOutcome::AlreadyPending { invitee } => {
            println!("ERROR: Pending invitation for '{}'", invitee);
        }
        InvitationOutcome::Created(invitations) => {
            debug!("Printing {} invitation(s)", invitations.len());
            output_invitations(&invitations, client.app_url(), args.output)?;
        }
    }

    Ok(())
}

/// Run the remove command
pub async fn run_remove_command(
    client: &NeptuneClient,
    cli: &Cli,
    args: &RemoveArgs,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let spinner = create_spinner(
        &format!(
            "Removing '{}' from '{}'...",
            args.username, args.organization
        ),
        cli.batch,
    );
    let removal = client
        .remove_member(&args.organization, &args.username)
        .await;
    finish_spinner(spinner);

    println!("✓ {}", removal?);

    Ok(())
}
