//! Output formatting for created invitations

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::neptune::Invitation;

/// Serializable invitation for JSON output
#[derive(Serialize)]
struct JsonInvitation<'a> {
    id: &'a str,
    invitee: &'a str,
    url: String,
}

/// Print invitations in the requested format
pub fn output_invitations(
    invitations: &[Invitation],
    app_url: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = match format {
        OutputFormat::Text => format_text(invitations, app_url),
        OutputFormat::Table => format_table(invitations, app_url),
        OutputFormat::Json => format_json(invitations, app_url)?,
    };
    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    Ok(())
}

/// One acceptance URL per line
fn format_text(invitations: &[Invitation], app_url: &str) -> String {
    invitations
        .iter()
        .map(|i| i.acceptance_url(app_url))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_table(invitations: &[Invitation], app_url: &str) -> String {
    if invitations.is_empty() {
        return "No invitations created".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("ID"), Cell::new("INVITEE"), Cell::new("URL")]);

    for invitation in invitations {
        table.add_row(vec![
            Cell::new(&invitation.id),
            Cell::new(&invitation.invitee),
            Cell::new(invitation.acceptance_url(app_url)),
        ]);
    }

    table.to_string()
}

fn format_json(invitations: &[Invitation], app_url: &str) -> serde_json::Result<String> {
    let output: Vec<_> = invitations
        .iter()
        .map(|i| JsonInvitation {
            id: &i.id,
            invitee: &i.invitee,
            url: i.acceptance_url(app_url),
        })
        .collect();
    serde_json::to_string_pretty(&output)
}
