//! neptune-members - Main entry point

use clap::Parser;
use log::{debug, info};
use std::process::ExitCode;

use neptune_members::{
    run_invite_command, run_remove_command, ApiToken, Cli, Command, NeptuneClient, TokenResolver,
};
use neptune_members::ui::{create_spinner, finish_spinner};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting neptune-members v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli).await {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let raw_token = TokenResolver::resolve(cli.command.auth().admin_api_token.as_deref())?;
    let token = ApiToken::parse(&raw_token)?;

    let mut client = match &cli.api_url {
        Some(api_url) => {
            debug!("Using API address override: {}", api_url);
            NeptuneClient::with_api_address(token, api_url.clone())
        }
        None => NeptuneClient::new(token),
    };

    let spinner = create_spinner("Authenticating...", cli.batch);
    let login = client.login().await;
    finish_spinner(spinner);
    login?;

    match &cli.command {
        Command::Invite(args) => run_invite_command(&client, cli, args).await,
        Command::Remove(args) => run_remove_command(&client, cli, args).await,
    }
}
