//! # Transmission RPC command line
//!
//! ## Usage
//!
//! ```sh,ignore
//! transmission-rpc add https://example.org/file.torrent --paused
//! transmission-rpc get --fields id,name,eta,percentDone,labels
//! transmission-rpc remove --id 1 --delete-local-data
//! ```
//!
//! Connection settings are read from flags, `TRANSMISSION_*` environment
//! variables or a `.env` file.

use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use transmission_rpc_client::TransmissionClient;
use transmission_rpc_types::TmResponse;

mod cli;

use cli::{Cli, CliError, Command};

/// Initializes the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints a reply as pretty JSON, warning when the daemon reported a failure.
fn print_reply<T: Serialize>(response: &TmResponse<T>) -> Result<(), CliError> {
    if !response.is_success() {
        warn!("Daemon reported: {}", response.result);
    }
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = TransmissionClient::with_config(cli.config())?;
    debug!("Using {}", client.endpoint());

    match cli.command {
        Command::Add(args) => {
            let response = client.add_torrent(args.source()?, &args.options()).await?;
            print_reply(&response)
        }
        Command::Get(args) => {
            let response = client
                .get_torrents(&args.fields, Some(&args.options()))
                .await?;
            print_reply(&response)
        }
        Command::Remove(args) => print_reply(&client.remove_torrent(&args.options()).await?),
        Command::Start(args) => print_reply(&client.start_torrents(&args.ids()).await?),
        Command::Stop(args) => print_reply(&client.stop_torrents(&args.ids()).await?),
        Command::Stats => print_reply(&client.session_stats().await?),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    run(cli).await?;

    Ok(())
}
