//! # Transmission RPC client.
//!
//! usage:
//!
//! ```rust,ignore
//! use transmission_rpc_client::TransmissionClient;
//! use transmission_rpc_types::{AddOptions, RemoveOptions, TorrentField};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TransmissionClient::new("localhost", 9091, "/transmission/")?;
//!     let added = client
//!         .add_torrent("https://example.org/file.torrent", &AddOptions::default())
//!         .await?;
//!     println!("Added torrent: {:?}", added);
//!
//!     let torrents = client
//!         .get_torrents(&[TorrentField::Id, TorrentField::Name, TorrentField::PercentDone], None)
//!         .await?;
//!     println!("Torrents: {:?}", torrents.arguments);
//!
//!     if let Some(added) = added.arguments {
//!         let options = RemoveOptions { ids: added.id.into(), delete_local_data: true };
//!         client.remove_torrent(&options).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!

#[cfg(test)]
use {libc as _, tempfile as _, tracing_subscriber as _};

mod client;
mod config;
mod transport;
mod wire;

#[cfg(test)]
mod testutil;

pub use client::TransmissionClient;
pub use config::{ClientConfig, Credentials, DEFAULT_BASE_PATH, DEFAULT_HOST, DEFAULT_PORT};
pub use transport::{HttpTransport, SESSION_ID_HEADER};
pub use transmission_rpc_types as types;
