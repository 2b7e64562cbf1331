//! # Transmission RPC Types
//!
//! This crate defines the request, response and error types shared by the
//! Transmission RPC client and its front ends.

mod args;
mod envelope;
mod error;
mod response;
mod torrent;

pub use args::{AddOptions, GetOptions, Ids, RemoveOptions, TorrentId, TorrentSource};
pub use envelope::{Empty, RpcRequest, SUCCESS, TmResponse};
pub use error::RpcError;
pub use response::{AddResponseType, AddResult, SessionStats, StatsDetails};
pub use torrent::{
    FileStat, Peer, PeersFrom, Torrent, TorrentField, TorrentFile, Tracker, TrackerStat,
    dedup_fields,
};
