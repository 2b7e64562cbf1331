//! Typed reply payloads.

use serde::{Deserialize, Serialize};

/// Which variant key the daemon used in a `torrent-add` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddResponseType {
    /// The torrent is new (`torrent-added`).
    TorrentAdded,
    /// The torrent was already known (`torrent-duplicate`).
    TorrentDuplicate,
}

impl AddResponseType {
    /// Every variant, in the order the client probes the reply for them.
    pub const ALL: [Self; 2] = [Self::TorrentAdded, Self::TorrentDuplicate];

    /// The reply key carrying the descriptor.
    pub fn key(self) -> &'static str {
        match self {
            Self::TorrentAdded => "torrent-added",
            Self::TorrentDuplicate => "torrent-duplicate",
        }
    }
}

/// Flattened `torrent-add` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResult {
    /// Whether the torrent was added or already present.
    pub response_type: AddResponseType,
    /// Session-local id.
    pub id: i64,
    /// Torrent name.
    pub name: String,
    /// Hex info hash.
    pub hash_string: String,
}

// The below follow the daemon's `session-stats` reply.

/// Session statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)] // rationale: these are the same fields as in Transmission RPC
pub struct SessionStats {
    pub active_torrent_count: i64,

    #[serde(rename = "cumulative-stats")]
    pub cumulative_stats: StatsDetails,

    #[serde(rename = "current-stats")]
    pub current_stats: StatsDetails,

    pub download_speed: i64,

    pub paused_torrent_count: i64,

    pub torrent_count: i64,

    pub upload_speed: i64,
}

/// Detailed statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct StatsDetails {
    pub downloaded_bytes: i64,

    pub files_added: i64,

    pub seconds_active: i64,

    pub session_count: i64,

    pub uploaded_bytes: i64,
}
