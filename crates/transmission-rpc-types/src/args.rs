//! Argument bags for the torrent methods.
//!
//! Field names are snake_case here and hyphenated on the wire
//! (`download_dir` is sent as `download-dir`). Unset options are never
//! serialized.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Where the daemon should take the torrent from.
#[derive(Clone, PartialEq, Eq)]
pub enum TorrentSource {
    /// A URL, magnet link or path readable by the daemon. Sent as `filename`.
    Locator(String),
    /// Raw `.torrent` contents. Sent base64-encoded as `metainfo`.
    Metainfo(Vec<u8>),
}

impl fmt::Debug for TorrentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locator(locator) => f.debug_tuple("Locator").field(locator).finish(),
            Self::Metainfo(bytes) => write!(f, "Metainfo({} bytes)", bytes.len()),
        }
    }
}

impl From<&str> for TorrentSource {
    fn from(locator: &str) -> Self {
        Self::Locator(locator.to_owned())
    }
}

impl From<String> for TorrentSource {
    fn from(locator: String) -> Self {
        Self::Locator(locator)
    }
}

impl From<Vec<u8>> for TorrentSource {
    fn from(metainfo: Vec<u8>) -> Self {
        Self::Metainfo(metainfo)
    }
}

impl From<&[u8]> for TorrentSource {
    fn from(metainfo: &[u8]) -> Self {
        Self::Metainfo(metainfo.to_vec())
    }
}

/// Optional `torrent-add` arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AddOptions {
    /// Cookie header value the daemon sends when fetching a locator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<String>,
    /// Directory the data is stored in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
    /// Labels attached to the torrent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Add without starting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    /// Maximum number of peers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_limit: Option<u32>,
    /// Bandwidth priority, -1 (low) to 1 (high).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_priority: Option<i32>,
    /// Indices of files to download.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_wanted: Option<Vec<u32>>,
    /// Indices of files to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_unwanted: Option<Vec<u32>>,
    /// Indices of high priority files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_high: Option<Vec<u32>>,
    /// Indices of low priority files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_low: Option<Vec<u32>>,
    /// Indices of normal priority files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_normal: Option<Vec<u32>>,
}

/// A torrent reference: the daemon accepts numeric ids and info hashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TorrentId {
    /// Session-local numeric id.
    Id(i64),
    /// Hex info hash.
    Hash(String),
}

impl From<i64> for TorrentId {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for TorrentId {
    fn from(hash: &str) -> Self {
        Self::Hash(hash.to_owned())
    }
}

impl From<String> for TorrentId {
    fn from(hash: String) -> Self {
        Self::Hash(hash)
    }
}

/// Torrent selector for methods taking `ids`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ids {
    /// One torrent, sent as a bare value.
    Single(TorrentId),
    /// Several torrents, sent as an array.
    List(Vec<TorrentId>),
    /// Torrents changed since the last `recently-active` query.
    RecentlyActive,
}

impl Serialize for Ids {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Single(id) => id.serialize(serializer),
            Self::List(ids) => ids.serialize(serializer),
            Self::RecentlyActive => serializer.serialize_str("recently-active"),
        }
    }
}

impl From<TorrentId> for Ids {
    fn from(id: TorrentId) -> Self {
        Self::Single(id)
    }
}

impl From<i64> for Ids {
    fn from(id: i64) -> Self {
        Self::Single(TorrentId::Id(id))
    }
}

impl From<&str> for Ids {
    fn from(hash: &str) -> Self {
        Self::Single(TorrentId::from(hash))
    }
}

impl From<Vec<TorrentId>> for Ids {
    fn from(ids: Vec<TorrentId>) -> Self {
        Self::List(ids)
    }
}

impl From<Vec<i64>> for Ids {
    fn from(ids: Vec<i64>) -> Self {
        ids.into_iter().collect()
    }
}

impl<T: Into<TorrentId>> FromIterator<T> for Ids {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}

/// `torrent-remove` arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RemoveOptions {
    /// Torrents to remove.
    pub ids: Ids,
    /// Also delete the downloaded data.
    pub delete_local_data: bool,
}

/// Optional `torrent-get` arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GetOptions {
    /// Restrict the query; all torrents are returned when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Ids>,
}
