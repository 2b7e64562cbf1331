//! Torrent descriptors and the field projection used by `torrent-get`.

use std::{collections::HashSet, str::FromStr};

use serde::{
    Deserialize, Serialize,
    de::{IntoDeserializer, value::StrDeserializer},
};

use crate::RpcError;

/// A queryable torrent attribute, named as the daemon names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)] // rationale: one variant per daemon field
pub enum TorrentField {
    ActivityDate,
    AddedDate,
    Availability,
    BandwidthPriority,
    Comment,
    CorruptEver,
    Creator,
    DateCreated,
    DesiredAvailable,
    DoneDate,
    DownloadDir,
    DownloadedEver,
    DownloadLimit,
    DownloadLimited,
    EditDate,
    Error,
    ErrorString,
    Eta,
    EtaIdle,
    #[serde(rename = "file-count")]
    FileCount,
    Files,
    FileStats,
    Group,
    HashString,
    HaveUnchecked,
    HaveValid,
    HonorsSessionLimits,
    Id,
    IsFinished,
    IsPrivate,
    IsStalled,
    Labels,
    LeftUntilDone,
    MagnetLink,
    ManualAnnounceTime,
    MaxConnectedPeers,
    MetadataPercentComplete,
    Name,
    #[serde(rename = "peer-limit")]
    PeerLimit,
    Peers,
    PeersConnected,
    PeersFrom,
    PeersGettingFromUs,
    PeersSendingToUs,
    PercentComplete,
    PercentDone,
    PieceCount,
    PieceSize,
    Pieces,
    Priorities,
    #[serde(rename = "primary-mime-type")]
    PrimaryMimeType,
    QueuePosition,
    RateDownload,
    RateUpload,
    RecheckProgress,
    SecondsDownloading,
    SecondsSeeding,
    SeedIdleLimit,
    SeedIdleMode,
    SeedRatioLimit,
    SeedRatioMode,
    SizeWhenDone,
    StartDate,
    Status,
    TorrentFile,
    TotalSize,
    TrackerList,
    Trackers,
    TrackerStats,
    UploadedEver,
    UploadLimit,
    UploadLimited,
    UploadRatio,
    Webseeds,
    WebseedsSendingToUs,
}

impl FromStr for TorrentField {
    type Err = RpcError;

    /// Parses the daemon's field name, e.g. `hashString` or `peer-limit`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let de: StrDeserializer<'_, serde::de::value::Error> = s.into_deserializer();
        Self::deserialize(de).map_err(|_| RpcError::UnknownField(s.to_owned()))
    }
}

/// Collapses repeated fields, keeping the first occurrence of each.
pub fn dedup_fields(fields: &[TorrentField]) -> Vec<TorrentField> {
    let mut seen = HashSet::with_capacity(fields.len());
    fields.iter().copied().filter(|f| seen.insert(*f)).collect()
}

/// A torrent as returned by `torrent-get`.
///
/// Only the requested fields are populated; everything else is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)] // rationale: these are the daemon's fields, see TorrentField
pub struct Torrent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrupt_ever: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_available: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloaded_ever: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_limited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_string: Option<String>,
    /// Seconds until done; negative when unknown or not applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta_idle: Option<i64>,
    #[serde(rename = "file-count", skip_serializing_if = "Option::is_none")]
    pub file_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<TorrentFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_stats: Option<Vec<FileStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub have_unchecked: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub have_valid: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honors_session_limits: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_finished: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_stalled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_until_done: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnet_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_announce_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connected_peers: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_percent_complete: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "peer-limit", skip_serializing_if = "Option::is_none")]
    pub peer_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peers: Option<Vec<Peer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peers_connected: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peers_from: Option<PeersFrom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peers_getting_from_us: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peers_sending_to_us: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_complete: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_done: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub piece_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub piece_size: Option<i64>,
    /// Base64 bitfield of the pieces we have.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pieces: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priorities: Option<Vec<i32>>,
    #[serde(rename = "primary-mime-type", skip_serializing_if = "Option::is_none")]
    pub primary_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_position: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_download: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_upload: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recheck_progress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_downloading: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds_seeding: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_idle_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_idle_mode: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_ratio_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_ratio_mode: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_when_done: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<i64>,
    /// 0 stopped, 1 queued to verify, 2 verifying, 3 queued to download,
    /// 4 downloading, 5 queued to seed, 6 seeding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub torrent_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker_list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trackers: Option<Vec<Tracker>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker_stats: Option<Vec<TrackerStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_ever: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_limited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webseeds: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webseeds_sending_to_us: Option<i64>,
}

/// One entry of `files`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TorrentFile {
    pub bytes_completed: i64,
    pub length: i64,
    pub name: String,
}

/// One entry of `fileStats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct FileStat {
    pub bytes_completed: i64,
    pub wanted: bool,
    pub priority: i32,
}

/// One entry of `peers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Peer {
    pub address: String,
    pub client_name: String,
    pub client_is_choked: bool,
    pub client_is_interested: bool,
    pub flag_str: String,
    pub is_downloading_from: bool,
    pub is_encrypted: bool,
    pub is_incoming: bool,
    pub is_uploading_to: bool,
    #[serde(rename = "isUTP")]
    pub is_utp: bool,
    pub peer_is_choked: bool,
    pub peer_is_interested: bool,
    pub port: u16,
    pub progress: f64,
    pub rate_to_client: i64,
    pub rate_to_peer: i64,
}

/// Where connected peers were discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PeersFrom {
    pub from_cache: i64,
    pub from_dht: i64,
    pub from_incoming: i64,
    pub from_lpd: i64,
    pub from_ltep: i64,
    pub from_pex: i64,
    pub from_tracker: i64,
}

/// One entry of `trackers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Tracker {
    pub announce: String,
    pub id: i64,
    pub scrape: String,
    pub sitename: String,
    pub tier: i64,
}

/// One entry of `trackerStats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TrackerStat {
    pub announce: String,
    pub announce_state: i32,
    pub download_count: i64,
    pub has_announced: bool,
    pub has_scraped: bool,
    pub host: String,
    pub id: i64,
    pub is_backup: bool,
    pub last_announce_peer_count: i64,
    pub last_announce_result: String,
    pub last_announce_succeeded: bool,
    pub last_announce_time: i64,
    pub leecher_count: i64,
    pub next_announce_time: i64,
    pub seeder_count: i64,
    pub tier: i64,
}
