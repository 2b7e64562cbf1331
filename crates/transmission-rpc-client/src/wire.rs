//! Request shaping and reply reshaping for the torrent methods.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use transmission_rpc_types::{
    AddOptions, AddResponseType, AddResult, GetOptions, Ids, RpcError, TmResponse, Torrent,
    TorrentField, TorrentSource, dedup_fields,
};

pub(crate) const TORRENT_ADD: &str = "torrent-add";
pub(crate) const TORRENT_GET: &str = "torrent-get";
pub(crate) const TORRENT_REMOVE: &str = "torrent-remove";
pub(crate) const TORRENT_START: &str = "torrent-start";
pub(crate) const TORRENT_STOP: &str = "torrent-stop";
pub(crate) const SESSION_STATS: &str = "session-stats";

/// Reply envelope as sent on the wire. Failure replies may omit `arguments`.
#[derive(Debug, Deserialize)]
pub(crate) struct ReplyEnvelope {
    result: String,
    #[serde(default = "empty_object")]
    arguments: Value,
    #[serde(default)]
    tag: Option<i64>,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

impl From<ReplyEnvelope> for TmResponse<Value> {
    fn from(reply: ReplyEnvelope) -> Self {
        TmResponse {
            result: reply.result,
            arguments: reply.arguments,
            tag: reply.tag,
        }
    }
}

/// `torrent-add` arguments: the caller's options plus exactly one source key.
#[derive(Debug, Serialize)]
pub(crate) struct AddRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    filename: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metainfo: Option<String>,
    #[serde(flatten)]
    options: &'a AddOptions,
}

impl<'a> AddRequest<'a> {
    pub(crate) fn new(source: &'a TorrentSource, options: &'a AddOptions) -> Self {
        let (filename, metainfo) = match source {
            TorrentSource::Locator(locator) => (Some(locator.as_str()), None),
            TorrentSource::Metainfo(bytes) => (None, Some(STANDARD.encode(bytes))),
        };
        Self {
            filename,
            metainfo,
            options,
        }
    }
}

/// `torrent-get` arguments.
#[derive(Debug, Serialize)]
pub(crate) struct GetRequest<'a> {
    fields: Vec<TorrentField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ids: Option<&'a Ids>,
}

impl<'a> GetRequest<'a> {
    pub(crate) fn new(fields: &[TorrentField], options: Option<&'a GetOptions>) -> Self {
        Self {
            fields: dedup_fields(fields),
            ids: options.and_then(|o| o.ids.as_ref()),
        }
    }
}

/// Arguments of the methods that only select torrents.
#[derive(Debug, Serialize)]
pub(crate) struct IdsRequest<'a> {
    pub(crate) ids: &'a Ids,
}

/// `torrent-get` reply arguments.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TorrentList {
    #[serde(default)]
    pub(crate) torrents: Vec<Torrent>,
}

/// The descriptor nested under a `torrent-add` variant key.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddedTorrent {
    id: i64,
    name: String,
    hash_string: String,
}

/// Flattens `{"torrent-added" | "torrent-duplicate": {id, name, hashString}}`.
///
/// A failed add carries no descriptor, which yields `None`. A successful
/// reply without either variant key is malformed.
pub(crate) fn decode_add_arguments(
    arguments: Value,
    success: bool,
) -> Result<Option<AddResult>, RpcError> {
    let mut map = match arguments {
        Value::Object(map) => map,
        _ if !success => return Ok(None),
        other => {
            return Err(RpcError::malformed(
                TORRENT_ADD,
                format!("arguments are not an object: {other}"),
            ));
        }
    };

    for response_type in AddResponseType::ALL {
        if let Some(nested) = map.remove(response_type.key()) {
            let AddedTorrent {
                id,
                name,
                hash_string,
            } = serde_json::from_value(nested).map_err(|e| {
                RpcError::malformed(
                    TORRENT_ADD,
                    format!("invalid {} descriptor: {e}", response_type.key()),
                )
            })?;
            return Ok(Some(AddResult {
                response_type,
                id,
                name,
                hash_string,
            }));
        }
    }

    if success {
        Err(RpcError::malformed(
            TORRENT_ADD,
            "neither torrent-added nor torrent-duplicate present",
        ))
    } else {
        Ok(None)
    }
}
