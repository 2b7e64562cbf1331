//! Shared test utilities and fixtures.

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::transport::{RpcReply, SESSION_CONFLICT};

pub(crate) fn reply(status: u16, body: Value) -> RpcReply {
    RpcReply {
        status,
        body: body.to_string(),
    }
}

pub(crate) fn success_reply(arguments: Value) -> RpcReply {
    reply(200, json!({"result": "success", "arguments": arguments}))
}

pub(crate) fn conflict_reply() -> RpcReply {
    RpcReply {
        status: SESSION_CONFLICT,
        body: "<h1>409: Conflict</h1>".to_string(),
    }
}

/// Collects request bodies seen by a mock so tests can inspect them afterwards.
#[derive(Debug, Clone, Default)]
pub(crate) struct Recorded(Arc<Mutex<Vec<Value>>>);

impl Recorded {
    pub(crate) fn push(&self, body: &str) {
        let value = serde_json::from_str(body).expect("request body is JSON");
        self.0.lock().unwrap().push(value);
    }

    pub(crate) fn bodies(&self) -> Vec<Value> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn only(&self) -> Value {
        let bodies = self.bodies();
        assert_eq!(bodies.len(), 1, "expected exactly one request");
        bodies.into_iter().next().unwrap()
    }
}

pub(crate) fn torrent_fixture(id: i64, name: &str, hash: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "hashString": hash,
        "percentDone": 0.5,
        "status": 4,
        "totalSize": 1000,
        "downloadDir": "/downloads"
    })
}

pub(crate) fn stats_fixture() -> Value {
    json!({
        "activeTorrentCount": 1,
        "cumulative-stats": {
            "downloadedBytes": 1000,
            "filesAdded": 5,
            "secondsActive": 3600,
            "sessionCount": 10,
            "uploadedBytes": 500
        },
        "current-stats": {
            "downloadedBytes": 100,
            "filesAdded": 1,
            "secondsActive": 600,
            "sessionCount": 1,
            "uploadedBytes": 50
        },
        "downloadSpeed": 1000,
        "pausedTorrentCount": 0,
        "torrentCount": 1,
        "uploadSpeed": 500
    })
}
