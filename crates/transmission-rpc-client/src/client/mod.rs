//! Transmission RPC client implementation.

use std::sync::{PoisonError, RwLock};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use transmission_rpc_types::{
    AddOptions, AddResult, Empty, GetOptions, Ids, RemoveOptions, RpcError, RpcRequest,
    SessionStats, TmResponse, Torrent, TorrentField, TorrentSource,
};

use crate::config::ClientConfig;
use crate::transport::{HttpTransport, RpcTransport, SESSION_CONFLICT};
use crate::wire::{
    self, AddRequest, GetRequest, IdsRequest, ReplyEnvelope, SESSION_STATS, TORRENT_ADD,
    TORRENT_GET, TORRENT_REMOVE, TORRENT_START, TORRENT_STOP, TorrentList,
};


/// TransmissionClient talks to a Transmission daemon over its JSON-RPC protocol.
///
/// The session token is cached on the instance and renewed once per call
/// when the daemon answers 409. Concurrent calls share the token; if several
/// of them hit a 409 at the same time each renews it on its own.
#[allow(missing_debug_implementations, private_bounds)]
pub struct TransmissionClient<T: RpcTransport = HttpTransport> {
    transport: T,
    session_id: RwLock<Option<String>>,
}

impl TransmissionClient {
    /// Create a client for `http://{host}:{port}{base_path}rpc`.
    ///
    /// No request is sent until the first call.
    pub fn new(host: &str, port: u16, base_path: &str) -> Result<Self, RpcError> {
        Self::with_config(ClientConfig {
            host: host.to_owned(),
            port,
            base_path: base_path.to_owned(),
            ..Default::default()
        })
    }

    /// Create a client from a full [`ClientConfig`].
    pub fn with_config(config: ClientConfig) -> Result<Self, RpcError> {
        let transport = HttpTransport::new(&config)?;
        debug!("Using Transmission RPC at {}", transport.endpoint());
        Ok(Self::with_transport(transport))
    }

    /// The RPC endpoint.
    pub fn endpoint(&self) -> &Url {
        self.transport.endpoint()
    }
}

#[allow(private_bounds)]
impl<T: RpcTransport> TransmissionClient<T> {
    fn with_transport(transport: T) -> Self {
        Self {
            transport,
            session_id: RwLock::new(None),
        }
    }

    /// The current session token, if one has been obtained.
    pub fn session_id(&self) -> Option<String> {
        self.session_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the session token.
    pub fn set_session_id(&self, session_id: Option<String>) {
        *self
            .session_id
            .write()
            .unwrap_or_else(PoisonError::into_inner) = session_id;
    }

    /// Fetches a session token from the daemon's response headers.
    ///
    /// A reply without the header leaves the token as it was.
    pub async fn probe_session(&self) -> Result<(), RpcError> {
        match self.transport.probe().await? {
            Some(session_id) => {
                debug!("Obtained session id {session_id}");
                self.set_session_id(Some(session_id));
            }
            None => debug!("Probe reply carried no session id"),
        }
        Ok(())
    }

    /// Sends `{method, arguments, tag?}` and decodes the reply envelope.
    ///
    /// A 409 triggers one session renewal and one resend; a second 409 is
    /// [`RpcError::SessionRejected`]. Replies with a non-success `result` are
    /// returned as is.
    pub async fn invoke<A, R>(
        &self,
        method: &str,
        arguments: &A,
        tag: Option<i64>,
    ) -> Result<TmResponse<R>, RpcError>
    where
        A: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = RpcRequest {
            method,
            arguments,
            tag,
        };
        let body = serde_json::to_string(&request).map_err(|e| RpcError::Encode(e.to_string()))?;

        debug!("Calling {method}");
        let mut reply = self.transport.post(self.session_id(), body.clone()).await?;
        if reply.status == SESSION_CONFLICT {
            warn!("Session id rejected by {method}, renewing");
            self.set_session_id(None);
            self.probe_session().await?;
            reply = self.transport.post(self.session_id(), body).await?;
            if reply.status == SESSION_CONFLICT {
                return Err(RpcError::SessionRejected);
            }
        }

        let response: TmResponse<Value> = serde_json::from_str::<ReplyEnvelope>(&reply.body)
            .map_err(|e| RpcError::InvalidBody(format!("HTTP {}: {e}", reply.status)))?
            .into();
        debug!("{method} replied {}", response.result);

        response.try_map_arguments(|arguments| {
            serde_json::from_value(arguments).map_err(|e| RpcError::malformed(method, e.to_string()))
        })
    }

    /// Add a torrent from a locator or from raw metainfo.
    ///
    /// The reply is flattened into an [`AddResult`]. It is `None` only when
    /// the daemon reports a failure, in which case `result` holds its message.
    pub async fn add_torrent(
        &self,
        source: impl Into<TorrentSource>,
        options: &AddOptions,
    ) -> Result<TmResponse<Option<AddResult>>, RpcError> {
        let source = source.into();
        debug!("Adding torrent from {source:?}");
        let response: TmResponse<Value> = self
            .invoke(TORRENT_ADD, &AddRequest::new(&source, options), None)
            .await?;

        let success = response.is_success();
        let response = response
            .try_map_arguments(|arguments| wire::decode_add_arguments(arguments, success))?;
        debug!("Added {:?}", response.arguments);
        Ok(response)
    }

    /// Remove torrents, optionally deleting their data.
    pub async fn remove_torrent(
        &self,
        options: &RemoveOptions,
    ) -> Result<TmResponse<Empty>, RpcError> {
        debug!(
            "Removing torrents {:?}, delete_local_data={}",
            options.ids, options.delete_local_data
        );
        self.invoke(TORRENT_REMOVE, options, None).await
    }

    /// Query torrents, returning only `fields` for each.
    ///
    /// Repeated fields are sent once. Without `options`, or without ids in
    /// them, every torrent is returned.
    pub async fn get_torrents(
        &self,
        fields: &[TorrentField],
        options: Option<&GetOptions>,
    ) -> Result<TmResponse<Vec<Torrent>>, RpcError> {
        let request = GetRequest::new(fields, options);
        debug!("Getting torrents: {request:?}");
        let response: TmResponse<TorrentList> = self.invoke(TORRENT_GET, &request, None).await?;
        debug!("Got {} torrents", response.arguments.torrents.len());

        Ok(response.map_arguments(|list| list.torrents))
    }

    /// Start (resume) torrents.
    pub async fn start_torrents(&self, ids: &Ids) -> Result<TmResponse<Empty>, RpcError> {
        debug!("Starting torrents {ids:?}");
        self.invoke(TORRENT_START, &IdsRequest { ids }, None).await
    }

    /// Stop (pause) torrents.
    pub async fn stop_torrents(&self, ids: &Ids) -> Result<TmResponse<Empty>, RpcError> {
        debug!("Stopping torrents {ids:?}");
        self.invoke(TORRENT_STOP, &IdsRequest { ids }, None).await
    }

    /// Get session statistics.
    pub async fn session_stats(&self) -> Result<TmResponse<SessionStats>, RpcError> {
        debug!("Getting session statistics");
        self.invoke(SESSION_STATS, &Empty {}, None).await
    }
}
