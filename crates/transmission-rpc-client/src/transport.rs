//! Internal trait abstracting the HTTP exchange with the daemon.
//!
//! This module provides the [`RpcTransport`] trait which abstracts the
//! underlying HTTP client, enabling mocking in tests.

use reqwest::{RequestBuilder, header::CONTENT_TYPE};
use tracing::debug;
use url::Url;

use transmission_rpc_types::RpcError;

use crate::config::{ClientConfig, Credentials};

/// Header carrying the session token in both directions.
pub const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

/// Status the daemon uses to demand a (new) session token.
pub(crate) const SESSION_CONFLICT: u16 = 409;

/// Raw HTTP reply: status code and undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RpcReply {
    pub(crate) status: u16,
    pub(crate) body: String,
}

/// Internal trait that abstracts the HTTP operations.
/// This allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[allow(async_fn_in_trait)]
pub(crate) trait RpcTransport {
    /// POSTs a serialized envelope, attaching the session token when set.
    async fn post(&self, session_id: Option<String>, body: String)
    -> Result<RpcReply, RpcError>;
    /// Sends a bodiless request and returns the session token header, if any.
    async fn probe(&self) -> Result<Option<String>, RpcError>;
}

/// HTTP transport over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: Url,
    credentials: Option<Credentials>,
}

impl HttpTransport {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self, RpcError> {
        let endpoint = config.endpoint()?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| RpcError::InvalidEndpoint(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint,
            credentials: config.credentials.clone(),
        })
    }

    /// The URL every request goes to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(c) => request.basic_auth(&c.username, Some(&c.password)),
            None => request,
        }
    }
}

impl RpcTransport for HttpTransport {
    async fn post(
        &self,
        session_id: Option<String>,
        body: String,
    ) -> Result<RpcReply, RpcError> {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(session_id) = session_id {
            request = request.header(SESSION_ID_HEADER, session_id);
        }

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;
        debug!("POST {} -> {status}", self.endpoint);

        Ok(RpcReply { status, body })
    }

    async fn probe(&self) -> Result<Option<String>, RpcError> {
        let response = self
            .authorize(self.http.get(self.endpoint.clone()))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        debug!("GET {} -> {}", self.endpoint, response.status());

        Ok(response
            .headers()
            .get(SESSION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned))
    }
}

/// Maps HTTP client errors to RPC errors.
fn map_reqwest_error(err: reqwest::Error) -> RpcError {
    if err.is_decode() {
        RpcError::InvalidBody(err.to_string())
    } else {
        RpcError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_uses_configured_endpoint() {
        let config = ClientConfig {
            host: "127.0.0.1".into(),
            port: 19091,
            ..Default::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.endpoint().as_str(),
            "http://127.0.0.1:19091/transmission/rpc"
        );
    }

    #[tokio::test]
    async fn connection_refused_is_a_network_error() {
        let config = ClientConfig {
            host: "127.0.0.1".into(),
            port: 1,
            ..Default::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        let err = transport.probe().await.unwrap_err();
        assert!(matches!(err, RpcError::Network(_)), "got {err:?}");
        assert!(err.is_transport());
    }
}
