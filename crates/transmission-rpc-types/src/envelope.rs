//! The JSON-RPC envelope exchanged with the daemon.

use serde::{Deserialize, Serialize};

/// The `result` value the daemon uses to report success.
pub const SUCCESS: &str = "success";

/// Outbound envelope: `{ "method": ..., "arguments": ..., "tag"?: ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<'a, A> {
    /// RPC method name, e.g. `torrent-get`.
    pub method: &'a str,
    /// Method arguments.
    pub arguments: A,
    /// Correlation id echoed back by the daemon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<i64>,
}

/// Inbound envelope: `{ "result": ..., "arguments": ..., "tag"?: ... }`.
///
/// `result` is passed through as sent by the daemon; check
/// [`TmResponse::is_success`] before trusting `arguments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmResponse<T> {
    /// `"success"` or a daemon-provided failure message.
    pub result: String,
    /// Method-specific payload.
    pub arguments: T,
    /// Echo of the request tag, if one was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<i64>,
}

impl<T> TmResponse<T> {
    /// Whether the daemon reported success.
    pub fn is_success(&self) -> bool {
        self.result == SUCCESS
    }

    /// Replaces the payload, keeping `result` and `tag`.
    pub fn map_arguments<U, F>(self, f: F) -> TmResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        TmResponse {
            result: self.result,
            arguments: f(self.arguments),
            tag: self.tag,
        }
    }

    /// Fallible variant of [`TmResponse::map_arguments`].
    pub fn try_map_arguments<U, E, F>(self, f: F) -> Result<TmResponse<U>, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        Ok(TmResponse {
            result: self.result,
            arguments: f(self.arguments)?,
            tag: self.tag,
        })
    }
}

/// Arguments of a reply that carries no payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_omits_absent_tag() {
        let req = RpcRequest {
            method: "torrent-get",
            arguments: json!({"fields": ["id"]}),
            tag: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"method": "torrent-get", "arguments": {"fields": ["id"]}})
        );
    }

    #[test]
    fn request_carries_tag() {
        let req = RpcRequest {
            method: "torrent-get",
            arguments: Empty {},
            tag: Some(7),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["tag"], json!(7));
    }

    #[test]
    fn failure_result_is_passed_through() {
        let resp: TmResponse<Empty> =
            serde_json::from_value(json!({"result": "no such torrent", "arguments": {}}))
                .unwrap();
        assert!(!resp.is_success());
        assert_eq!(resp.result, "no such torrent");
        assert_eq!(resp.tag, None);
    }

    #[test]
    fn empty_tolerates_extra_keys() {
        let resp: TmResponse<Empty> = serde_json::from_value(
            json!({"result": "success", "arguments": {"unexpected": 1}, "tag": 3}),
        )
        .unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.tag, Some(3));
    }
}
