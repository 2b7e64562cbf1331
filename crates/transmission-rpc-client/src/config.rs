//! Client configuration.

use std::{env, fmt, time::Duration};

use url::Url;

use transmission_rpc_types::RpcError;

/// Default daemon host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default daemon RPC port.
pub const DEFAULT_PORT: u16 = 9091;
/// Default path prefix; the endpoint is `{base_path}rpc`.
pub const DEFAULT_BASE_PATH: &str = "/transmission/";

/// HTTP basic auth credentials for daemons with `rpc-authentication-required`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// RPC user name.
    pub username: String,
    /// RPC password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where and how to reach the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Daemon host name or address.
    pub host: String,
    /// Daemon RPC port.
    pub port: u16,
    /// Path prefix, with leading and trailing slash.
    pub base_path: String,
    /// Basic auth credentials, if the daemon requires them.
    pub credentials: Option<Credentials>,
    /// Per-request timeout. The HTTP client default applies when unset.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            base_path: DEFAULT_BASE_PATH.to_owned(),
            credentials: None,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Reads the configuration from `TRANSMISSION_*` environment variables,
    /// falling back to the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let credentials = env::var("TRANSMISSION_USERNAME")
            .ok()
            .map(|username| Credentials {
                username,
                password: env::var("TRANSMISSION_PASSWORD").unwrap_or_default(),
            });

        Self {
            host: env::var("TRANSMISSION_HOST").unwrap_or(defaults.host),
            port: env::var("TRANSMISSION_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            base_path: env::var("TRANSMISSION_BASE_PATH").unwrap_or(defaults.base_path),
            credentials,
            timeout: None,
        }
    }

    /// The RPC endpoint, `http://{host}:{port}{base_path}rpc`.
    pub fn endpoint(&self) -> Result<Url, RpcError> {
        let raw = format!("http://{}:{}{}rpc", self.host, self.port, self.base_path);
        Url::parse(&raw).map_err(|e| RpcError::InvalidEndpoint(format!("{raw}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint() {
        let url = ClientConfig::default().endpoint().unwrap();
        assert_eq!(url.as_str(), "http://localhost:9091/transmission/rpc");
    }

    #[test]
    fn custom_endpoint() {
        let config = ClientConfig {
            host: "10.1.2.3".into(),
            port: 8080,
            base_path: "/".into(),
            ..Default::default()
        };
        assert_eq!(config.endpoint().unwrap().as_str(), "http://10.1.2.3:8080/rpc");
    }

    #[test]
    fn invalid_host_is_rejected() {
        let config = ClientConfig {
            host: "not a host".into(),
            ..Default::default()
        };
        match config.endpoint() {
            Err(RpcError::InvalidEndpoint(msg)) => assert!(msg.contains("not a host")),
            other => panic!("Expected InvalidEndpoint, got {other:?}"),
        }
    }

    /// The only test in this binary that touches `TRANSMISSION_*`.
    #[test]
    fn from_env_reads_variables_and_falls_back() {
        let vars = [
            ("TRANSMISSION_HOST", "seedbox"),
            ("TRANSMISSION_PORT", "9092"),
            ("TRANSMISSION_BASE_PATH", "/custom/"),
            ("TRANSMISSION_USERNAME", "admin"),
            ("TRANSMISSION_PASSWORD", "pw"),
        ];
        unsafe {
            for (key, value) in vars {
                env::set_var(key, value);
            }
        }
        let config = ClientConfig::from_env();
        assert_eq!(config.host, "seedbox");
        assert_eq!(config.port, 9092);
        assert_eq!(config.base_path, "/custom/");
        assert_eq!(
            config.credentials,
            Some(Credentials {
                username: "admin".into(),
                password: "pw".into(),
            })
        );
        assert_eq!(config.timeout, None);
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "http://seedbox:9092/custom/rpc"
        );

        unsafe {
            env::set_var("TRANSMISSION_PORT", "not-a-port");
            env::remove_var("TRANSMISSION_USERNAME");
        }
        let config = ClientConfig::from_env();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.credentials, None);

        unsafe {
            for (key, _) in vars {
                env::remove_var(key);
            }
        }
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }

    #[test]
    fn debug_redacts_password() {
        let config = ClientConfig {
            credentials: Some(Credentials {
                username: "admin".into(),
                password: "hunter2".into(),
            }),
            ..Default::default()
        };
        let printed = format!("{config:?}");
        assert!(printed.contains("admin"));
        assert!(!printed.contains("hunter2"));
    }
}
