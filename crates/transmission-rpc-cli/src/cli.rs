use std::{fs, io, path::Path, time::Duration};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use transmission_rpc_client::{
    ClientConfig, Credentials, DEFAULT_BASE_PATH, DEFAULT_HOST, DEFAULT_PORT,
};
use transmission_rpc_types::{
    AddOptions, GetOptions, Ids, RemoveOptions, RpcError, TorrentField, TorrentId, TorrentSource,
};

/// Errors raised by the command line front end.
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// A local torrent file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadSource {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The RPC call failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The reply could not be printed.
    #[error("failed to print reply: {0}")]
    Print(#[from] serde_json::Error),
}

/// Top-level CLI struct for the binary.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Daemon host.
    #[arg(long, env = "TRANSMISSION_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Daemon RPC port.
    #[arg(long, env = "TRANSMISSION_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path prefix of the RPC endpoint.
    #[arg(long, env = "TRANSMISSION_BASE_PATH", default_value = DEFAULT_BASE_PATH)]
    pub base_path: String,

    /// RPC user name, if the daemon requires authentication.
    #[arg(long, env = "TRANSMISSION_USERNAME")]
    pub username: Option<String>,

    /// RPC password.
    #[arg(long, env = "TRANSMISSION_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub(crate) fn config(&self) -> ClientConfig {
        ClientConfig {
            host: self.host.clone(),
            port: self.port,
            base_path: self.base_path.clone(),
            credentials: self.username.clone().map(|username| Credentials {
                username,
                password: self.password.clone().unwrap_or_default(),
            }),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Add a torrent from a URL, magnet link or local .torrent file.
    Add(AddArgs),
    /// List torrents.
    Get(GetArgs),
    /// Remove torrents.
    Remove(RemoveArgs),
    /// Start torrents.
    Start(IdsArgs),
    /// Stop torrents.
    Stop(IdsArgs),
    /// Show session statistics.
    Stats,
}

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// An existing local file is uploaded; anything else is passed to the daemon as is.
    pub source: String,

    /// Download directory.
    #[arg(long)]
    pub download_dir: Option<String>,

    /// Label to attach; repeatable.
    #[arg(long = "label")]
    pub labels: Vec<String>,

    /// Add without starting.
    #[arg(long, default_value_t = false)]
    pub paused: bool,

    /// Maximum number of peers.
    #[arg(long)]
    pub peer_limit: Option<u32>,

    /// Cookie header for fetching the source URL.
    #[arg(long)]
    pub cookies: Option<String>,
}

impl AddArgs {
    pub(crate) fn source(&self) -> Result<TorrentSource, CliError> {
        resolve_source(&self.source)
    }

    pub(crate) fn options(&self) -> AddOptions {
        AddOptions {
            download_dir: self.download_dir.clone(),
            labels: (!self.labels.is_empty()).then(|| self.labels.clone()),
            paused: self.paused.then_some(true),
            peer_limit: self.peer_limit,
            cookies: self.cookies.clone(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct GetArgs {
    /// Fields to fetch, comma separated.
    #[arg(
        long,
        value_delimiter = ',',
        default_values = ["id", "name", "percentDone", "status"]
    )]
    pub fields: Vec<TorrentField>,

    /// Torrent id or hash; repeatable. All torrents when omitted.
    #[arg(long = "id")]
    pub ids: Vec<String>,
}

impl GetArgs {
    pub(crate) fn options(&self) -> GetOptions {
        GetOptions {
            ids: (!self.ids.is_empty()).then(|| parse_ids(&self.ids)),
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct IdsArgs {
    /// Torrent id or hash; repeatable.
    #[arg(long = "id", required = true)]
    pub ids: Vec<String>,
}

impl IdsArgs {
    pub(crate) fn ids(&self) -> Ids {
        parse_ids(&self.ids)
    }
}

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    #[command(flatten)]
    pub ids: IdsArgs,

    /// Also delete downloaded data.
    #[arg(long, default_value_t = false)]
    pub delete_local_data: bool,
}

impl RemoveArgs {
    pub(crate) fn options(&self) -> RemoveOptions {
        RemoveOptions {
            ids: self.ids.ids(),
            delete_local_data: self.delete_local_data,
        }
    }
}

/// Numeric values are ids, anything else a hash.
fn parse_id(raw: &str) -> TorrentId {
    raw.parse::<i64>()
        .map(TorrentId::Id)
        .unwrap_or_else(|_| TorrentId::Hash(raw.to_owned()))
}

fn parse_ids(raw: &[String]) -> Ids {
    match raw {
        [single] => Ids::Single(parse_id(single)),
        many => Ids::List(many.iter().map(|r| parse_id(r)).collect()),
    }
}

fn resolve_source(source: &str) -> Result<TorrentSource, CliError> {
    let path = Path::new(source);
    if !path.is_file() {
        return Ok(TorrentSource::Locator(source.to_owned()));
    }
    fs::read(path)
        .map(TorrentSource::Metainfo)
        .map_err(|source_err| CliError::ReadSource {
            path: source.to_owned(),
            source: source_err,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn local_file_becomes_metainfo() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.torrent");
        fs::write(&file, [0x01_u8, 0x02]).unwrap();

        let source = resolve_source(file.to_str().unwrap()).unwrap();
        assert_eq!(source, TorrentSource::Metainfo(vec![0x01, 0x02]));
    }

    #[test]
    fn other_sources_are_locators() {
        let source = resolve_source("https://example.org/a.torrent").unwrap();
        assert_eq!(
            source,
            TorrentSource::Locator("https://example.org/a.torrent".into())
        );

        let dir = tempfile::tempdir().unwrap();
        let source = resolve_source(dir.path().to_str().unwrap()).unwrap();
        assert!(matches!(source, TorrentSource::Locator(_)));
    }

    #[test]
    fn ids_parse_numbers_and_hashes() {
        assert_eq!(parse_ids(&["3".into()]), Ids::Single(TorrentId::Id(3)));
        assert_eq!(
            parse_ids(&["3".into(), "c0ffee".into()]),
            Ids::List(vec![TorrentId::Id(3), TorrentId::Hash("c0ffee".into())])
        );
    }

    #[test]
    fn get_defaults_and_field_list() {
        let cli = Cli::try_parse_from(["transmission-rpc", "get"]).unwrap();
        let Command::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(
            args.fields,
            vec![
                TorrentField::Id,
                TorrentField::Name,
                TorrentField::PercentDone,
                TorrentField::Status
            ]
        );
        assert_eq!(args.options().ids, None);

        let cli = Cli::try_parse_from([
            "transmission-rpc",
            "get",
            "--fields",
            "id,hashString,id",
            "--id",
            "7",
        ])
        .unwrap();
        let Command::Get(args) = cli.command else {
            panic!("expected get");
        };
        assert_eq!(
            args.fields,
            vec![TorrentField::Id, TorrentField::HashString, TorrentField::Id]
        );
        assert_eq!(args.options().ids, Some(Ids::Single(TorrentId::Id(7))));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = Cli::try_parse_from(["transmission-rpc", "get", "--fields", "bogus"]);
        assert!(result.is_err());
    }

    #[test]
    fn add_options_only_carry_given_flags() {
        let cli = Cli::try_parse_from([
            "transmission-rpc",
            "add",
            "magnet:?xt=urn:btih:abc",
            "--label",
            "a",
            "--label",
            "b",
        ])
        .unwrap();
        let Command::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(
            args.options(),
            AddOptions {
                labels: Some(vec!["a".into(), "b".into()]),
                ..Default::default()
            }
        );
    }

    #[test]
    fn remove_requires_ids() {
        assert!(Cli::try_parse_from(["transmission-rpc", "remove"]).is_err());

        let cli = Cli::try_parse_from([
            "transmission-rpc",
            "remove",
            "--id",
            "1",
            "--id",
            "2",
            "--delete-local-data",
        ])
        .unwrap();
        let Command::Remove(args) = cli.command else {
            panic!("expected remove");
        };
        let options = args.options();
        assert_eq!(options.ids, Ids::from(vec![1_i64, 2]));
        assert!(options.delete_local_data);
    }

    #[test]
    fn credentials_from_flags() {
        let cli = Cli::try_parse_from([
            "transmission-rpc",
            "--username",
            "admin",
            "--password",
            "pw",
            "--port",
            "9092",
            "stats",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.port, 9092);
        assert_eq!(config.credentials.unwrap().username, "admin");
    }
}
