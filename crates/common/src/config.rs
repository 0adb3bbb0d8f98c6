use std::net::SocketAddr;

use byte_unit::n_mib_bytes;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[cfg(feature = "logging")]
use tracing_subscriber::filter::LevelFilter;

/// Database configuration.
#[derive(Deserialize)]
pub struct Database {
    /// Database URL string.
    pub url: String,
}

/// HTTP server configuration.
#[derive(Deserialize)]
pub struct Server {
    /// Address, that HTTP server will listen on.
    pub address: SocketAddr,
}

/// Implementation of [`serde`]'s deserializer for [`FromStr`] types.
#[cfg(feature = "logging")]
fn deserialize_from_str<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error,
    D: serde::de::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    std::str::FromStr::from_str(&s).map_err(serde::de::Error::custom)
}

/// Logging configuration.
#[cfg(feature = "logging")]
#[derive(Deserialize)]
pub struct Logging {
    /// Log level.
    #[serde(deserialize_with = "deserialize_from_str")]
    pub level: LevelFilter,
}

#[cfg(feature = "logging")]
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
        }
    }
}

/// Authentication token configuration.
#[derive(Deserialize)]
pub struct Auth {
    /// Secret used to sign access tokens.
    pub secret: String,

    /// Access token lifespan, in seconds.
    #[serde(default = "default_token_lifespan")]
    pub token_lifespan: u64,
}

fn default_token_lifespan() -> u64 {
    3600
}

/// AWS S3-compatible storage configuration.
///
/// Any S3-compatible service works here, including a self-hosted
/// MinIO instance selected via `endpoint_url`.
#[derive(Deserialize)]
pub struct Storage {
    /// Access key identifier.
    pub access_key_id: String,

    /// Secret access key.
    pub secret_access_key: String,

    /// S3 region name.
    pub region: String,

    /// S3 endpoint URL.
    pub endpoint_url: String,

    /// S3 bucket name for uploaded team and idea files.
    pub file_bucket: String,

    /// Max uploaded file size, in bytes.
    #[serde(default = "default_file_size_limit")]
    pub file_size_limit: usize,
}

fn default_file_size_limit() -> usize {
    n_mib_bytes!(10) as usize
}

/// SMTP email dispatch configuration.
#[derive(Deserialize)]
pub struct Smtp {
    /// SMTP relay hostname.
    pub host: String,

    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// SMTP username.
    pub username: String,

    /// SMTP password.
    pub password: String,

    /// Sender address used for outgoing messages.
    pub from_address: String,
}

fn default_smtp_port() -> u16 {
    587
}

/// General configuration.
#[derive(Deserialize)]
pub struct Config {
    /// General database configuration.
    pub database: Database,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: Option<Server>,

    /// Logging configuration.
    #[cfg(feature = "logging")]
    #[serde(default)]
    pub logging: Logging,

    /// Authentication token configuration.
    pub auth: Auth,

    /// Storage configuration.
    pub storage: Storage,

    /// Email dispatch configuration.
    ///
    /// With no SMTP relay configured outgoing messages are dropped.
    #[serde(default)]
    pub smtp: Option<Smtp>,
}

impl Config {
    /// Create new config using default configuration file or environment variables.
    ///
    /// See [`Env`] for more details on how to use environment variables configuration.
    ///
    /// [`Env`]: figment::providers::Env
    pub fn new() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("Config.toml"))
            .merge(Env::prefixed("CONFIG_").split("_"))
            .extract()
    }

    /// Create new config suitable for running unit tests.
    #[cfg(feature = "test-utils")]
    pub fn for_tests() -> Self {
        Self {
            database: Database {
                url: String::from("sqlite::memory:"),
            },
            server: Some(Server {
                address: "127.0.0.1:3000".parse().unwrap(),
            }),
            logging: Logging::default(),
            auth: Auth {
                secret: String::from("test-secret"),
                token_lifespan: default_token_lifespan(),
            },
            storage: Storage {
                access_key_id: String::new(),
                secret_access_key: String::new(),
                region: String::new(),
                endpoint_url: String::new(),
                file_bucket: String::new(),
                file_size_limit: default_file_size_limit(),
            },
            smtp: None,
        }
    }
}
