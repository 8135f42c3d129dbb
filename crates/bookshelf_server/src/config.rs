//! JSON configuration loader for the server process.
//!
//! # Responsibility
//! - Read `HOST`/`PORT` (required) and optional storage/logging keys.
//! - Resolve relative paths against the process working directory.
//!
//! # Invariants
//! - A loaded config always has a valid `u16` port and an absolute log dir.

use bookshelf_core::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "./config.json";
pub const DEFAULT_DATABASE_PATH: &str = "./database.sqlite";
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    InvalidPort(String),
    WorkingDirectory(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::InvalidPort(port) => write!(f, "invalid PORT `{port}`; expected 0-65535"),
            Self::WorkingDirectory(err) => {
                write!(f, "failed to resolve working directory: {err}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidPort(_) => None,
            Self::WorkingDirectory(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "HOST")]
    host: String,
    #[serde(rename = "PORT")]
    port: String,
    #[serde(rename = "DATABASE", default)]
    database: Option<PathBuf>,
    #[serde(rename = "LOG_LEVEL", default)]
    log_level: Option<String>,
    #[serde(rename = "LOG_DIR", default)]
    log_dir: Option<PathBuf>,
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    /// Reads and resolves the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = std::env::current_dir().map_err(ConfigError::WorkingDirectory)?;
        Self::from_json_str(&text, &base_dir)
    }

    /// Parses config JSON, resolving relative paths against `base_dir`.
    pub fn from_json_str(text: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(text)?;

        let port = raw
            .port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(raw.port.clone()))?;

        let database_path = raw
            .database
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));
        let log_dir = raw.log_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        Ok(Self {
            host: raw.host,
            port,
            database_path,
            log_level: raw
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: absolutize(base_dir, log_dir),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn absolutize(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}
