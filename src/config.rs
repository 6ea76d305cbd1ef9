//! Startup configuration: where the song store lives and which address the
//! HTTP server binds to.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use directories::BaseDirs;
use thiserror::Error;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".flowstate";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "flowstate.sqlite";

/// Command-line arguments for the flowstate server.
#[derive(Parser, Debug, Clone)]
#[command(name = "flowstate")]
#[command(about = "Songwriting notebook: songs, verses and their status")]
#[command(version)]
pub struct Args {
    /// Store location, e.g. `sqlite:///flowstate.db`, `sqlite::memory:` or a
    /// plain file path. Defaults to a file in the home directory.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address the HTTP server listens on
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,
}

/// Resolved backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported database URL scheme `{0}` (only SQLite is available)")]
    UnsupportedScheme(String),
    #[error("database URL `{0}` does not name a file")]
    EmptyPath(String),
    #[error("could not locate home directory")]
    NoHomeDir,
}

impl Args {
    /// Resolve the store named on the command line or in the environment,
    /// falling back to the per-user data file.
    pub fn store_location(&self) -> Result<StoreLocation, ConfigError> {
        match self.database_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => parse_database_url(url),
            _ => default_location(),
        }
    }
}

/// Interpret a connection string. SQLite URLs follow the
/// `sqlite:///relative` / `sqlite:////absolute` convention; anything without a
/// scheme is taken as a file path.
pub fn parse_database_url(url: &str) -> Result<StoreLocation, ConfigError> {
    if url == "sqlite::memory:" || url == "sqlite://:memory:" || url == ":memory:" {
        return Ok(StoreLocation::Memory);
    }

    let path = if let Some(rest) = url.strip_prefix("sqlite://") {
        // `sqlite:///x` keeps a leading slash that marks the path as relative.
        rest.strip_prefix('/').unwrap_or(rest)
    } else if let Some(rest) = url.strip_prefix("sqlite:") {
        rest
    } else if let Some((scheme, _)) = url.split_once("://") {
        return Err(ConfigError::UnsupportedScheme(scheme.to_string()));
    } else {
        url
    };

    // Query parameters such as `?mode=rwc` are not meaningful here.
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() {
        return Err(ConfigError::EmptyPath(url.to_string()));
    }

    Ok(StoreLocation::File(PathBuf::from(path)))
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn default_location() -> Result<StoreLocation, ConfigError> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::NoHomeDir)?;
    Ok(StoreLocation::File(
        base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME),
    ))
}
