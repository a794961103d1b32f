//! Database connection settings.
//!
//! # Responsibility
//! - Describe which SQLite database a process should open.
//! - Load settings from a TOML file or from environment variables.
//!
//! # Invariants
//! - The literal path `:memory:` always selects an in-memory database.
//! - Relative paths in a config file resolve against that file's directory.
//!
//! Example file:
//!
//! ```toml
//! [database]
//! path = "sales.db"
//! busy_timeout_ms = 2000
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_FILE: &str = "SALESDB_CONFIG";
pub const ENV_DB_PATH: &str = "SALESDB_PATH";
pub const ENV_BUSY_TIMEOUT_MS: &str = "SALESDB_BUSY_TIMEOUT_MS";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

const MEMORY_PATH: &str = ":memory:";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("no database path configured; set `database.path` or SALESDB_PATH")]
    MissingPath,
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Where the connection points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    Memory,
    File(PathBuf),
}

impl DatabaseTarget {
    fn from_raw(raw: &str, base_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingPath);
        }
        if trimmed == MEMORY_PATH {
            return Ok(Self::Memory);
        }

        let path = PathBuf::from(trimmed);
        match base_dir {
            Some(base) if path.is_relative() => Ok(Self::File(base.join(path))),
            _ => Ok(Self::File(path)),
        }
    }
}

/// Resolved connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database: DatabaseTarget,
    pub busy_timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    database: RawDatabase,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDatabase {
    path: Option<String>,
    busy_timeout_ms: Option<u64>,
}

impl DbConfig {
    pub fn in_memory() -> Self {
        Self {
            database: DatabaseTarget::Memory,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            database: DatabaseTarget::File(path.into()),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Parses TOML settings. Relative paths are kept as written.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Self::parse(input, None)
    }

    /// Reads and parses a TOML settings file.
    ///
    /// # Errors
    /// - `ConfigError::Io` when the file cannot be read.
    /// - `ConfigError::Parse` for malformed TOML or unknown keys.
    /// - `ConfigError::MissingPath` when `database.path` is absent or blank.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path.parent())
    }

    /// Builds settings from process environment variables.
    ///
    /// `SALESDB_CONFIG` wins when set; otherwise `SALESDB_PATH` is required
    /// and `SALESDB_BUSY_TIMEOUT_MS` is optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DbConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(file) = lookup(ENV_CONFIG_FILE).filter(|value| !value.trim().is_empty()) {
            return Self::load(file.trim());
        }

        let raw_path = lookup(ENV_DB_PATH).ok_or(ConfigError::MissingPath)?;
        let database = DatabaseTarget::from_raw(&raw_path, None)?;

        let busy_timeout_ms = match lookup(ENV_BUSY_TIMEOUT_MS) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_BUSY_TIMEOUT_MS,
                    value,
                })?,
            None => DEFAULT_BUSY_TIMEOUT_MS,
        };

        Ok(Self {
            database,
            busy_timeout_ms,
        })
    }

    fn parse(input: &str, base_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(input)?;
        let raw_path = raw.database.path.ok_or(ConfigError::MissingPath)?;

        Ok(Self {
            database: DatabaseTarget::from_raw(&raw_path, base_dir)?,
            busy_timeout_ms: raw
                .database
                .busy_timeout_ms
                .unwrap_or(DEFAULT_BUSY_TIMEOUT_MS),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DatabaseTarget, DbConfig, DEFAULT_BUSY_TIMEOUT_MS};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn toml_memory_path_selects_in_memory_target() {
        let config = DbConfig::from_toml_str("[database]\npath = \":memory:\"\n").unwrap();
        assert_eq!(config, DbConfig::in_memory());
    }

    #[test]
    fn toml_reads_file_path_and_timeout() {
        let config =
            DbConfig::from_toml_str("[database]\npath = \"sales.db\"\nbusy_timeout_ms = 250\n")
                .unwrap();
        assert_eq!(
            config.database,
            DatabaseTarget::File(PathBuf::from("sales.db"))
        );
        assert_eq!(config.busy_timeout_ms, 250);
    }

    #[test]
    fn toml_without_path_is_rejected() {
        let err = DbConfig::from_toml_str("[database]\nbusy_timeout_ms = 10\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingPath));
    }

    #[test]
    fn toml_unknown_key_is_a_parse_error() {
        let err = DbConfig::from_toml_str("[database]\npath = \"a.db\"\nuser = \"root\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_resolves_relative_path_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("salesdb.toml");
        std::fs::write(&file, "[database]\npath = \"data/sales.db\"\n").unwrap();

        let config = DbConfig::load(&file).unwrap();
        assert_eq!(
            config.database,
            DatabaseTarget::File(dir.path().join("data/sales.db"))
        );
        assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
    }

    #[test]
    fn load_missing_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DbConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn lookup_requires_db_path() {
        let err = DbConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPath));
    }

    #[test]
    fn lookup_parses_timeout_and_rejects_garbage() {
        let config = DbConfig::from_lookup(lookup_from(&[
            ("SALESDB_PATH", "/var/lib/sales.db"),
            ("SALESDB_BUSY_TIMEOUT_MS", "1500"),
        ]))
        .unwrap();
        assert_eq!(config, {
            let mut expected = DbConfig::file("/var/lib/sales.db");
            expected.busy_timeout_ms = 1500;
            expected
        });

        let err = DbConfig::from_lookup(lookup_from(&[
            ("SALESDB_PATH", ":memory:"),
            ("SALESDB_BUSY_TIMEOUT_MS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "SALESDB_BUSY_TIMEOUT_MS",
                ..
            }
        ));
    }

    #[test]
    fn lookup_prefers_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("salesdb.toml");
        std::fs::write(&file, "[database]\npath = \":memory:\"\n").unwrap();
        let file_str = file.to_str().unwrap().to_string();

        let config = DbConfig::from_lookup(lookup_from(&[
            ("SALESDB_CONFIG", file_str.as_str()),
            ("SALESDB_PATH", "/ignored.db"),
        ]))
        .unwrap();
        assert_eq!(config.database, DatabaseTarget::Memory);
    }
}
