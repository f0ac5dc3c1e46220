//! Process-wide configuration for the phonebook.
//!
//! Loaded once at startup and handed to the store constructor. Every key is
//! optional; missing keys take their defaults.
//!
//! # Example YAML
//!
//! ```yaml
//! database:
//!   path: phonebook.db
//!   busy_timeout_ms: 5000
//!   create_if_missing: true
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "phonebook.db";

/// Default time SQLite waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Connection settings for the contact store.
///
/// # Examples
///
/// ```
/// # use phonebook_core::DatabaseConfig;
/// let db = DatabaseConfig::at("/tmp/contacts.db");
/// assert!(db.create_if_missing);
/// assert_eq!(db.busy_timeout_ms, 5000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file.
    pub path: PathBuf,
    /// Busy timeout applied to every connection, in milliseconds.
    pub busy_timeout_ms: u64,
    /// Create the database file when it does not exist.
    pub create_if_missing: bool,
}

impl DatabaseConfig {
    /// Default settings pointing at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            create_if_missing: true,
        }
    }
}

/// Top-level phonebook configuration.
///
/// # Examples
///
/// ```no_run
/// use phonebook_core::PhonebookConfig;
///
/// let config = PhonebookConfig::load("phonebook.yml").unwrap();
/// println!("using {}", config.database.path.display());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhonebookConfig {
    pub database: DatabaseConfig,
}

impl PhonebookConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::CoreError::IoError) if the file cannot be
    /// read, or [`YamlError`](crate::CoreError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Loads configuration if the file exists, otherwise returns defaults.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load) when the file is present.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::CoreError::IoError) if the file cannot be
    /// written, or [`YamlError`](crate::CoreError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
