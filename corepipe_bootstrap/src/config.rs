// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Bootstrap Configuration
//!
//! Loads the small set of settings the binary needs before it can build a
//! `Store`/`ArtifactStore` pair: which backend to use, where its data lives,
//! and how verbose logging should be. TOML file first, `COREPIPE_`-prefixed
//! environment variables on top, CLI flags taking final precedence (applied
//! by the caller after `CoreConfig::load`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::Memory
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// SQLite connection URL, only consulted when `backend` is `Sqlite`.
    pub database_url: String,
    /// Filesystem root for skill artifacts, only consulted when `backend`
    /// is `Sqlite` (the in-memory backend pairs with an in-memory artifact
    /// store regardless).
    pub artifact_root: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            database_url: "sqlite://./corepipe.db".to_string(),
            artifact_root: PathBuf::from("./artifacts"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl CoreConfig {
    /// Loads `path` if it exists, applies `COREPIPE_`-prefixed environment
    /// overrides, and falls back to defaults entirely when the file is
    /// absent — a missing config file is not an error, an unparsable one is.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|err| format!("failed to read {path:?}: {err}"))?;
            toml::from_str(&content).map_err(|err| format!("failed to parse {path:?}: {err}"))?
        } else {
            debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(backend) = std::env::var("COREPIPE_STORAGE_BACKEND") {
            match backend.to_lowercase().as_str() {
                "memory" => self.storage.backend = StorageBackend::Memory,
                "sqlite" => self.storage.backend = StorageBackend::Sqlite,
                other => warn!(backend = %other, "unrecognized COREPIPE_STORAGE_BACKEND, ignoring"),
            }
        }
        if let Ok(url) = std::env::var("COREPIPE_DATABASE_URL") {
            self.storage.database_url = url;
        }
        if let Ok(root) = std::env::var("COREPIPE_ARTIFACT_ROOT") {
            self.storage.artifact_root = PathBuf::from(root);
        }
        if let Ok(level) = std::env::var("COREPIPE_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = CoreConfig::load("/nonexistent/corepipe.toml").unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parses_a_well_formed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corepipe.toml");
        std::fs::write(
            &path,
            r#"
            [storage]
            backend = "sqlite"
            database_url = "sqlite://./data.db"
            artifact_root = "./blobs"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        let config = CoreConfig::load(&path).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.database_url, "sqlite://./data.db");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corepipe.toml");
        std::fs::write(&path, "not valid toml =====").unwrap();
        assert!(CoreConfig::load(&path).is_err());
    }
}
