// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Filesystem Artifact Store
//!
//! Stores skill archive blobs on disk, sharded by the first two hex
//! characters of their content hash so no single directory accumulates
//! every artifact. Writes land in a sibling temp file first and are renamed
//! into place, so a reader never observes a partially written blob.

use async_trait::async_trait;
use corepipe_domain::error::CoreError;
use corepipe_domain::repositories::ArtifactStore;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

pub struct FilesystemArtifactStore {
    root: PathBuf,
}

impl FilesystemArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn blob_path(&self, hash: &str) -> PathBuf {
        let shard = if hash.len() >= 2 { &hash[..2] } else { "xx" };
        self.root.join(shard).join(hash)
    }

    async fn ensure_parent(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| CoreError::internal(format!("failed to create artifact directory: {err}")))?;
        }
        Ok(())
    }
}

#[async_trait]
impl ArtifactStore for FilesystemArtifactStore {
    async fn store(&self, hash: &str, bytes: &[u8]) -> Result<String, CoreError> {
        let final_path = self.blob_path(hash);
        if tokio::fs::try_exists(&final_path).await.unwrap_or(false) {
            return Ok(self.storage_key(hash));
        }

        self.ensure_parent(&final_path).await?;
        let temp_path = final_path.with_extension("tmp");

        let mut file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(|err| CoreError::internal(format!("failed to create artifact temp file: {err}")))?;
        file.write_all(bytes)
            .await
            .map_err(|err| CoreError::internal(format!("failed to write artifact: {err}")))?;
        file.sync_all()
            .await
            .map_err(|err| CoreError::internal(format!("failed to flush artifact: {err}")))?;
        drop(file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&temp_path, perms)
                .await
                .map_err(|err| CoreError::internal(format!("failed to set artifact permissions: {err}")))?;
        }

        tokio::fs::rename(&temp_path, &final_path)
            .await
            .map_err(|err| CoreError::internal(format!("failed to commit artifact: {err}")))?;

        Ok(self.storage_key(hash))
    }

    async fn get(&self, storage_key: &str) -> Result<Vec<u8>, CoreError> {
        let path = self.root.join(storage_key);
        tokio::fs::read(&path)
            .await
            .map_err(|_| CoreError::not_found(format!("artifact '{storage_key}' not found")))
    }

    async fn exists(&self, hash: &str) -> Result<bool, CoreError> {
        Ok(tokio::fs::try_exists(self.blob_path(hash)).await.unwrap_or(false))
    }

    fn storage_key(&self, hash: &str) -> String {
        let shard = if hash.len() >= 2 { &hash[..2] } else { "xx" };
        format!("{shard}/{hash}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn store_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FilesystemArtifactStore::new(dir.path());
        let key = store.store("abcd1234", b"zip bytes").await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), b"zip bytes");
    }

    #[tokio::test]
    async fn store_is_idempotent_for_the_same_hash() {
        let dir = TempDir::new().unwrap();
        let store = FilesystemArtifactStore::new(dir.path());
        let key1 = store.store("abcd1234", b"first").await.unwrap();
        let key2 = store.store("abcd1234", b"second").await.unwrap();
        assert_eq!(key1, key2);
        assert_eq!(store.get(&key1).await.unwrap(), b"first");
    }

    #[tokio::test]
    async fn missing_artifact_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = FilesystemArtifactStore::new(dir.path());
        assert!(store.get("zz/nonexistent").await.is_err());
    }
}
