// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! An in-memory `ArtifactStore`, content-addressed by SHA-256 hex digest.

use async_trait::async_trait;
use corepipe_domain::error::CoreError;
use corepipe_domain::repositories::ArtifactStore;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryArtifactStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn store(&self, hash: &str, bytes: &[u8]) -> Result<String, CoreError> {
        let key = self.storage_key(hash);
        let mut blobs = self.blobs.write().await;
        blobs.entry(key.clone()).or_insert_with(|| bytes.to_vec());
        Ok(key)
    }

    async fn get(&self, storage_key: &str) -> Result<Vec<u8>, CoreError> {
        let blobs = self.blobs.read().await;
        blobs
            .get(storage_key)
            .cloned()
            .ok_or_else(|| CoreError::not_found(format!("artifact '{storage_key}' not found")))
    }

    async fn exists(&self, hash: &str) -> Result<bool, CoreError> {
        let blobs = self.blobs.read().await;
        Ok(blobs.contains_key(&self.storage_key(hash)))
    }

    fn storage_key(&self, hash: &str) -> String {
        format!("mem:{hash}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn storing_the_same_hash_twice_dedups() {
        let store = InMemoryArtifactStore::new();
        let key1 = store.store("deadbeef", b"first").await.unwrap();
        let key2 = store.store("deadbeef", b"second").await.unwrap();
        assert_eq!(key1, key2);
        assert_eq!(store.get(&key1).await.unwrap(), b"first");
    }

    #[tokio::test]
    async fn exists_reflects_prior_stores() {
        let store = InMemoryArtifactStore::new();
        assert!(!store.exists("deadbeef").await.unwrap());
        store.store("deadbeef", b"bytes").await.unwrap();
        assert!(store.exists("deadbeef").await.unwrap());
    }
}
