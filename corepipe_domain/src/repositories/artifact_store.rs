// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Artifact Store Port
//!
//! `ArtifactStore` holds the raw bytes of skill ZIP archives, addressed by
//! their SHA-256 content hash rather than any resource id. Two resources
//! pointing at identical bytes share one stored blob.

use crate::error::CoreError;
use async_trait::async_trait;

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Stores `bytes` under `hash`, returning the storage key the caller
    /// should persist on the resource's status. Storing an already-present
    /// hash is a no-op that still returns the same key, which is what makes
    /// re-pushing identical artifact bytes a true no-op end to end.
    async fn store(&self, hash: &str, bytes: &[u8]) -> Result<String, CoreError>;

    /// Fetches bytes by the storage key returned from [`Self::store`].
    /// `NotFound` if absent.
    async fn get(&self, storage_key: &str) -> Result<Vec<u8>, CoreError>;

    /// True if an artifact with this content hash has already been stored.
    async fn exists(&self, hash: &str) -> Result<bool, CoreError>;

    /// Derives the storage key for `hash` without touching storage. Adapters
    /// that lay blobs out in a predictable path (e.g. sharded by hash
    /// prefix) use this to avoid an existence check before every write.
    fn storage_key(&self, hash: &str) -> String;
}
