// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Store Port
//!
//! `Store` is the single persistence seam every lifecycle step goes
//! through. It deals in serialized bytes rather than a generic `T`, which
//! keeps the trait object-safe and lets a single adapter back every
//! resource kind without per-kind monomorphized tables.
//!
//! Resource rows are keyed by `(kind, id)`. Audit rows are a side table keyed
//! by `(kind, resource_id, version_hash)` with a secondary lookup by
//! `(kind, resource_id, tag)`; only the skill push pipeline writes to it
//! today, but the port is kind-generic per the governing design.

use crate::error::CoreError;
use crate::kind::ResourceKind;
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// Fetches the serialized resource `kind/id`. `NotFound` if absent.
    async fn get_resource(&self, kind: ResourceKind, id: &str) -> Result<Vec<u8>, CoreError>;

    /// Lists every serialized resource of `kind`, in no particular order.
    async fn list_resources(&self, kind: ResourceKind) -> Result<Vec<Vec<u8>>, CoreError>;

    /// Upserts the serialized resource `kind/id`.
    async fn save_resource(&self, kind: ResourceKind, id: &str, bytes: &[u8]) -> Result<(), CoreError>;

    /// Deletes the resource `kind/id`. `NotFound` if absent.
    async fn delete_resource(&self, kind: ResourceKind, id: &str) -> Result<(), CoreError>;

    /// Deletes every resource of `kind` whose id starts with `prefix`,
    /// returning the number removed. Used by slug-based lookups that need
    /// to clear stale siblings; never errors on zero matches.
    async fn delete_resources_by_id_prefix(&self, kind: ResourceKind, prefix: &str) -> Result<u64, CoreError>;

    /// Archives `payload` under `(kind, resource_id, version_hash)`, also
    /// indexed by `tag` for the most-recent-tag lookup the push pipeline's
    /// version resolution needs.
    async fn save_audit(
        &self,
        kind: ResourceKind,
        resource_id: &str,
        payload: &[u8],
        version_hash: &str,
        tag: &str,
    ) -> Result<(), CoreError>;

    /// Fetches an archived payload by exact hash. `NotFound` if absent.
    async fn get_audit_by_hash(&self, kind: ResourceKind, resource_id: &str, hash: &str) -> Result<Vec<u8>, CoreError>;

    /// Fetches the most recently archived payload carrying `tag`. `NotFound`
    /// if no archived version ever carried it.
    async fn get_audit_by_tag(&self, kind: ResourceKind, resource_id: &str, tag: &str) -> Result<Vec<u8>, CoreError>;

    /// Bulk-removes every archived audit row for `(kind, resource_id)`,
    /// returning the number removed. Used by skill delete to cascade its
    /// archive history; callers treat failures as best-effort.
    async fn delete_audits_by_resource_id(&self, kind: ResourceKind, resource_id: &str) -> Result<u64, CoreError>;
}
