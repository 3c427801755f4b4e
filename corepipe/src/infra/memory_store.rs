// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # In-Memory Store
//!
//! A `Store` adapter backing every resource kind with a pair of `HashMap`s
//! guarded by `RwLock`: one for current resource rows, one for archived
//! audit rows. Meant for tests and local demos, not for anything that needs
//! to survive a restart.

use async_trait::async_trait;
use corepipe_domain::error::CoreError;
use corepipe_domain::kind::ResourceKind;
use corepipe_domain::repositories::Store;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Clone)]
struct AuditRow {
    version_hash: String,
    tag: String,
    payload: Vec<u8>,
}

/// An in-memory `Store`. Cheap to construct, nothing persists past the
/// process.
#[derive(Default)]
pub struct InMemoryStore {
    resources: RwLock<HashMap<(ResourceKind, String), Vec<u8>>>,
    audits: RwLock<HashMap<(ResourceKind, String), Vec<AuditRow>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn get_resource(&self, kind: ResourceKind, id: &str) -> Result<Vec<u8>, CoreError> {
        let resources = self.resources.read().await;
        resources
            .get(&(kind, id.to_string()))
            .cloned()
            .ok_or_else(|| CoreError::not_found(format!("{kind} '{id}' not found")))
    }

    async fn list_resources(&self, kind: ResourceKind) -> Result<Vec<Vec<u8>>, CoreError> {
        let resources = self.resources.read().await;
        Ok(resources
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, bytes)| bytes.clone())
            .collect())
    }

    async fn save_resource(&self, kind: ResourceKind, id: &str, bytes: &[u8]) -> Result<(), CoreError> {
        let mut resources = self.resources.write().await;
        resources.insert((kind, id.to_string()), bytes.to_vec());
        Ok(())
    }

    async fn delete_resource(&self, kind: ResourceKind, id: &str) -> Result<(), CoreError> {
        let mut resources = self.resources.write().await;
        resources
            .remove(&(kind, id.to_string()))
            .map(|_| ())
            .ok_or_else(|| CoreError::not_found(format!("{kind} '{id}' not found")))
    }

    async fn delete_resources_by_id_prefix(&self, kind: ResourceKind, prefix: &str) -> Result<u64, CoreError> {
        let mut resources = self.resources.write().await;
        let doomed: Vec<(ResourceKind, String)> = resources
            .keys()
            .filter(|(k, id)| *k == kind && id.starts_with(prefix))
            .cloned()
            .collect();
        let count = doomed.len() as u64;
        for key in doomed {
            resources.remove(&key);
        }
        Ok(count)
    }

    async fn save_audit(
        &self,
        kind: ResourceKind,
        resource_id: &str,
        payload: &[u8],
        version_hash: &str,
        tag: &str,
    ) -> Result<(), CoreError> {
        let mut audits = self.audits.write().await;
        let rows = audits.entry((kind, resource_id.to_string())).or_default();
        if !rows.iter().any(|row| row.version_hash == version_hash) {
            rows.push(AuditRow {
                version_hash: version_hash.to_string(),
                tag: tag.to_string(),
                payload: payload.to_vec(),
            });
        }
        Ok(())
    }

    async fn get_audit_by_hash(&self, kind: ResourceKind, resource_id: &str, hash: &str) -> Result<Vec<u8>, CoreError> {
        let audits = self.audits.read().await;
        audits
            .get(&(kind, resource_id.to_string()))
            .and_then(|rows| rows.iter().find(|row| row.version_hash == hash))
            .map(|row| row.payload.clone())
            .ok_or_else(|| CoreError::not_found(format!("{kind} '{resource_id}' has no archive with hash '{hash}'")))
    }

    async fn get_audit_by_tag(&self, kind: ResourceKind, resource_id: &str, tag: &str) -> Result<Vec<u8>, CoreError> {
        let audits = self.audits.read().await;
        audits
            .get(&(kind, resource_id.to_string()))
            .and_then(|rows| rows.iter().rev().find(|row| row.tag == tag))
            .map(|row| row.payload.clone())
            .ok_or_else(|| CoreError::not_found(format!("{kind} '{resource_id}' has no archive tagged '{tag}'")))
    }

    async fn delete_audits_by_resource_id(&self, kind: ResourceKind, resource_id: &str) -> Result<u64, CoreError> {
        let mut audits = self.audits.write().await;
        match audits.remove(&(kind, resource_id.to_string())) {
            Some(rows) => Ok(rows.len() as u64),
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let store = InMemoryStore::new();
        store.save_resource(ResourceKind::Agent, "agt_1", b"hello").await.unwrap();
        let bytes = store.get_resource(ResourceKind::Agent, "agt_1").await.unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[tokio::test]
    async fn get_missing_resource_is_not_found() {
        let store = InMemoryStore::new();
        let err = store.get_resource(ResourceKind::Agent, "missing").await.unwrap_err();
        assert_eq!(err.code(), corepipe_domain::ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn audits_are_isolated_per_kind_and_resource() {
        let store = InMemoryStore::new();
        store.save_audit(ResourceKind::Skill, "skl_1", b"v1", "hash1", "stable").await.unwrap();
        store.save_audit(ResourceKind::Skill, "skl_2", b"v2", "hash2", "stable").await.unwrap();

        let by_hash = store.get_audit_by_hash(ResourceKind::Skill, "skl_1", "hash1").await.unwrap();
        assert_eq!(by_hash, b"v1");
        assert!(store.get_audit_by_hash(ResourceKind::Skill, "skl_2", "hash1").await.is_err());
    }

    #[tokio::test]
    async fn get_audit_by_tag_returns_most_recent() {
        let store = InMemoryStore::new();
        store.save_audit(ResourceKind::Skill, "skl_1", b"v1", "hash1", "stable").await.unwrap();
        store.save_audit(ResourceKind::Skill, "skl_1", b"v2", "hash2", "stable").await.unwrap();

        let by_tag = store.get_audit_by_tag(ResourceKind::Skill, "skl_1", "stable").await.unwrap();
        assert_eq!(by_tag, b"v2");
    }

    #[tokio::test]
    async fn delete_audits_by_resource_id_clears_all_versions() {
        let store = InMemoryStore::new();
        store.save_audit(ResourceKind::Skill, "skl_1", b"v1", "hash1", "stable").await.unwrap();
        store.save_audit(ResourceKind::Skill, "skl_1", b"v2", "hash2", "stable").await.unwrap();

        let removed = store.delete_audits_by_resource_id(ResourceKind::Skill, "skl_1").await.unwrap();
        assert_eq!(removed, 2);
        assert!(store.get_audit_by_hash(ResourceKind::Skill, "skl_1", "hash1").await.is_err());
    }

    #[tokio::test]
    async fn delete_resources_by_id_prefix_removes_matching_siblings() {
        let store = InMemoryStore::new();
        store.save_resource(ResourceKind::Agent, "agt_abc-1", b"x").await.unwrap();
        store.save_resource(ResourceKind::Agent, "agt_abc-2", b"y").await.unwrap();
        store.save_resource(ResourceKind::Agent, "agt_other", b"z").await.unwrap();

        let removed = store.delete_resources_by_id_prefix(ResourceKind::Agent, "agt_abc").await.unwrap();
        assert_eq!(removed, 2);
        assert!(store.get_resource(ResourceKind::Agent, "agt_other").await.is_ok());
    }
}
