// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # SQLite Store
//!
//! A `Store` adapter backed by a single SQLite database shared by every
//! resource kind: a `resources` table keyed by `(kind, id)` and an `audits`
//! side table keyed by `(kind, resource_id, version_hash)`, indexed again by
//! `(kind, resource_id, tag)` for the most-recent-tag lookup. See
//! `migrations/` for the schema `ensure_schema` applies on connect.

use async_trait::async_trait;
use corepipe_domain::error::CoreError;
use corepipe_domain::kind::ResourceKind;
use corepipe_domain::repositories::Store;
use sqlx::{Row, SqlitePool};

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wraps an already-migrated pool. Callers that need to create and
    /// migrate a database file from scratch should go through
    /// `crate::infra::schema::initialize_database` first.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, CoreError> {
        let pool = crate::infra::schema::initialize_database(database_url)
            .await
            .map_err(|err| CoreError::internal(format!("failed to initialize database: {err}")))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn get_resource(&self, kind: ResourceKind, id: &str) -> Result<Vec<u8>, CoreError> {
        let row = sqlx::query("SELECT body FROM resources WHERE kind = ? AND id = ?")
            .bind(kind.name())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| CoreError::internal(format!("failed to query {kind} '{id}': {err}")))?;

        match row {
            Some(row) => Ok(row.get::<Vec<u8>, _>("body")),
            None => Err(CoreError::not_found(format!("{kind} '{id}' not found"))),
        }
    }

    async fn list_resources(&self, kind: ResourceKind) -> Result<Vec<Vec<u8>>, CoreError> {
        let rows = sqlx::query("SELECT body FROM resources WHERE kind = ?")
            .bind(kind.name())
            .fetch_all(&self.pool)
            .await
            .map_err(|err| CoreError::internal(format!("failed to list {kind}: {err}")))?;

        Ok(rows.into_iter().map(|row| row.get::<Vec<u8>, _>("body")).collect())
    }

    async fn save_resource(&self, kind: ResourceKind, id: &str, bytes: &[u8]) -> Result<(), CoreError> {
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO resources (kind, id, body, updated_at) VALUES (?, ?, ?, ?) \
             ON CONFLICT (kind, id) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
        )
        .bind(kind.name())
        .bind(id)
        .bind(bytes)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|err| CoreError::internal(format!("failed to save {kind} '{id}': {err}")))?;
        Ok(())
    }

    async fn delete_resource(&self, kind: ResourceKind, id: &str) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM resources WHERE kind = ? AND id = ?")
            .bind(kind.name())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| CoreError::internal(format!("failed to delete {kind} '{id}': {err}")))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::not_found(format!("{kind} '{id}' not found")));
        }
        Ok(())
    }

    async fn delete_resources_by_id_prefix(&self, kind: ResourceKind, prefix: &str) -> Result<u64, CoreError> {
        let like_pattern = format!("{}%", prefix.replace('%', "\\%").replace('_', "\\_"));
        let result = sqlx::query("DELETE FROM resources WHERE kind = ? AND id LIKE ? ESCAPE '\\'")
            .bind(kind.name())
            .bind(like_pattern)
            .execute(&self.pool)
            .await
            .map_err(|err| CoreError::internal(format!("failed to delete {kind} siblings of '{prefix}': {err}")))?;
        Ok(result.rows_affected())
    }

    async fn save_audit(
        &self,
        kind: ResourceKind,
        resource_id: &str,
        payload: &[u8],
        version_hash: &str,
        tag: &str,
    ) -> Result<(), CoreError> {
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO audits (kind, resource_id, version_hash, tag, archived_at, payload) \
             VALUES (?, ?, ?, ?, ?, ?) ON CONFLICT (kind, resource_id, version_hash) DO NOTHING",
        )
        .bind(kind.name())
        .bind(resource_id)
        .bind(version_hash)
        .bind(tag)
        .bind(now)
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|err| CoreError::internal(format!("failed to archive {kind} '{resource_id}': {err}")))?;
        Ok(())
    }

    async fn get_audit_by_hash(&self, kind: ResourceKind, resource_id: &str, hash: &str) -> Result<Vec<u8>, CoreError> {
        let row = sqlx::query(
            "SELECT payload FROM audits WHERE kind = ? AND resource_id = ? AND version_hash = ?",
        )
        .bind(kind.name())
        .bind(resource_id)
        .bind(hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| CoreError::internal(format!("failed to query archive of {kind} '{resource_id}': {err}")))?;

        match row {
            Some(row) => Ok(row.get::<Vec<u8>, _>("payload")),
            None => Err(CoreError::not_found(format!(
                "{kind} '{resource_id}' has no archive with hash '{hash}'"
            ))),
        }
    }

    async fn get_audit_by_tag(&self, kind: ResourceKind, resource_id: &str, tag: &str) -> Result<Vec<u8>, CoreError> {
        let row = sqlx::query(
            "SELECT payload FROM audits WHERE kind = ? AND resource_id = ? AND tag = ? \
             ORDER BY archived_at DESC LIMIT 1",
        )
        .bind(kind.name())
        .bind(resource_id)
        .bind(tag)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| CoreError::internal(format!("failed to query archive of {kind} '{resource_id}': {err}")))?;

        match row {
            Some(row) => Ok(row.get::<Vec<u8>, _>("payload")),
            None => Err(CoreError::not_found(format!(
                "{kind} '{resource_id}' has no archive tagged '{tag}'"
            ))),
        }
    }

    async fn delete_audits_by_resource_id(&self, kind: ResourceKind, resource_id: &str) -> Result<u64, CoreError> {
        let result = sqlx::query("DELETE FROM audits WHERE kind = ? AND resource_id = ?")
            .bind(kind.name())
            .bind(resource_id)
            .execute(&self.pool)
            .await
            .map_err(|err| CoreError::internal(format!("failed to delete archives of {kind} '{resource_id}': {err}")))?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    async fn test_store() -> SqliteStore {
        let temp = NamedTempFile::new().unwrap();
        let db_url = format!("sqlite://{}", temp.path().to_str().unwrap());
        drop(temp);
        SqliteStore::connect(&db_url).await.unwrap()
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let store = test_store().await;
        store.save_resource(ResourceKind::Agent, "agt_1", b"hello").await.unwrap();
        assert_eq!(store.get_resource(ResourceKind::Agent, "agt_1").await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn save_resource_upserts() {
        let store = test_store().await;
        store.save_resource(ResourceKind::Agent, "agt_1", b"v1").await.unwrap();
        store.save_resource(ResourceKind::Agent, "agt_1", b"v2").await.unwrap();
        assert_eq!(store.get_resource(ResourceKind::Agent, "agt_1").await.unwrap(), b"v2");
    }

    #[tokio::test]
    async fn delete_missing_resource_is_not_found() {
        let store = test_store().await;
        let err = store.delete_resource(ResourceKind::Agent, "missing").await.unwrap_err();
        assert_eq!(err.code(), corepipe_domain::ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn audit_round_trip_by_hash_and_tag() {
        let store = test_store().await;
        store.save_audit(ResourceKind::Skill, "skl_1", b"v1", "hash1", "stable").await.unwrap();
        store.save_audit(ResourceKind::Skill, "skl_1", b"v2", "hash2", "stable").await.unwrap();

        assert_eq!(store.get_audit_by_hash(ResourceKind::Skill, "skl_1", "hash1").await.unwrap(), b"v1");
        assert_eq!(store.get_audit_by_tag(ResourceKind::Skill, "skl_1", "stable").await.unwrap(), b"v2");
    }

    #[tokio::test]
    async fn delete_audits_by_resource_id_clears_history() {
        let store = test_store().await;
        store.save_audit(ResourceKind::Skill, "skl_1", b"v1", "hash1", "stable").await.unwrap();
        let removed = store.delete_audits_by_resource_id(ResourceKind::Skill, "skl_1").await.unwrap();
        assert_eq!(removed, 1);
        assert!(store.get_audit_by_hash(ResourceKind::Skill, "skl_1", "hash1").await.is_err());
    }
}
