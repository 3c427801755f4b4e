// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Shared metadata and audit structures used by every resource kind.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where a resource is scoped for visibility and ownership purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OwnerScope {
    #[default]
    Platform,
    Organization,
    IdentityAccount,
}

/// The `metadata` section common to every resource.
///
/// `id`, `slug`, and `org` are immutable once a resource is created; the
/// update lifecycle step enforces that by restoring them from the existing
/// record on every update rather than trusting client input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Metadata {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub owner_scope: OwnerScope,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One half of a resource's status audit trail: who/when for either the
/// spec or the status sub-message, plus the event that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AuditInfo {
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub updated_by: String,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub event: AuditEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuditEvent {
    #[default]
    Created,
    Updated,
}

impl std::fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuditEvent::Created => "created",
            AuditEvent::Updated => "updated",
        };
        f.write_str(s)
    }
}

/// The system actor recorded for every audit field the core writes itself.
pub const SYSTEM_ACTOR: &str = "system";

/// The `status.audit` sub-structure every resource kind embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Audit {
    #[serde(default)]
    pub spec_audit: AuditInfo,
    #[serde(default)]
    pub status_audit: AuditInfo,
}

impl Audit {
    /// Builds the audit pair written by `BuildNewState`: both records
    /// identical, `created`, stamped `now`, by `SYSTEM`.
    pub fn created_now(now: chrono::DateTime<chrono::Utc>) -> Self {
        let info = AuditInfo {
            created_by: SYSTEM_ACTOR.to_string(),
            created_at: Some(now),
            updated_by: SYSTEM_ACTOR.to_string(),
            updated_at: Some(now),
            event: AuditEvent::Created,
        };
        Self {
            spec_audit: info.clone(),
            status_audit: info,
        }
    }

    /// Advances an existing audit pair the way `BuildUpdateState` does:
    /// `spec_audit.created_*` is preserved (falling back to now/system if
    /// absent), `updated_*` is refreshed, `event` becomes `updated`;
    /// `status_audit` is reset wholesale to now/system/updated.
    pub fn advance_for_update(&self, now: chrono::DateTime<chrono::Utc>) -> Self {
        let created_by = if self.spec_audit.created_by.is_empty() {
            SYSTEM_ACTOR.to_string()
        } else {
            self.spec_audit.created_by.clone()
        };
        let created_at = self.spec_audit.created_at.unwrap_or(now);

        let spec_audit = AuditInfo {
            created_by,
            created_at: Some(created_at),
            updated_by: SYSTEM_ACTOR.to_string(),
            updated_at: Some(now),
            event: AuditEvent::Updated,
        };
        let status_audit = AuditInfo {
            created_by: SYSTEM_ACTOR.to_string(),
            created_at: Some(now),
            updated_by: SYSTEM_ACTOR.to_string(),
            updated_at: Some(now),
            event: AuditEvent::Updated,
        };
        Self { spec_audit, status_audit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_now_mirrors_spec_and_status_audit() {
        let now = chrono::Utc::now();
        let audit = Audit::created_now(now);
        assert_eq!(audit.spec_audit, audit.status_audit);
        assert_eq!(audit.spec_audit.event, AuditEvent::Created);
    }

    #[test]
    fn advance_for_update_preserves_created_and_bumps_updated() {
        let created = chrono::Utc::now() - chrono::Duration::hours(1);
        let original = Audit::created_now(created);
        let now = chrono::Utc::now();
        let advanced = original.advance_for_update(now);

        assert_eq!(advanced.spec_audit.created_by, original.spec_audit.created_by);
        assert_eq!(advanced.spec_audit.created_at, original.spec_audit.created_at);
        assert_eq!(advanced.spec_audit.event, AuditEvent::Updated);
        assert!(advanced.spec_audit.updated_at.unwrap() > created);
        assert_eq!(advanced.status_audit.event, AuditEvent::Updated);
    }
}
