// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Skill Version Resolution
//!
//! The kind-specific half of `GetByReference` for skills:
//! [`crate::steps::LoadByReference`] locates the current skill by slug and
//! hands off to [`SkillVersionResolver`] once it knows the request wants
//! something other than "latest".

use crate::steps::VersionResolver;
use async_trait::async_trait;
use corepipe_domain::entities::Skill;
use corepipe_domain::error::CoreError;
use corepipe_domain::kind::ResourceKind;
use corepipe_domain::repositories::Store;
use std::sync::Arc;

fn looks_like_hash(version: &str) -> bool {
    version.len() == 64 && version.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
}

pub struct SkillVersionResolver {
    store: Arc<dyn Store>,
}

impl SkillVersionResolver {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl VersionResolver for SkillVersionResolver {
    async fn resolve(
        &self,
        kind: ResourceKind,
        resource_id: &str,
        current_bytes: &[u8],
        version: &str,
    ) -> Result<Vec<u8>, CoreError> {
        let current: Skill = serde_json::from_slice(current_bytes)?;

        if looks_like_hash(version) {
            if current.status.version_hash == version {
                return Ok(current_bytes.to_vec());
            }
            return self.store.get_audit_by_hash(kind, resource_id, version).await;
        }

        if current.spec.tag == version {
            return Ok(current_bytes.to_vec());
        }
        self.store.get_audit_by_tag(kind, resource_id, version).await
    }
}
