// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use crate::pipeline::{ContextKey, RequestContext, Step};
use async_trait::async_trait;
use chrono::Utc;
use corepipe_domain::entities::ResourceEnvelope;
use corepipe_domain::error::CoreError;

/// Builds the update new-state: immutable metadata (`id`/`slug`/`org`) and
/// the entire `status` sub-message come from the existing resource; `spec`
/// and `metadata.name` come from the input. The `spec`/`metadata.name`
/// splice happens at the JSON boundary rather than through per-kind setters
/// — the one place the governing design calls genuinely polymorphic.
pub struct BuildUpdateState<T> {
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> Default for BuildUpdateState<T> {
    fn default() -> Self {
        Self { _marker: std::marker::PhantomData }
    }
}

impl<T> BuildUpdateState<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T: ResourceEnvelope> Step<T> for BuildUpdateState<T> {
    fn name(&self) -> &'static str {
        "BuildUpdateState"
    }

    async fn execute(&self, ctx: &mut RequestContext<T>) -> Result<(), CoreError> {
        let existing_bytes = ctx
            .resource_bytes(ContextKey::ExistingResource)
            .ok_or_else(|| CoreError::internal("BuildUpdateState requires existingResource in context"))?
            .to_vec();
        let existing: T = serde_json::from_slice(&existing_bytes)?;

        let mut merged: serde_json::Value = serde_json::from_slice(&existing_bytes)?;
        let input_value = serde_json::to_value(&ctx.input)?;

        if let Some(spec) = input_value.get("spec").cloned() {
            merged["spec"] = spec;
        }
        if let Some(name) = input_value.pointer("/metadata/name").cloned() {
            merged["metadata"]["name"] = name;
        }

        let mut new_state: T = serde_json::from_value(merged)?;

        let existing_meta = existing.metadata().clone();
        {
            let meta = new_state.metadata_mut();
            meta.id = existing_meta.id;
            meta.slug = existing_meta.slug;
            meta.org = existing_meta.org;
        }

        let now = Utc::now();
        if let (Some(existing_audit), Some(new_audit)) = (existing.audit(), new_state.audit_mut()) {
            *new_audit = existing_audit.advance_for_update(now);
        }

        ctx.new_state = Some(new_state);
        Ok(())
    }
}
