// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use crate::pipeline::{ContextKey, RequestContext, Step};
use async_trait::async_trait;
use corepipe_domain::entities::ResourceEnvelope;
use corepipe_domain::error::CoreError;
use corepipe_domain::repositories::Store;
use std::sync::Arc;

/// Loads the resource identified by `input.metadata.id` if set, falling
/// back to a `(kind, slug, org)` scan otherwise. On the slug fallback,
/// writes the resolved id back onto `ctx.input` — the one documented
/// exception to the input being otherwise left untouched, required so
/// `BuildUpdateState` (and, through it, `Persist`) has an id to work with.
pub struct LoadExisting<T> {
    store: Arc<dyn Store>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> LoadExisting<T> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store, _marker: std::marker::PhantomData }
    }
}

#[async_trait]
impl<T: ResourceEnvelope> Step<T> for LoadExisting<T> {
    fn name(&self) -> &'static str {
        "LoadExisting"
    }

    async fn execute(&self, ctx: &mut RequestContext<T>) -> Result<(), CoreError> {
        let kind = ctx.meta.kind;
        let id = ctx.input.metadata().id.clone();

        let bytes = if !id.is_empty() {
            self.store.get_resource(kind, &id).await?
        } else {
            let slug = ctx.input.metadata().slug.clone();
            let org = ctx.input.metadata().org.clone();
            if slug.is_empty() {
                return Err(CoreError::invalid_argument(
                    "cannot load existing resource: neither id nor slug is set",
                ));
            }
            let candidates = self.store.list_resources(kind).await?;
            let mut found = None;
            for candidate in candidates {
                let resource: T = serde_json::from_slice(&candidate)?;
                if resource.metadata().slug == slug && resource.metadata().org == org {
                    found = Some((resource.metadata().id.clone(), candidate));
                    break;
                }
            }
            match found {
                Some((resolved_id, bytes)) => {
                    ctx.input.metadata_mut().id = resolved_id;
                    bytes
                }
                None => return Err(CoreError::not_found(format!("{kind} with slug '{slug}' not found"))),
            }
        };

        ctx.set_resource_bytes(ContextKey::ExistingResource, bytes);
        Ok(())
    }
}
