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

/// The Apply dispatch pipeline's sole step: determines whether the input's
/// slug already identifies a stored resource. Never fails on absence — the
/// controller reads `ShouldCreate` to pick Create or Update afterward.
pub struct LoadForApply<T> {
    store: Arc<dyn Store>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> LoadForApply<T> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store, _marker: std::marker::PhantomData }
    }
}

#[async_trait]
impl<T: ResourceEnvelope> Step<T> for LoadForApply<T> {
    fn name(&self) -> &'static str {
        "LoadForApply"
    }

    async fn execute(&self, ctx: &mut RequestContext<T>) -> Result<(), CoreError> {
        let kind = ctx.meta.kind;
        let slug = ctx.input.metadata().slug.clone();
        let org = ctx.input.metadata().org.clone();

        let candidates = self.store.list_resources(kind).await?;
        let mut found: Option<(String, Vec<u8>)> = None;
        for bytes in candidates {
            let resource: T = serde_json::from_slice(&bytes)?;
            if resource.metadata().slug == slug && resource.metadata().org == org {
                found = Some((resource.metadata().id.clone(), bytes));
                break;
            }
        }

        match found {
            Some((id, bytes)) => {
                ctx.input.metadata_mut().id = id;
                ctx.set_resource_bytes(ContextKey::ExistingResource, bytes);
                ctx.set_flag(ContextKey::ExistsInDatabase, true);
                ctx.set_flag(ContextKey::ShouldCreate, false);
            }
            None => {
                ctx.set_flag(ContextKey::ExistsInDatabase, false);
                ctx.set_flag(ContextKey::ShouldCreate, true);
            }
        }
        Ok(())
    }
}
