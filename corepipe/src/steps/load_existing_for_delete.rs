// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use crate::pipeline::{ContextKey, RequestContext, Step};
use async_trait::async_trait;
use corepipe_domain::error::CoreError;
use corepipe_domain::repositories::Store;
use std::sync::Arc;

/// Loads the resource named by `ContextKey::ResourceId`, unlike
/// [`super::LoadExisting`] never falling back to a slug scan. `NotFound` if
/// absent.
pub struct LoadExistingForDelete<T> {
    store: Arc<dyn Store>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> LoadExistingForDelete<T> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store, _marker: std::marker::PhantomData }
    }
}

#[async_trait]
impl<T: Send + Sync> Step<T> for LoadExistingForDelete<T> {
    fn name(&self) -> &'static str {
        "LoadExistingForDelete"
    }

    async fn execute(&self, ctx: &mut RequestContext<T>) -> Result<(), CoreError> {
        let kind = ctx.meta.kind;
        let id = ctx
            .text(ContextKey::ResourceId)
            .ok_or_else(|| CoreError::internal("LoadExistingForDelete requires resourceId in context"))?
            .to_string();

        let bytes = self.store.get_resource(kind, &id).await?;
        ctx.set_resource_bytes(ContextKey::ExistingResource, bytes);
        Ok(())
    }
}
