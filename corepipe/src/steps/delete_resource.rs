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

/// Removes the resource named by `ContextKey::ResourceId`.
pub struct DeleteResource<T> {
    store: Arc<dyn Store>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> DeleteResource<T> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store, _marker: std::marker::PhantomData }
    }
}

#[async_trait]
impl<T: Send + Sync> Step<T> for DeleteResource<T> {
    fn name(&self) -> &'static str {
        "DeleteResource"
    }

    async fn execute(&self, ctx: &mut RequestContext<T>) -> Result<(), CoreError> {
        let id = ctx
            .text(ContextKey::ResourceId)
            .ok_or_else(|| CoreError::internal("DeleteResource requires resourceId in context"))?
            .to_string();
        self.store.delete_resource(ctx.meta.kind, &id).await
    }
}
