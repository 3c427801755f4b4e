// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use crate::model::HasIdValue;
use crate::pipeline::{ContextKey, RequestContext, Step};
use async_trait::async_trait;
use corepipe_domain::error::CoreError;
use corepipe_domain::repositories::Store;
use std::sync::Arc;

/// The `Get` pipeline's sole step: loads the resource named by the input id
/// wrapper into `ContextKey::TargetResource`.
pub struct LoadTarget<T> {
    store: Arc<dyn Store>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> LoadTarget<T> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store, _marker: std::marker::PhantomData }
    }
}

#[async_trait]
impl<T: HasIdValue + Send + Sync> Step<T> for LoadTarget<T> {
    fn name(&self) -> &'static str {
        "LoadTarget"
    }

    async fn execute(&self, ctx: &mut RequestContext<T>) -> Result<(), CoreError> {
        let id = ctx.input.value().to_string();
        if id.trim().is_empty() {
            return Err(CoreError::invalid_argument("id value must not be empty"));
        }
        let kind = ctx.meta.kind;
        let bytes = self.store.get_resource(kind, &id).await?;
        ctx.set_resource_bytes(ContextKey::TargetResource, bytes);
        Ok(())
    }
}
