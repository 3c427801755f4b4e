// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use crate::pipeline::{RequestContext, Step};
use async_trait::async_trait;
use corepipe_domain::entities::ResourceEnvelope;
use corepipe_domain::error::CoreError;
use corepipe_domain::repositories::Store;
use std::sync::Arc;

/// Saves `ctx.new_state` under `(kind, id)`. Requires a prior
/// state-building step to have populated `new_state` with a non-empty id.
pub struct Persist<T> {
    store: Arc<dyn Store>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> Persist<T> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store, _marker: std::marker::PhantomData }
    }
}

#[async_trait]
impl<T: ResourceEnvelope> Step<T> for Persist<T> {
    fn name(&self) -> &'static str {
        "Persist"
    }

    async fn execute(&self, ctx: &mut RequestContext<T>) -> Result<(), CoreError> {
        let new_state = ctx
            .new_state
            .as_ref()
            .ok_or_else(|| CoreError::internal("Persist requires a populated new_state"))?;
        let id = new_state.metadata().id.clone();
        if id.is_empty() {
            return Err(CoreError::internal("Persist requires new_state.metadata.id to be set"));
        }

        let bytes = serde_json::to_vec(new_state)?;
        self.store.save_resource(ctx.meta.kind, &id, &bytes).await
    }
}
