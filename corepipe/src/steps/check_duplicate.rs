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

/// Fails `AlreadyExists` if another resource of the same kind already
/// carries `(org, slug)`. The store is scanned rather than indexed, so
/// uniqueness here is enforced by this step, not by a store-level
/// constraint.
pub struct CheckDuplicate<T> {
    store: Arc<dyn Store>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> CheckDuplicate<T> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store, _marker: std::marker::PhantomData }
    }
}

#[async_trait]
impl<T: ResourceEnvelope> Step<T> for CheckDuplicate<T> {
    fn name(&self) -> &'static str {
        "CheckDuplicate"
    }

    async fn execute(&self, ctx: &mut RequestContext<T>) -> Result<(), CoreError> {
        let meta = ctx.input.metadata();
        let slug = meta.slug.clone();
        let org = meta.org.clone();
        let kind = ctx.meta.kind;

        let existing = self.store.list_resources(kind).await?;
        for bytes in existing {
            let other: T = serde_json::from_slice(&bytes)?;
            let other_meta = other.metadata();
            if other_meta.slug == slug && other_meta.org == org {
                return Err(CoreError::already_exists(format!(
                    "{kind} with slug '{slug}' already exists in this scope"
                )));
            }
        }
        Ok(())
    }
}
