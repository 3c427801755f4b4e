// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use crate::ids::slugify;
use crate::pipeline::{RequestContext, Step};
use async_trait::async_trait;
use corepipe_domain::entities::ResourceEnvelope;
use corepipe_domain::error::CoreError;
use std::marker::PhantomData;

/// Sets `metadata.slug` from `metadata.name` if it is not already set.
/// Idempotent: a pre-existing slug is left untouched.
pub struct ResolveSlug<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for ResolveSlug<T> {
    fn default() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> ResolveSlug<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T: ResourceEnvelope> Step<T> for ResolveSlug<T> {
    fn name(&self) -> &'static str {
        "ResolveSlug"
    }

    async fn execute(&self, ctx: &mut RequestContext<T>) -> Result<(), CoreError> {
        let meta = ctx.input.metadata_mut();
        if !meta.slug.is_empty() {
            return Ok(());
        }
        if meta.name.is_empty() {
            return Err(CoreError::internal("cannot resolve slug: both name and slug are empty"));
        }
        meta.slug = slugify(&meta.name);
        Ok(())
    }
}
