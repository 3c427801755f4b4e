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
use std::marker::PhantomData;

/// Copies the input's id wrapper value into `ContextKey::ResourceId`.
pub struct ExtractResourceId<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for ExtractResourceId<T> {
    fn default() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> ExtractResourceId<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T: HasIdValue + Send + Sync> Step<T> for ExtractResourceId<T> {
    fn name(&self) -> &'static str {
        "ExtractResourceId"
    }

    async fn execute(&self, ctx: &mut RequestContext<T>) -> Result<(), CoreError> {
        let value = ctx.input.value();
        if value.trim().is_empty() {
            return Err(CoreError::invalid_argument("resource id value must not be empty"));
        }
        ctx.set_text(ContextKey::ResourceId, value.to_string());
        Ok(())
    }
}
