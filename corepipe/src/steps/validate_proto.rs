// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use crate::model::Validate;
use crate::pipeline::{RequestContext, Step};
use async_trait::async_trait;
use corepipe_domain::error::CoreError;
use std::marker::PhantomData;

/// Runs `T::validate` against the pipeline input. No effect on success.
pub struct ValidateProto<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Default for ValidateProto<T> {
    fn default() -> Self {
        Self { _marker: PhantomData }
    }
}

impl<T> ValidateProto<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T: Validate + Send + Sync> Step<T> for ValidateProto<T> {
    fn name(&self) -> &'static str {
        "ValidateProto"
    }

    async fn execute(&self, ctx: &mut RequestContext<T>) -> Result<(), CoreError> {
        ctx.input.validate()
    }
}
