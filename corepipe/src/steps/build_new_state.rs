// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use crate::ids::mint_id;
use crate::pipeline::{RequestContext, Step};
use async_trait::async_trait;
use chrono::Utc;
use corepipe_domain::entities::{Audit, ResourceEnvelope};
use corepipe_domain::error::CoreError;

/// Clones the input into a fresh new-state: status cleared, id minted if
/// empty, both audit records set to `created`/now/system.
pub struct BuildNewState<T> {
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> Default for BuildNewState<T> {
    fn default() -> Self {
        Self { _marker: std::marker::PhantomData }
    }
}

impl<T> BuildNewState<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T: ResourceEnvelope> Step<T> for BuildNewState<T> {
    fn name(&self) -> &'static str {
        "BuildNewState"
    }

    async fn execute(&self, ctx: &mut RequestContext<T>) -> Result<(), CoreError> {
        if ctx.input.metadata().name.is_empty() && ctx.input.metadata().slug.is_empty() {
            return Err(CoreError::internal("cannot build new state: metadata is empty"));
        }

        let mut new_state = ctx.input.clone();
        new_state.clear_status();

        if new_state.metadata().id.is_empty() {
            let prefix = ctx.meta.kind.id_prefix();
            new_state.metadata_mut().id = mint_id(prefix);
        }

        let now = Utc::now();
        if let Some(audit) = new_state.audit_mut() {
            *audit = Audit::created_now(now);
        }

        ctx.new_state = Some(new_state);
        Ok(())
    }
}
