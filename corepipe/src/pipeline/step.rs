// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use crate::pipeline::context::RequestContext;
use async_trait::async_trait;
use corepipe_domain::error::CoreError;

/// A single, named, single-responsibility unit of pipeline work.
#[async_trait]
pub trait Step<T>: Send + Sync {
    /// Stable diagnostic name, also the identifier attached to a failure
    /// wrapped by [`CoreError::Step`].
    fn name(&self) -> &'static str;

    async fn execute(&self, ctx: &mut RequestContext<T>) -> Result<(), CoreError>;
}
