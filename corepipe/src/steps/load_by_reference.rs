// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use crate::model::Reference;
use crate::pipeline::{ContextKey, RequestContext, Step};
use async_trait::async_trait;
use corepipe_domain::entities::ResourceEnvelope;
use corepipe_domain::error::CoreError;
use corepipe_domain::kind::ResourceKind;
use corepipe_domain::repositories::Store;
use std::sync::Arc;

/// The kind-specific half of version resolution: given the
/// current resource's bytes and a non-"latest" version string, resolve it
/// to an archived snapshot. Only the skill subsystem has history to search;
/// every other kind wires [`CurrentOnlyResolver`].
#[async_trait]
pub trait VersionResolver: Send + Sync {
    async fn resolve(
        &self,
        kind: ResourceKind,
        resource_id: &str,
        current_bytes: &[u8],
        version: &str,
    ) -> Result<Vec<u8>, CoreError>;
}

/// A resolver for kinds with no archive history: any version other than
/// "latest"/empty is `NotFound`, since nothing was ever archived for them.
pub struct CurrentOnlyResolver;

#[async_trait]
impl VersionResolver for CurrentOnlyResolver {
    async fn resolve(
        &self,
        kind: ResourceKind,
        resource_id: &str,
        _current_bytes: &[u8],
        version: &str,
    ) -> Result<Vec<u8>, CoreError> {
        Err(CoreError::not_found(format!(
            "{kind} '{resource_id}' has no version '{version}'"
        )))
    }
}

/// Resolves a `{kind, slug, org, version}` reference to `TargetResource`.
/// The current resource is always located by slug first; version
/// resolution beyond "latest" is delegated to a [`VersionResolver`].
pub struct LoadByReference<T> {
    store: Arc<dyn Store>,
    resolver: Arc<dyn VersionResolver>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> LoadByReference<T> {
    pub fn new(store: Arc<dyn Store>, resolver: Arc<dyn VersionResolver>) -> Self {
        Self { store, resolver, _marker: std::marker::PhantomData }
    }
}

#[async_trait]
impl<T: ResourceEnvelope> Step<Reference> for LoadByReference<T> {
    fn name(&self) -> &'static str {
        "LoadByReference"
    }

    async fn execute(&self, ctx: &mut RequestContext<Reference>) -> Result<(), CoreError> {
        let kind = ctx.meta.kind;
        let reference = &ctx.input;

        if let Some(ref_kind) = reference.kind {
            if ref_kind != kind {
                return Err(CoreError::invalid_argument(format!(
                    "reference kind '{ref_kind}' does not match request kind '{kind}'"
                )));
            }
        }
        if reference.slug.trim().is_empty() {
            return Err(CoreError::invalid_argument("reference slug must not be empty"));
        }

        let candidates = self.store.list_resources(kind).await?;
        let mut current: Option<T> = None;
        for bytes in candidates {
            let resource: T = serde_json::from_slice(&bytes)?;
            if resource.metadata().slug == reference.slug && resource.metadata().org == reference.org {
                current = Some(resource);
                break;
            }
        }
        let current = current.ok_or_else(|| {
            CoreError::not_found(format!("{kind} with slug '{}' not found", reference.slug))
        })?;

        let version = reference.version.trim();
        if version.is_empty() || version.eq_ignore_ascii_case("latest") {
            ctx.set_resource(ContextKey::TargetResource, &current)?;
            return Ok(());
        }

        let resource_id = current.metadata().id.clone();
        let current_bytes = serde_json::to_vec(&current)?;
        let resolved = self
            .resolver
            .resolve(kind, &resource_id, &current_bytes, version)
            .await
            .map_err(|_| {
                CoreError::not_found(format!("{kind} '{}:{version}' not found", reference.slug))
            })?;
        ctx.set_resource_bytes(ContextKey::TargetResource, resolved);
        Ok(())
    }
}
