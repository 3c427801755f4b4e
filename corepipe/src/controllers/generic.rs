// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use crate::model::{KindTagged, Reference, ResourceId};
use crate::pipeline::{ContextKey, Pipeline, RequestMeta};
use crate::steps::{
    BuildNewState, BuildUpdateState, CheckDuplicate, CurrentOnlyResolver, DeleteResource, ExtractResourceId,
    LoadByReference, LoadExisting, LoadExistingForDelete, LoadForApply, LoadTarget, Persist, ValidateProto,
    VersionResolver,
};
use corepipe_domain::entities::ResourceEnvelope;
use corepipe_domain::error::CoreError;
use corepipe_domain::repositories::Store;
use std::sync::Arc;

/// Controller holding only the store (and, for kinds with version history,
/// a resolver). Generic over any
/// [`ResourceEnvelope`] + [`KindTagged`] type, which is how `Agent`,
/// `Workflow`, `Session`, and `ExecutionContext` each get a full
/// Create/Update/Delete/Apply/Get/GetByReference/List surface without
/// repeating the pipeline wiring four times.
pub struct ResourceController<T> {
    store: Arc<dyn Store>,
    resolver: Arc<dyn VersionResolver>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T: ResourceEnvelope + KindTagged + crate::model::Validate> ResourceController<T> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store, resolver: Arc::new(CurrentOnlyResolver), _marker: std::marker::PhantomData }
    }

    fn meta(&self) -> RequestMeta {
        RequestMeta::new(T::KIND)
    }

    pub async fn create(&self, input: T) -> Result<T, CoreError> {
        let pipeline: Pipeline<T> = Pipeline::new(
            "Create",
            vec![
                Box::new(ValidateProto::new()),
                Box::new(crate::steps::ResolveSlug::new()),
                Box::new(CheckDuplicate::new(self.store.clone())),
                Box::new(BuildNewState::new()),
                Box::new(Persist::new(self.store.clone())),
            ],
        );
        let ctx = pipeline.run(input, self.meta()).await?;
        ctx.new_state.ok_or_else(|| CoreError::internal("Create pipeline produced no new_state"))
    }

    pub async fn update(&self, input: T) -> Result<T, CoreError> {
        let pipeline: Pipeline<T> = Pipeline::new(
            "Update",
            vec![
                Box::new(ValidateProto::new()),
                Box::new(crate::steps::ResolveSlug::new()),
                Box::new(LoadExisting::new(self.store.clone())),
                Box::new(BuildUpdateState::new()),
                Box::new(Persist::new(self.store.clone())),
            ],
        );
        let ctx = pipeline.run(input, self.meta()).await?;
        ctx.new_state.ok_or_else(|| CoreError::internal("Update pipeline produced no new_state"))
    }

    /// Returns the deleted resource as the deletion receipt.
    pub async fn delete(&self, id: ResourceId) -> Result<T, CoreError> {
        let pipeline: Pipeline<ResourceId> = Pipeline::new(
            "Delete",
            vec![
                Box::new(ValidateProto::new()),
                Box::new(ExtractResourceId::new()),
                Box::new(LoadExistingForDelete::new(self.store.clone())),
                Box::new(DeleteResource::new(self.store.clone())),
            ],
        );
        let ctx = pipeline.run(id, self.meta()).await?;
        ctx.resource::<T>(ContextKey::ExistingResource)?
            .ok_or_else(|| CoreError::internal("Delete pipeline produced no existingResource"))
    }

    pub async fn apply(&self, input: T) -> Result<T, CoreError> {
        let dispatch: Pipeline<T> = Pipeline::new(
            "ApplyDispatch",
            vec![
                Box::new(ValidateProto::new()),
                Box::new(crate::steps::ResolveSlug::new()),
                Box::new(LoadForApply::new(self.store.clone())),
            ],
        );
        let ctx = dispatch.run(input, self.meta()).await?;
        let should_create = ctx.flag(ContextKey::ShouldCreate);
        if should_create {
            self.create(ctx.input).await
        } else {
            self.update(ctx.input).await
        }
    }

    pub async fn get(&self, id: ResourceId) -> Result<T, CoreError> {
        let pipeline: Pipeline<ResourceId> = Pipeline::new(
            "Get",
            vec![Box::new(ValidateProto::new()), Box::new(LoadTarget::new(self.store.clone()))],
        );
        let ctx = pipeline.run(id, self.meta()).await?;
        ctx.resource::<T>(ContextKey::TargetResource)?
            .ok_or_else(|| CoreError::internal("Get pipeline produced no targetResource"))
    }

    pub async fn get_by_reference(&self, reference: Reference) -> Result<T, CoreError> {
        let pipeline: Pipeline<Reference> = Pipeline::new(
            "GetByReference",
            vec![
                Box::new(ValidateProto::new()),
                Box::new(LoadByReference::<T>::new(self.store.clone(), self.resolver.clone())),
            ],
        );
        let ctx = pipeline.run(reference, self.meta()).await?;
        ctx.resource::<T>(ContextKey::TargetResource)?
            .ok_or_else(|| CoreError::internal("GetByReference pipeline produced no targetResource"))
    }

    pub async fn list(&self) -> Result<Vec<T>, CoreError> {
        let bytes = self.store.list_resources(T::KIND).await?;
        bytes.into_iter().map(|b| Ok(serde_json::from_slice(&b)?)).collect()
    }
}
