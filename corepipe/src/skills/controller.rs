// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use crate::model::{Reference, ResourceId};
use crate::pipeline::{ContextKey, Pipeline, RequestContext, RequestMeta, Step};
use crate::skills::push::{push, SkillPushInput};
use crate::skills::resolve::SkillVersionResolver;
use crate::steps::{ExtractResourceId, LoadByReference, LoadExistingForDelete, LoadTarget, ValidateProto};
use async_trait::async_trait;
use corepipe_domain::entities::Skill;
use corepipe_domain::error::CoreError;
use corepipe_domain::kind::ResourceKind;
use corepipe_domain::repositories::{ArtifactStore, Store};
use std::sync::Arc;

/// Bulk-removes the skill's audit history before the resource row itself is
/// deleted. Best-effort: a store failure is logged, never propagated.
struct DeleteSkillArchives {
    store: Arc<dyn Store>,
}

#[async_trait]
impl Step<ResourceId> for DeleteSkillArchives {
    fn name(&self) -> &'static str {
        "DeleteSkillArchives"
    }

    async fn execute(&self, ctx: &mut RequestContext<ResourceId>) -> Result<(), CoreError> {
        let id = ctx
            .text(ContextKey::ResourceId)
            .ok_or_else(|| CoreError::internal("DeleteSkillArchives requires resourceId in context"))?
            .to_string();
        match self.store.delete_audits_by_resource_id(ResourceKind::Skill, &id).await {
            Ok(count) => {
                ctx.set_count(ContextKey::RemovedArchiveCount, count);
                tracing::info!(skill_id = %id, removed = count, "removed skill archive history");
            }
            Err(err) => {
                tracing::warn!(skill_id = %id, error = %err, "failed to remove skill archive history (best-effort)");
            }
        }
        Ok(())
    }
}

/// Wires the skill subsystem's wire surface: `push` replaces
/// Create/Update/Apply, everything else mirrors the generic controller
/// shape.
pub struct SkillController {
    store: Arc<dyn Store>,
    artifact_store: Arc<dyn ArtifactStore>,
}

impl SkillController {
    pub fn new(store: Arc<dyn Store>, artifact_store: Arc<dyn ArtifactStore>) -> Self {
        Self { store, artifact_store }
    }

    pub async fn push(&self, input: SkillPushInput) -> Result<Skill, CoreError> {
        push(self.store.clone(), self.artifact_store.clone(), input).await
    }

    pub async fn get(&self, id: ResourceId) -> Result<Skill, CoreError> {
        let pipeline: Pipeline<ResourceId> = Pipeline::new(
            "Get",
            vec![Box::new(ValidateProto::new()), Box::new(LoadTarget::new(self.store.clone()))],
        );
        let ctx = pipeline.run(id, RequestMeta::new(ResourceKind::Skill)).await?;
        ctx.resource::<Skill>(ContextKey::TargetResource)?
            .ok_or_else(|| CoreError::internal("Get pipeline produced no targetResource"))
    }

    pub async fn get_by_reference(&self, reference: Reference) -> Result<Skill, CoreError> {
        let resolver = Arc::new(SkillVersionResolver::new(self.store.clone()));
        let pipeline: Pipeline<Reference> = Pipeline::new(
            "GetByReference",
            vec![
                Box::new(ValidateProto::new()),
                Box::new(LoadByReference::<Skill>::new(self.store.clone(), resolver)),
            ],
        );
        let ctx = pipeline.run(reference, RequestMeta::new(ResourceKind::Skill)).await?;
        ctx.resource::<Skill>(ContextKey::TargetResource)?
            .ok_or_else(|| CoreError::internal("GetByReference pipeline produced no targetResource"))
    }

    pub async fn list(&self) -> Result<Vec<Skill>, CoreError> {
        let bytes = self.store.list_resources(ResourceKind::Skill).await?;
        bytes.into_iter().map(|b| Ok(serde_json::from_slice(&b)?)).collect()
    }

    pub async fn delete(&self, id: ResourceId) -> Result<Skill, CoreError> {
        let pipeline: Pipeline<ResourceId> = Pipeline::new(
            "Delete",
            vec![
                Box::new(ValidateProto::new()),
                Box::new(ExtractResourceId::new()),
                Box::new(LoadExistingForDelete::new(self.store.clone())),
                Box::new(DeleteSkillArchives { store: self.store.clone() }),
                Box::new(crate::steps::DeleteResource::new(self.store.clone())),
            ],
        );
        let ctx = pipeline.run(id, RequestMeta::new(ResourceKind::Skill)).await?;
        ctx.resource::<Skill>(ContextKey::ExistingResource)?
            .ok_or_else(|| CoreError::internal("Delete pipeline produced no existingResource"))
    }

    pub async fn get_artifact(&self, storage_key: &str) -> Result<Vec<u8>, CoreError> {
        self.artifact_store.get(storage_key).await
    }
}
