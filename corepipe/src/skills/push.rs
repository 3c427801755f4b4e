// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Skill Push Pipeline
//!
//! The most intricate pipeline in the core: ten steps from a raw artifact
//! to a persisted, content-hashed, best-effort-archived `Skill`. Unlike the
//! generic Create/Update pipelines, push steps work directly against
//! `ctx.new_state` rather than `ctx.input`, since the input
//! (`SkillPushInput`) and the resource being built (`Skill`) are different
//! shapes.

use crate::ids::{mint_id, slugify};
use crate::pipeline::{ContextKey, Pipeline, RequestContext, RequestMeta, Step};
use crate::skills::archive::extract_skill;
use async_trait::async_trait;
use chrono::Utc;
use corepipe_domain::entities::{Audit, OwnerScope, Skill, SkillState};
use corepipe_domain::error::CoreError;
use corepipe_domain::kind::ResourceKind;
use corepipe_domain::repositories::{ArtifactStore, Store};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkillPushInput {
    pub name: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub scope: OwnerScope,
    pub artifact: Vec<u8>,
}

impl crate::model::Validate for SkillPushInput {
    fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::invalid_argument("skill push requires a non-empty name"));
        }
        if self.artifact.is_empty() {
            return Err(CoreError::invalid_argument("skill push requires a non-empty artifact"));
        }
        Ok(())
    }
}

struct BuildInitialSkill;

#[async_trait]
impl Step<SkillPushInput> for BuildInitialSkill {
    fn name(&self) -> &'static str {
        "BuildInitialSkill"
    }

    async fn execute(&self, ctx: &mut RequestContext<SkillPushInput>) -> Result<(), CoreError> {
        let mut skill = Skill::default();
        skill.metadata.name = ctx.input.name.clone();
        skill.metadata.owner_scope = ctx.input.scope;
        skill.metadata.org = ctx.input.org.clone();
        skill.spec.tag = ctx.input.tag.clone();
        skill.status.state = SkillState::Ready;
        ctx.new_state = Some(skill);
        Ok(())
    }
}

struct ResolveSlugForPush;

#[async_trait]
impl Step<SkillPushInput> for ResolveSlugForPush {
    fn name(&self) -> &'static str {
        "ResolveSlugForPush"
    }

    async fn execute(&self, ctx: &mut RequestContext<SkillPushInput>) -> Result<(), CoreError> {
        let skill = ctx.new_state.as_mut().expect("BuildInitialSkill runs first");
        let slug = slugify(&skill.metadata.name);
        if slug.is_empty() {
            return Err(CoreError::invalid_argument("resolved slug is empty"));
        }
        skill.metadata.slug = slug;
        Ok(())
    }
}

struct FindExistingBySlug {
    store: Arc<dyn Store>,
}

#[async_trait]
impl Step<SkillPushInput> for FindExistingBySlug {
    fn name(&self) -> &'static str {
        "FindExistingBySlug"
    }

    async fn execute(&self, ctx: &mut RequestContext<SkillPushInput>) -> Result<(), CoreError> {
        let skill = ctx.new_state.as_mut().expect("ResolveSlugForPush runs first");
        let candidates = self.store.list_resources(ResourceKind::Skill).await?;
        let mut found: Option<Skill> = None;
        for bytes in candidates {
            let candidate: Skill = serde_json::from_slice(&bytes)?;
            if candidate.metadata.slug == skill.metadata.slug && candidate.metadata.org == skill.metadata.org {
                found = Some(candidate);
                break;
            }
        }
        match found {
            Some(existing) => {
                skill.metadata.id = existing.metadata.id.clone();
                ctx.set_resource(ContextKey::ExistingSkill, &existing)?;
                ctx.set_flag(ContextKey::ShouldCreateSkill, false);
            }
            None => {
                ctx.set_flag(ContextKey::ShouldCreateSkill, true);
            }
        }
        Ok(())
    }
}

struct GenerateIdIfNeeded;

#[async_trait]
impl Step<SkillPushInput> for GenerateIdIfNeeded {
    fn name(&self) -> &'static str {
        "GenerateIdIfNeeded"
    }

    async fn execute(&self, ctx: &mut RequestContext<SkillPushInput>) -> Result<(), CoreError> {
        if ctx.flag(ContextKey::ShouldCreateSkill) {
            let skill = ctx.new_state.as_mut().expect("BuildInitialSkill runs first");
            skill.metadata.id = mint_id(ResourceKind::Skill.id_prefix());
        }
        Ok(())
    }
}

struct ExtractAndHashArtifact;

#[async_trait]
impl Step<SkillPushInput> for ExtractAndHashArtifact {
    fn name(&self) -> &'static str {
        "ExtractAndHashArtifact"
    }

    async fn execute(&self, ctx: &mut RequestContext<SkillPushInput>) -> Result<(), CoreError> {
        let extracted = extract_skill(&ctx.input.artifact)?;
        ctx.set_text(ContextKey::VersionHash, extracted.version_hash);
        ctx.set_text(ContextKey::ExtractedSkillMd, extracted.skill_md);
        Ok(())
    }
}

struct CheckAndStoreArtifact {
    artifact_store: Arc<dyn ArtifactStore>,
}

#[async_trait]
impl Step<SkillPushInput> for CheckAndStoreArtifact {
    fn name(&self) -> &'static str {
        "CheckAndStoreArtifact"
    }

    async fn execute(&self, ctx: &mut RequestContext<SkillPushInput>) -> Result<(), CoreError> {
        let hash = ctx
            .text(ContextKey::VersionHash)
            .ok_or_else(|| CoreError::internal("CheckAndStoreArtifact requires versionHash in context"))?
            .to_string();

        let key = if self.artifact_store.exists(&hash).await? {
            self.artifact_store.storage_key(&hash)
        } else {
            self.artifact_store.store(&hash, &ctx.input.artifact).await?
        };

        ctx.set_text(ContextKey::ArtifactStorageKey, key);
        Ok(())
    }
}

struct PopulateSkillFields;

#[async_trait]
impl Step<SkillPushInput> for PopulateSkillFields {
    fn name(&self) -> &'static str {
        "PopulateSkillFields"
    }

    async fn execute(&self, ctx: &mut RequestContext<SkillPushInput>) -> Result<(), CoreError> {
        let hash = ctx.text(ContextKey::VersionHash).unwrap_or_default().to_string();
        let key = ctx.text(ContextKey::ArtifactStorageKey).unwrap_or_default().to_string();
        let skill_md = ctx.text(ContextKey::ExtractedSkillMd).unwrap_or_default().to_string();
        let should_create = ctx.flag(ContextKey::ShouldCreateSkill);
        let existing = ctx.resource::<Skill>(ContextKey::ExistingSkill)?;

        let skill = ctx.new_state.as_mut().expect("earlier steps populate new_state");
        skill.spec.skill_md = skill_md;
        skill.status.version_hash = hash;
        skill.status.artifact_storage_key = key;
        skill.status.state = SkillState::Ready;

        let now = Utc::now();
        if should_create {
            skill.status.audit = Audit::created_now(now);
        } else {
            let existing = existing.ok_or_else(|| {
                CoreError::internal("PopulateSkillFields: update branch requires existingSkill in context")
            })?;
            skill.status.audit = existing.status.audit.advance_for_update(now);
        }
        Ok(())
    }
}

struct ArchiveCurrentSkill {
    store: Arc<dyn Store>,
}

#[async_trait]
impl Step<SkillPushInput> for ArchiveCurrentSkill {
    fn name(&self) -> &'static str {
        "ArchiveCurrentSkill"
    }

    async fn execute(&self, ctx: &mut RequestContext<SkillPushInput>) -> Result<(), CoreError> {
        let skill = ctx.new_state.as_ref().expect("earlier steps populate new_state").clone();
        let payload = match serde_json::to_vec(&skill) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize skill for archival");
                return Ok(());
            }
        };
        let tag = skill.spec.tag.clone();
        if let Err(err) = self
            .store
            .save_audit(ResourceKind::Skill, &skill.metadata.id, &payload, &skill.status.version_hash, &tag)
            .await
        {
            tracing::warn!(error = %err, skill_id = %skill.metadata.id, "failed to archive skill version (best-effort)");
        }
        Ok(())
    }
}

struct PersistSkill {
    store: Arc<dyn Store>,
}

#[async_trait]
impl Step<SkillPushInput> for PersistSkill {
    fn name(&self) -> &'static str {
        "PersistSkill"
    }

    async fn execute(&self, ctx: &mut RequestContext<SkillPushInput>) -> Result<(), CoreError> {
        let skill = ctx.new_state.as_ref().expect("earlier steps populate new_state");
        let bytes = serde_json::to_vec(skill)?;
        self.store.save_resource(ResourceKind::Skill, &skill.metadata.id, &bytes).await
    }
}

/// Runs the ten-step push pipeline end to end, returning the persisted
/// skill.
pub async fn push(
    store: Arc<dyn Store>,
    artifact_store: Arc<dyn ArtifactStore>,
    input: SkillPushInput,
) -> Result<Skill, CoreError> {
    let pipeline: Pipeline<SkillPushInput> = Pipeline::new(
        "Push",
        vec![
            Box::new(crate::steps::ValidateProto::new()),
            Box::new(BuildInitialSkill),
            Box::new(ResolveSlugForPush),
            Box::new(FindExistingBySlug { store: store.clone() }),
            Box::new(GenerateIdIfNeeded),
            Box::new(ExtractAndHashArtifact),
            Box::new(CheckAndStoreArtifact { artifact_store }),
            Box::new(PopulateSkillFields),
            Box::new(ArchiveCurrentSkill { store: store.clone() }),
            Box::new(PersistSkill { store }),
        ],
    );

    let ctx = pipeline.run(input, RequestMeta::new(ResourceKind::Skill)).await?;
    ctx.new_state.ok_or_else(|| CoreError::internal("Push pipeline produced no new_state"))
}
