// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `Skill` resource: a named, versioned `SKILL.md` bundle backed by a
//! content-addressable ZIP artifact.

use crate::entities::envelope::ResourceEnvelope;
use crate::entities::metadata::{Audit, Metadata};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillState {
    #[default]
    Ready,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SkillSpec {
    #[serde(default)]
    pub skill_md: String,
    #[serde(default)]
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SkillStatus {
    #[serde(default)]
    pub audit: Audit,
    #[serde(default)]
    pub version_hash: String,
    #[serde(default)]
    pub artifact_storage_key: String,
    #[serde(default)]
    pub state: SkillState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Skill {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: SkillSpec,
    #[serde(default)]
    pub status: SkillStatus,
}

impl ResourceEnvelope for Skill {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    fn audit(&self) -> Option<&Audit> {
        Some(&self.status.audit)
    }

    fn audit_mut(&mut self) -> Option<&mut Audit> {
        Some(&mut self.status.audit)
    }

    fn clear_status(&mut self) {
        self.status = SkillStatus::default();
    }
}
