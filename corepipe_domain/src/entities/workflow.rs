// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `Workflow` resource.

use crate::entities::envelope::ResourceEnvelope;
use crate::entities::metadata::{Audit, Metadata};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WorkflowSpec {
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub trigger: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WorkflowStatus {
    #[serde(default)]
    pub audit: Audit,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub run_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Workflow {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: WorkflowSpec,
    #[serde(default)]
    pub status: WorkflowStatus,
}

impl ResourceEnvelope for Workflow {
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
        self.status = WorkflowStatus::default();
    }
}
