// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The `ExecutionContext` resource: the sandboxed environment a workflow
//! run or session turn executes in.

use crate::entities::envelope::ResourceEnvelope;
use crate::entities::metadata::{Audit, Metadata};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExecutionContextSpec {
    #[serde(default)]
    pub workflow_id: String,
    #[serde(default)]
    pub env: std::collections::BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExecutionContextStatus {
    #[serde(default)]
    pub audit: Audit,
    #[serde(default)]
    pub phase: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExecutionContext {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: ExecutionContextSpec,
    #[serde(default)]
    pub status: ExecutionContextStatus,
}

impl ResourceEnvelope for ExecutionContext {
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
        self.status = ExecutionContextStatus::default();
    }
}
