// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! An immutable snapshot of a resource, archived by the skill push pipeline
//! and indexed by hash and tag. The shape is kind-agnostic even though this
//! core only writes these for skills.

use crate::kind::ResourceKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub kind: ResourceKind,
    pub resource_id: String,
    pub version_hash: String,
    pub tag: String,
    pub archived_at: chrono::DateTime<chrono::Utc>,
    /// Serialized snapshot of the resource at archival time.
    pub payload: Vec<u8>,
}
