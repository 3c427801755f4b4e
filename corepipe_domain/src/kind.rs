// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Resource Kind Registry
//!
//! `ResourceKind` is the closed enumeration of resource types the core
//! knows about. Each kind carries two pieces of metadata: a lowercase name
//! used as the store's table/collection key, and a short id prefix used
//! when minting identifiers.
//!
//! In a schema-generated system these would come from proto annotations;
//! here, with no codegen step, the registry is the plain `match` below —
//! the single source of truth every step and controller consults.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of resource kinds the core manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Agent,
    Workflow,
    Session,
    Skill,
    ExecutionContext,
}

impl ResourceKind {
    /// Lowercase canonical name, used as the store's table/collection key.
    pub fn name(self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Workflow => "workflow",
            Self::Session => "session",
            Self::Skill => "skill",
            Self::ExecutionContext => "execution_context",
        }
    }

    /// Short id prefix used by [`crate::ids`]'s... actually minted in
    /// `corepipe::ids::mint_id`, but the prefix itself is kind metadata and
    /// belongs here.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Agent => "agt",
            Self::Workflow => "wfl",
            Self::Session => "ses",
            Self::Skill => "skl",
            Self::ExecutionContext => "ctx",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_distinct_prefix() {
        let kinds = [
            ResourceKind::Agent,
            ResourceKind::Workflow,
            ResourceKind::Session,
            ResourceKind::Skill,
            ResourceKind::ExecutionContext,
        ];
        let mut prefixes: Vec<&str> = kinds.iter().map(|k| k.id_prefix()).collect();
        prefixes.sort_unstable();
        prefixes.dedup();
        assert_eq!(prefixes.len(), kinds.len());
    }
}
