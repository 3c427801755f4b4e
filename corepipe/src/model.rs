// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Small request-shaped types the pipeline steps operate on besides the
//! resource kinds themselves: an opaque id wrapper, a version reference,
//! and the `Validate` capability every pipeline input implements.

use corepipe_domain::error::CoreError;
use corepipe_domain::kind::ResourceKind;
use serde::{Deserialize, Serialize};

/// Implemented by every type a [`crate::steps::ValidateProto`] step can run
/// against. For full resources this is intentionally light — Rust's type
/// system already enforces the message shape that a reflective validator
/// would otherwise check by hand.
pub trait Validate {
    fn validate(&self) -> Result<(), CoreError>;
}

/// Implemented by request types that carry a single opaque id value, the
/// input shape for Get/Delete.
pub trait HasIdValue {
    fn value(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResourceId {
    pub value: String,
}

impl HasIdValue for ResourceId {
    fn value(&self) -> &str {
        &self.value
    }
}

impl Validate for ResourceId {
    fn validate(&self) -> Result<(), CoreError> {
        if self.value.trim().is_empty() {
            return Err(CoreError::invalid_argument("id value must not be empty"));
        }
        Ok(())
    }
}

/// The `GetByReference` input shape: a slug-scoped lookup with an optional
/// version (hash or tag; empty/"latest" means current).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Reference {
    #[serde(default)]
    pub kind: Option<ResourceKind>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub version: String,
}

impl Validate for Reference {
    fn validate(&self) -> Result<(), CoreError> {
        if self.slug.trim().is_empty() {
            return Err(CoreError::invalid_argument("reference slug must not be empty"));
        }
        Ok(())
    }
}

/// The `Apply` dispatch-pipeline output: whether the full resource exists
/// already, read by the controller to choose Create vs. Update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyDecision {
    Create,
    Update,
}

macro_rules! trivially_valid {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Validate for $ty {
                fn validate(&self) -> Result<(), CoreError> {
                    Ok(())
                }
            }
        )+
    };
}

// A full resource's shape is already enforced by its Rust type; the
// remaining invariants (non-empty slug, immutable id/org, duplicate slugs)
// are each the contract of a later, more specific step.
trivially_valid!(
    corepipe_domain::entities::Agent,
    corepipe_domain::entities::Workflow,
    corepipe_domain::entities::Session,
    corepipe_domain::entities::ExecutionContext
);

/// Associates a concrete resource type with its [`ResourceKind`], letting
/// [`crate::controllers::ResourceController`] derive the kind it operates
/// on from `T` instead of taking it as a separate, easy-to-mismatch
/// constructor argument.
pub trait KindTagged {
    const KIND: ResourceKind;
}

impl KindTagged for corepipe_domain::entities::Agent {
    const KIND: ResourceKind = ResourceKind::Agent;
}
impl KindTagged for corepipe_domain::entities::Workflow {
    const KIND: ResourceKind = ResourceKind::Workflow;
}
impl KindTagged for corepipe_domain::entities::Session {
    const KIND: ResourceKind = ResourceKind::Session;
}
impl KindTagged for corepipe_domain::entities::ExecutionContext {
    const KIND: ResourceKind = ResourceKind::ExecutionContext;
}
