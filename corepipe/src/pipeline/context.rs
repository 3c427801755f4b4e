// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The per-request context threaded through a running [`super::Pipeline`].
//!
//! `existingResource`/`targetResource`/`existingSkill` are genuinely
//! polymorphic across resource kinds — the pipeline that loads them is not
//! always the pipeline whose `T` is that resource's own type (a Delete
//! pipeline's `T` is an id wrapper, but `LoadExistingForDelete` still needs
//! to stash a full resource). Rather than reach for `dyn Any`, they are
//! carried as serialized JSON bytes behind a closed [`ContextKey`]/
//! [`ContextValue`] pair, exactly the "typed heterogeneous container" the
//! governing design calls for in place of a bare string-keyed map.

use corepipe_domain::error::CoreError;
use corepipe_domain::kind::ResourceKind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// The closed set of keys a step may stash into a [`RequestContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKey {
    ExistingResource,
    TargetResource,
    ResourceId,
    ShouldCreate,
    ExistsInDatabase,
    ArtifactStorageKey,
    ExistingSkill,
    ShouldCreateSkill,
    VersionHash,
    ExtractedSkillMd,
    RemovedArchiveCount,
    StepResult(usize),
}

/// The closed set of value shapes a [`ContextKey`] may hold.
#[derive(Debug, Clone)]
pub enum ContextValue {
    /// A serialized resource snapshot (JSON).
    Json(Vec<u8>),
    Text(String),
    Flag(bool),
    Count(u64),
    Outcome(StepOutcome),
}

/// Recorded once per step under `ContextKey::StepResult(index)`, so a
/// caller can inspect which steps ran and how they finished after the
/// fact.
#[derive(Debug, Clone)]
pub enum StepOutcome {
    Ok,
    Failed(String),
}

/// Ambient, caller-injected context: the resource kind the pipeline is
/// running against, and a cancellation signal steps must observe promptly.
/// Never a thread-local — always threaded explicitly into `Pipeline::run`.
#[derive(Clone)]
pub struct RequestMeta {
    pub kind: ResourceKind,
    pub cancellation: CancellationToken,
}

impl RequestMeta {
    pub fn new(kind: ResourceKind) -> Self {
        Self { kind, cancellation: CancellationToken::new() }
    }

    pub fn with_cancellation(kind: ResourceKind, cancellation: CancellationToken) -> Self {
        Self { kind, cancellation }
    }
}

/// The per-request state a pipeline run passes from step to step: the
/// original input, a typed "new state" slot that the state-building steps
/// populate, the closed context map, and the ambient [`RequestMeta`].
pub struct RequestContext<T> {
    pub input: T,
    pub new_state: Option<T>,
    map: HashMap<ContextKey, ContextValue>,
    pub meta: RequestMeta,
}

impl<T> RequestContext<T> {
    pub fn new(input: T, meta: RequestMeta) -> Self {
        Self { input, new_state: None, map: HashMap::new(), meta }
    }

    pub(crate) fn record_result(&mut self, index: usize, outcome: StepOutcome) {
        self.map.insert(ContextKey::StepResult(index), ContextValue::Outcome(outcome));
    }

    pub fn step_result(&self, index: usize) -> Option<&StepOutcome> {
        match self.map.get(&ContextKey::StepResult(index)) {
            Some(ContextValue::Outcome(outcome)) => Some(outcome),
            _ => None,
        }
    }

    pub fn set_text(&mut self, key: ContextKey, value: impl Into<String>) {
        self.map.insert(key, ContextValue::Text(value.into()));
    }

    pub fn text(&self, key: ContextKey) -> Option<&str> {
        match self.map.get(&key) {
            Some(ContextValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn set_flag(&mut self, key: ContextKey, value: bool) {
        self.map.insert(key, ContextValue::Flag(value));
    }

    pub fn flag(&self, key: ContextKey) -> bool {
        matches!(self.map.get(&key), Some(ContextValue::Flag(true)))
    }

    pub fn set_count(&mut self, key: ContextKey, value: u64) {
        self.map.insert(key, ContextValue::Count(value));
    }

    pub fn count(&self, key: ContextKey) -> Option<u64> {
        match self.map.get(&key) {
            Some(ContextValue::Count(n)) => Some(*n),
            _ => None,
        }
    }

    /// Serializes `resource` to JSON and stashes it under `key`.
    pub fn set_resource<R: Serialize>(&mut self, key: ContextKey, resource: &R) -> Result<(), CoreError> {
        let bytes = serde_json::to_vec(resource)?;
        self.map.insert(key, ContextValue::Json(bytes));
        Ok(())
    }

    /// Deserializes the resource stashed under `key`. Returns `None` if the
    /// key was never populated; callers translate absence into whatever
    /// error fits their step's contract.
    pub fn resource<R: DeserializeOwned>(&self, key: ContextKey) -> Result<Option<R>, CoreError> {
        match self.map.get(&key) {
            Some(ContextValue::Json(bytes)) => Ok(Some(serde_json::from_slice(bytes)?)),
            _ => Ok(None),
        }
    }

    pub fn resource_bytes(&self, key: ContextKey) -> Option<&[u8]> {
        match self.map.get(&key) {
            Some(ContextValue::Json(bytes)) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    pub fn set_resource_bytes(&mut self, key: ContextKey, bytes: Vec<u8>) {
        self.map.insert(key, ContextValue::Json(bytes));
    }
}
