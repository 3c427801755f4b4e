// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Resource Envelope
//!
//! `ResourceEnvelope` is the capability interface used in place of proto
//! reflection: a small, statically implemented trait that gives the generic
//! pipeline steps access to the metadata and audit fields every resource
//! kind carries, without needing runtime type inspection.

use crate::entities::metadata::{Audit, Metadata};

/// Implemented once per concrete resource kind (`Agent`, `Workflow`,
/// `Session`, `ExecutionContext`; `Skill` implements it too but is driven
/// by the push pipeline rather than the generic Create/Update steps).
pub trait ResourceEnvelope: Clone + serde::Serialize + serde::de::DeserializeOwned + Send + Sync + 'static {
    fn metadata(&self) -> &Metadata;
    fn metadata_mut(&mut self) -> &mut Metadata;

    /// Resources whose status carries an audit sub-message return it here;
    /// a resource without one would return `None` and be left alone (there
    /// are none in this core, but the hook stays general).
    fn audit(&self) -> Option<&Audit>;
    fn audit_mut(&mut self) -> Option<&mut Audit>;

    /// Clears every field of the current status, reflectively in the
    /// source system; statically here, since each kind knows its own
    /// status shape.
    fn clear_status(&mut self);
}
