// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! One controller per resource kind, each wiring the reusable steps into
//! a small set of named pipelines. `Agent`, `Workflow`,
//! `Session`, and `ExecutionContext` share a single generic
//! [`ResourceController`]; `Skill` has its own (see
//! [`crate::skills::controller`]) since it replaces Create/Update/Apply
//! with `Push`.

mod generic;

pub use generic::ResourceController;

pub type AgentController = ResourceController<corepipe_domain::entities::Agent>;
pub type WorkflowController = ResourceController<corepipe_domain::entities::Workflow>;
pub type SessionController = ResourceController<corepipe_domain::entities::Session>;
pub type ExecutionContextController = ResourceController<corepipe_domain::entities::ExecutionContext>;
