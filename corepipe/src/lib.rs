// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # corepipe
//!
//! A declarative API-resource platform core: a generic request pipeline,
//! reusable lifecycle steps, and per-kind controllers for `Agent`,
//! `Workflow`, `Session`, `ExecutionContext`, and the `Skill` subsystem's
//! content-addressable archive storage.
//!
//! [`pipeline`] is the kernel every controller runs against; [`steps`] is
//! the reusable library of lifecycle steps; [`controllers`] wires them into
//! one small pipeline per operation for the four plain resource kinds;
//! [`skills`] does the same for skills, whose `push` operation replaces
//! Create/Update/Apply with archive ingestion. [`infra`] holds the
//! `Store`/`ArtifactStore` adapters; [`model`] and [`ids`] are the small
//! shared vocabulary (`Validate`, `HasIdValue`, `KindTagged`, slugs, id
//! minting) the rest of the crate is built from.

pub mod controllers;
pub mod ids;
pub mod infra;
pub mod model;
pub mod pipeline;
pub mod skills;
pub mod steps;

pub use corepipe_domain::entities;
pub use corepipe_domain::error::{CoreError, ErrorCode};
pub use corepipe_domain::kind::ResourceKind;
pub use corepipe_domain::repositories::{ArtifactStore, Store};
