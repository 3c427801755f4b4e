// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Diagnostics hook for [`super::Pipeline`]. Not a domain event: nothing
//! here is published, retried, or persisted — it exists so a pipeline run
//! shows up in `tracing` with one span per step.

/// Called around every step of a running pipeline. Both methods default to
/// no-ops; implement only what you need.
pub trait PipelineTracer: Send + Sync {
    fn before_step(&self, _pipeline: &str, _step: &str, _index: usize) {}
    fn after_step(&self, _pipeline: &str, _step: &str, _index: usize, _ok: bool) {}
}

/// The default tracer: one `tracing` event per step transition.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTracer;

impl PipelineTracer for TracingTracer {
    fn before_step(&self, pipeline: &str, step: &str, index: usize) {
        tracing::debug!(pipeline, step, index, "step starting");
    }

    fn after_step(&self, pipeline: &str, step: &str, index: usize, ok: bool) {
        if ok {
            tracing::debug!(pipeline, step, index, "step succeeded");
        } else {
            tracing::warn!(pipeline, step, index, "step failed");
        }
    }
}
