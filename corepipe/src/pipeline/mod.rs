// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Pipeline Kernel
//!
//! A `Pipeline<T>` runs an ordered list of [`Step<T>`] against a
//! [`RequestContext<T>`], halting on the first failure and wrapping it with
//! the failing step's name and index. Controllers build one small pipeline
//! per operation rather than a single monolithic dispatcher.

mod context;
mod step;
mod tracer;

pub use context::{ContextKey, ContextValue, RequestContext, RequestMeta, StepOutcome};
pub use step::Step;
pub use tracer::{PipelineTracer, TracingTracer};

use corepipe_domain::error::CoreError;
use std::sync::Arc;

pub struct Pipeline<T> {
    name: &'static str,
    steps: Vec<Box<dyn Step<T>>>,
    tracer: Option<Arc<dyn PipelineTracer>>,
}

impl<T: Send + Sync + 'static> Pipeline<T> {
    pub fn new(name: &'static str, steps: Vec<Box<dyn Step<T>>>) -> Self {
        Self { name, steps, tracer: None }
    }

    pub fn with_tracer(mut self, tracer: Arc<dyn PipelineTracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs every step in order against a fresh context built from `input`.
    /// The first failing step's error is wrapped with its name and index via
    /// [`CoreError::into_step`]; every prior side effect stands (steps do not
    /// roll back).
    pub async fn run(&self, input: T, meta: RequestMeta) -> Result<RequestContext<T>, CoreError> {
        let mut ctx = RequestContext::new(input, meta);

        for (index, step) in self.steps.iter().enumerate() {
            if ctx.meta.cancellation.is_cancelled() {
                return Err(CoreError::internal(format!(
                    "pipeline '{}' cancelled before step '{}'",
                    self.name,
                    step.name()
                )));
            }

            if let Some(tracer) = &self.tracer {
                tracer.before_step(self.name, step.name(), index);
            }

            let result = step.execute(&mut ctx).await;

            if let Some(tracer) = &self.tracer {
                tracer.after_step(self.name, step.name(), index, result.is_ok());
            }

            match result {
                Ok(()) => {
                    ctx.record_result(index, StepOutcome::Ok);
                }
                Err(err) => {
                    ctx.record_result(index, StepOutcome::Failed(err.to_string()));
                    return Err(err.into_step(step.name(), index));
                }
            }
        }

        Ok(ctx)
    }
}
