// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! A hierarchical error system for the resource-pipeline domain. Every
//! failure surfaced by a step, a controller, or a `Store`/`ArtifactStore`
//! adapter is a `CoreError`, and every `CoreError` maps onto exactly one of
//! the four wire-visible codes: `InvalidArgument`, `NotFound`,
//! `AlreadyExists`, `Internal`.
//!
//! ## Design Principles
//!
//! - **Specific**: each variant represents one failure mode, not a bucket.
//! - **Actionable**: messages carry enough context to debug without a
//!   debugger.
//! - **Wrapped, not swallowed**: the pipeline kernel wraps the first failing
//!   step's error in [`CoreError::Step`] rather than discarding which step
//!   failed.

use thiserror::Error;

/// Domain-specific errors for the resource pipeline.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("step '{step}' (index {index}) failed: {source}")]
    Step {
        step: &'static str,
        index: usize,
        #[source]
        source: Box<CoreError>,
    },
}

/// Wire-visible error code reported alongside every `CoreError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    Internal,
}

impl CoreError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::AlreadyExists(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Wraps `self` as the failure of the named step, preserving the
    /// original code via [`CoreError::code`] traversal through the source
    /// chain.
    pub fn into_step(self, step: &'static str, index: usize) -> Self {
        Self::Step {
            step,
            index,
            source: Box::new(self),
        }
    }

    /// Maps this error onto its wire-visible code, unwrapping `Step`
    /// wrappers to find the originating failure's code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::AlreadyExists(_) => ErrorCode::AlreadyExists,
            Self::Internal(_) => ErrorCode::Internal,
            Self::Step { source, .. } => source.code(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Internal(format!("serialization error: {err}"))
    }
}
