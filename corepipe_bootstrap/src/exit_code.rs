// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Exit Code Mapping
//!
//! Standardized Unix exit codes following BSD `sysexits.h` conventions, plus
//! a direct mapping from `CoreError`'s wire codes so a `NotFound` failure
//! exits differently from an `Internal` one.

use corepipe_domain::error::{CoreError, ErrorCode};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ExitCode {
    #[default]
    Success = 0,
    Error = 1,
    /// Invalid arguments, malformed CLI input.
    UsageError = 64,
    /// Request failed `CoreError::InvalidArgument` validation.
    DataError = 65,
    /// Request failed with `CoreError::NotFound`.
    NoInput = 66,
    /// Request failed with `CoreError::AlreadyExists`.
    CantCreate = 73,
    /// Request failed with `CoreError::Internal`.
    Software = 70,
    Config = 78,
    Interrupted = 130,
    Terminated = 143,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps a `CoreError`'s wire code directly, unwrapping `Step` wrappers
    /// via `CoreError::code` rather than string-matching the message.
    pub fn from_core_error(error: &CoreError) -> Self {
        match error.code() {
            ErrorCode::InvalidArgument => ExitCode::DataError,
            ErrorCode::NotFound => ExitCode::NoInput,
            ErrorCode::AlreadyExists => ExitCode::CantCreate,
            ErrorCode::Internal => ExitCode::Software,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::Error => "General error",
            ExitCode::UsageError => "Command line usage error",
            ExitCode::DataError => "Invalid argument",
            ExitCode::NoInput => "Resource not found",
            ExitCode::CantCreate => "Resource already exists",
            ExitCode::Software => "Internal error",
            ExitCode::Config => "Configuration error",
            ExitCode::Interrupted => "Interrupted by signal (SIGINT)",
            ExitCode::Terminated => "Terminated by signal (SIGTERM)",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code.as_i32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_core_error_code() {
        assert_eq!(ExitCode::from_core_error(&CoreError::invalid_argument("x")), ExitCode::DataError);
        assert_eq!(ExitCode::from_core_error(&CoreError::not_found("x")), ExitCode::NoInput);
        assert_eq!(ExitCode::from_core_error(&CoreError::already_exists("x")), ExitCode::CantCreate);
        assert_eq!(ExitCode::from_core_error(&CoreError::internal("x")), ExitCode::Software);
    }

    #[test]
    fn unwraps_step_wrapped_errors() {
        let wrapped = CoreError::not_found("missing").into_step("LoadTarget", 1);
        assert_eq!(ExitCode::from_core_error(&wrapped), ExitCode::NoInput);
    }

    #[test]
    fn default_is_success() {
        assert_eq!(ExitCode::default(), ExitCode::Success);
        assert!(ExitCode::default().is_success());
    }
}
