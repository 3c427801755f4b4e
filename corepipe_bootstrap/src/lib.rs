// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Bootstrap Module
//!
//! The bootstrap crate sits **outside** `corepipe`'s layers (domain,
//! pipeline, controllers) and provides everything the binary needs before
//! the first request runs:
//!
//! - [`cli`] - argument parsing (clap)
//! - [`config`] - TOML + environment configuration loading
//! - [`exit_code`] - mapping `CoreError`/signals onto Unix exit codes
//! - [`logger`] - tracing subscriber setup
//! - [`shutdown`] - cancellation-token-based graceful shutdown
//! - [`signals`] - cross-platform SIGTERM/SIGINT/SIGHUP handling
//!
//! `corepipe` and `corepipe-domain` cannot depend on this crate; the
//! dependency only runs one direction, from the binary down into the
//! layers it wires together.

pub mod cli;
pub mod config;
pub mod exit_code;
pub mod logger;
pub mod shutdown;
pub mod signals;
