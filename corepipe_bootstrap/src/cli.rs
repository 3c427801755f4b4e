// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Command-Line Interface
//!
//! `corepipe` exposes the same seven operations for every plain resource
//! kind (Create/Update/Delete/Apply/Get/GetByReference/List) plus the
//! skill subsystem's archive-centric surface (Push/Get/Delete/List/
//! GetByReference/GetArtifact). Resource bodies are read as JSON, either
//! inline via `--json` or from a file via `--file`.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "corepipe", version, about = "A declarative API-resource platform core")]
pub struct Cli {
    /// Path to the TOML config file (defaults are used if absent).
    #[arg(long, global = true, default_value = "corepipe.toml")]
    pub config: PathBuf,

    /// Overrides the configured log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ResourceKindArg {
    Agent,
    Workflow,
    Session,
    ExecutionContext,
}

/// The body a Create/Update/Apply command reads, mutually exclusive.
#[derive(Debug, Parser)]
pub struct BodySource {
    /// Reads the resource body from this file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,

    /// The resource body as an inline JSON string.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Creates a new resource of the given kind.
    Create {
        kind: ResourceKindArg,
        #[command(flatten)]
        body: BodySource,
    },
    /// Replaces the spec and metadata.name of an existing resource.
    Update {
        kind: ResourceKindArg,
        #[command(flatten)]
        body: BodySource,
    },
    /// Deletes a resource by id.
    Delete { kind: ResourceKindArg, id: String },
    /// Creates the resource if it doesn't exist, else updates it.
    Apply {
        kind: ResourceKindArg,
        #[command(flatten)]
        body: BodySource,
    },
    /// Fetches a resource by id.
    Get { kind: ResourceKindArg, id: String },
    /// Fetches a resource by slug/org/version.
    GetByReference {
        kind: ResourceKindArg,
        slug: String,
        #[arg(long)]
        org: Option<String>,
        #[arg(long, default_value = "latest")]
        version: String,
    },
    /// Lists every resource of the given kind.
    List { kind: ResourceKindArg },
    /// Pushes a skill archive (a ZIP containing a top-level SKILL.md plus
    /// supporting files).
    SkillPush {
        #[arg(long)]
        archive: PathBuf,
        #[command(flatten)]
        body: BodySource,
    },
    /// Fetches a skill's stored artifact bytes by storage key.
    SkillGetArtifact {
        storage_key: String,
        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_with_inline_json() {
        let cli = Cli::try_parse_from(["corepipe", "create", "agent", "--json", "{}"]).unwrap();
        match cli.command {
            Commands::Create { kind: ResourceKindArg::Agent, body } => assert_eq!(body.json.as_deref(), Some("{}")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_file_and_json_together() {
        let result = Cli::try_parse_from(["corepipe", "create", "agent", "--json", "{}", "--file", "x.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn get_by_reference_defaults_version_to_latest() {
        let cli = Cli::try_parse_from(["corepipe", "get-by-reference", "workflow", "my-slug"]).unwrap();
        match cli.command {
            Commands::GetByReference { kind: ResourceKindArg::Workflow, slug, version, org } => {
                assert_eq!(slug, "my-slug");
                assert_eq!(version, "latest");
                assert_eq!(org, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn skill_push_requires_archive_flag() {
        let result = Cli::try_parse_from(["corepipe", "skill-push", "--json", "{}"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_path_defaults_to_corepipe_toml() {
        let cli = Cli::try_parse_from(["corepipe", "list", "session"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("corepipe.toml"));
    }
}
