// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Composition root: loads configuration, wires a `Store`/`ArtifactStore`
//! pair, dispatches the parsed CLI command against the matching
//! controller, and maps the result onto a process exit code.

use clap::Parser;
use corepipe::controllers::{AgentController, ExecutionContextController, SessionController, WorkflowController};
use corepipe::model::{Reference, ResourceId};
use corepipe::skills::{SkillController, SkillPushInput};
use corepipe::{ArtifactStore, CoreError, Store};
use corepipe_bootstrap::cli::{BodySource, Cli, Commands, ResourceKindArg};
use corepipe_bootstrap::config::{CoreConfig, StorageBackend};
use corepipe_bootstrap::exit_code::ExitCode;
use corepipe_bootstrap::signals::{create_signal_handler, SystemSignals};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let config = match CoreConfig::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return exit_code(ExitCode::Config);
        }
    };

    if let Err(err) = corepipe_bootstrap::logger::init_tracing(cli.log_level.as_deref().unwrap_or(&config.logging.level)) {
        eprintln!("failed to initialize logging: {err}");
        return exit_code(ExitCode::Config);
    }

    let shutdown = corepipe_bootstrap::shutdown::ShutdownCoordinator::new(Duration::from_secs(5));
    let token = shutdown.token();
    tokio::spawn(async move {
        create_signal_handler().wait_for_signal(Box::new(move || token.cancel())).await;
    });

    let (store, artifact_store) = match build_stores(&config).await {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("failed to initialize storage: {err}");
            return exit_code(ExitCode::from_core_error(&err));
        }
    };

    match run(cli.command, store, artifact_store).await {
        Ok(output) => {
            println!("{output}");
            exit_code(ExitCode::Success)
        }
        Err(err) => {
            eprintln!("error: {err}");
            exit_code(ExitCode::from_core_error(&err))
        }
    }
}

fn exit_code(code: ExitCode) -> std::process::ExitCode {
    std::process::ExitCode::from(code.as_i32() as u8)
}

async fn build_stores(config: &CoreConfig) -> Result<(Arc<dyn Store>, Arc<dyn ArtifactStore>), CoreError> {
    match config.storage.backend {
        StorageBackend::Memory => Ok((
            Arc::new(corepipe::infra::InMemoryStore::new()),
            Arc::new(corepipe::infra::InMemoryArtifactStore::new()),
        )),
        StorageBackend::Sqlite => {
            let store = corepipe::infra::SqliteStore::connect(&config.storage.database_url).await?;
            let artifact_store = corepipe::infra::FilesystemArtifactStore::new(config.storage.artifact_root.clone());
            Ok((Arc::new(store), Arc::new(artifact_store)))
        }
    }
}

fn read_body(body: &BodySource) -> Result<Vec<u8>, CoreError> {
    match (&body.file, &body.json) {
        (Some(path), _) => std::fs::read(path).map_err(|err| CoreError::invalid_argument(format!("failed to read {path:?}: {err}"))),
        (None, Some(json)) => Ok(json.clone().into_bytes()),
        (None, None) => Err(CoreError::invalid_argument("a resource body is required via --file or --json")),
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &BodySource) -> Result<T, CoreError> {
    let bytes = read_body(body)?;
    serde_json::from_slice(&bytes).map_err(CoreError::from)
}

async fn run(command: Commands, store: Arc<dyn Store>, artifact_store: Arc<dyn ArtifactStore>) -> Result<String, CoreError> {
    match command {
        Commands::Create { kind, body } => run_create(kind, &body, store).await,
        Commands::Update { kind, body } => run_update(kind, &body, store).await,
        Commands::Delete { kind, id } => run_delete(kind, id, store).await,
        Commands::Apply { kind, body } => run_apply(kind, &body, store).await,
        Commands::Get { kind, id } => run_get(kind, id, store).await,
        Commands::GetByReference { kind, slug, org, version } => {
            run_get_by_reference(kind, slug, org, version, store).await
        }
        Commands::List { kind } => run_list(kind, store).await,
        Commands::SkillPush { archive, body } => run_skill_push(archive, &body, store, artifact_store).await,
        Commands::SkillGetArtifact { storage_key, out } => {
            run_skill_get_artifact(&storage_key, &out, store, artifact_store).await
        }
    }
}

async fn run_create(kind: ResourceKindArg, body: &BodySource, store: Arc<dyn Store>) -> Result<String, CoreError> {
    match kind {
        ResourceKindArg::Agent => to_json(AgentController::new(store).create(parse_body(body)?).await?),
        ResourceKindArg::Workflow => to_json(WorkflowController::new(store).create(parse_body(body)?).await?),
        ResourceKindArg::Session => to_json(SessionController::new(store).create(parse_body(body)?).await?),
        ResourceKindArg::ExecutionContext => {
            to_json(ExecutionContextController::new(store).create(parse_body(body)?).await?)
        }
    }
}

async fn run_update(kind: ResourceKindArg, body: &BodySource, store: Arc<dyn Store>) -> Result<String, CoreError> {
    match kind {
        ResourceKindArg::Agent => to_json(AgentController::new(store).update(parse_body(body)?).await?),
        ResourceKindArg::Workflow => to_json(WorkflowController::new(store).update(parse_body(body)?).await?),
        ResourceKindArg::Session => to_json(SessionController::new(store).update(parse_body(body)?).await?),
        ResourceKindArg::ExecutionContext => {
            to_json(ExecutionContextController::new(store).update(parse_body(body)?).await?)
        }
    }
}

async fn run_apply(kind: ResourceKindArg, body: &BodySource, store: Arc<dyn Store>) -> Result<String, CoreError> {
    match kind {
        ResourceKindArg::Agent => to_json(AgentController::new(store).apply(parse_body(body)?).await?),
        ResourceKindArg::Workflow => to_json(WorkflowController::new(store).apply(parse_body(body)?).await?),
        ResourceKindArg::Session => to_json(SessionController::new(store).apply(parse_body(body)?).await?),
        ResourceKindArg::ExecutionContext => {
            to_json(ExecutionContextController::new(store).apply(parse_body(body)?).await?)
        }
    }
}

async fn run_delete(kind: ResourceKindArg, id: String, store: Arc<dyn Store>) -> Result<String, CoreError> {
    let id = ResourceId { value: id };
    match kind {
        ResourceKindArg::Agent => to_json(AgentController::new(store).delete(id).await?),
        ResourceKindArg::Workflow => to_json(WorkflowController::new(store).delete(id).await?),
        ResourceKindArg::Session => to_json(SessionController::new(store).delete(id).await?),
        ResourceKindArg::ExecutionContext => to_json(ExecutionContextController::new(store).delete(id).await?),
    }
}

async fn run_get(kind: ResourceKindArg, id: String, store: Arc<dyn Store>) -> Result<String, CoreError> {
    let id = ResourceId { value: id };
    match kind {
        ResourceKindArg::Agent => to_json(AgentController::new(store).get(id).await?),
        ResourceKindArg::Workflow => to_json(WorkflowController::new(store).get(id).await?),
        ResourceKindArg::Session => to_json(SessionController::new(store).get(id).await?),
        ResourceKindArg::ExecutionContext => to_json(ExecutionContextController::new(store).get(id).await?),
    }
}

async fn run_get_by_reference(
    kind: ResourceKindArg,
    slug: String,
    org: Option<String>,
    version: String,
    store: Arc<dyn Store>,
) -> Result<String, CoreError> {
    let reference = Reference { kind: None, slug, org, version };
    match kind {
        ResourceKindArg::Agent => to_json(AgentController::new(store).get_by_reference(reference).await?),
        ResourceKindArg::Workflow => to_json(WorkflowController::new(store).get_by_reference(reference).await?),
        ResourceKindArg::Session => to_json(SessionController::new(store).get_by_reference(reference).await?),
        ResourceKindArg::ExecutionContext => {
            to_json(ExecutionContextController::new(store).get_by_reference(reference).await?)
        }
    }
}

async fn run_list(kind: ResourceKindArg, store: Arc<dyn Store>) -> Result<String, CoreError> {
    match kind {
        ResourceKindArg::Agent => to_json(AgentController::new(store).list().await?),
        ResourceKindArg::Workflow => to_json(WorkflowController::new(store).list().await?),
        ResourceKindArg::Session => to_json(SessionController::new(store).list().await?),
        ResourceKindArg::ExecutionContext => to_json(ExecutionContextController::new(store).list().await?),
    }
}

async fn run_skill_push(
    archive: std::path::PathBuf,
    body: &BodySource,
    store: Arc<dyn Store>,
    artifact_store: Arc<dyn ArtifactStore>,
) -> Result<String, CoreError> {
    #[derive(serde::Deserialize)]
    struct PushMeta {
        name: String,
        #[serde(default)]
        tag: String,
        #[serde(default)]
        org: Option<String>,
        #[serde(default)]
        scope: corepipe::entities::OwnerScope,
    }

    let meta: PushMeta = parse_body(body)?;
    let artifact = std::fs::read(&archive)
        .map_err(|err| CoreError::invalid_argument(format!("failed to read {archive:?}: {err}")))?;
    let input = SkillPushInput { name: meta.name, tag: meta.tag, org: meta.org, scope: meta.scope, artifact };
    to_json(SkillController::new(store, artifact_store).push(input).await?)
}

async fn run_skill_get_artifact(
    storage_key: &str,
    out: &Path,
    store: Arc<dyn Store>,
    artifact_store: Arc<dyn ArtifactStore>,
) -> Result<String, CoreError> {
    let bytes = SkillController::new(store, artifact_store).get_artifact(storage_key).await?;
    std::fs::write(out, &bytes).map_err(|err| CoreError::internal(format!("failed to write {out:?}: {err}")))?;
    Ok(format!("wrote {} bytes to {}", bytes.len(), out.display()))
}

fn to_json<T: serde::Serialize>(value: T) -> Result<String, CoreError> {
    serde_json::to_string_pretty(&value).map_err(CoreError::from)
}
