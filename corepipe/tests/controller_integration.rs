//! Integration tests for the generic resource controllers and the skill
//! subsystem, exercised end to end against the in-memory `Store`/
//! `ArtifactStore` adapters. Unlike the unit tests embedded in each step's
//! module, these cover the behavior only visible once the full pipeline
//! for an operation is assembled: duplicate rejection, immutability of
//! identity fields across an update, apply's create-vs-update dispatch,
//! skill deduplication by content hash, version resolution, and archival
//! cleanup on delete.

use corepipe::controllers::AgentController;
use corepipe::infra::{InMemoryArtifactStore, InMemoryStore};
use corepipe::model::{Reference, ResourceId};
use corepipe::skills::{SkillController, SkillPushInput};
use corepipe::{CoreError, ErrorCode, Store};
use corepipe_domain::entities::agent::{Agent, AgentSpec};
use corepipe_domain::entities::{Metadata, OwnerScope};
use std::io::Write;
use std::sync::Arc;

fn new_agent(name: &str) -> Agent {
    Agent {
        metadata: Metadata { name: name.to_string(), ..Metadata::default() },
        spec: AgentSpec { instructions: "say hello".to_string(), ..AgentSpec::default() },
        ..Agent::default()
    }
}

fn zip_with_skill_md(contents: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let cursor = std::io::Cursor::new(&mut buf);
        let mut writer = zip::ZipWriter::new(cursor);
        let options: zip::write::FileOptions<()> =
            zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("SKILL.md", options).unwrap();
        writer.write_all(contents).unwrap();
        writer.finish().unwrap();
    }
    buf
}

#[tokio::test]
async fn create_get_update_roundtrip() {
    let store = Arc::new(InMemoryStore::new());
    let controller = AgentController::new(store);

    let created = controller.create(new_agent("Router Agent")).await.unwrap();
    assert_eq!(created.metadata.slug, "router-agent");
    assert!(!created.metadata.id.is_empty());

    let fetched = controller.get(ResourceId { value: created.metadata.id.clone() }).await.unwrap();
    assert_eq!(fetched, created);

    let mut update_input = fetched.clone();
    update_input.metadata.name = "Router Agent v2".to_string();
    update_input.spec.instructions = "say hello politely".to_string();
    let updated = controller.update(update_input).await.unwrap();

    assert_eq!(updated.metadata.id, created.metadata.id, "id must survive an update");
    assert_eq!(updated.metadata.slug, created.metadata.slug, "slug must survive an update");
    assert_eq!(updated.metadata.name, "Router Agent v2");
    assert_eq!(updated.spec.instructions, "say hello politely");
}

#[tokio::test]
async fn apply_creates_then_updates() {
    let store = Arc::new(InMemoryStore::new());
    let controller = AgentController::new(store);

    let first = controller.apply(new_agent("Scheduler Agent")).await.unwrap();
    assert_eq!(first.metadata.slug, "scheduler-agent");

    let mut second_input = first.clone();
    second_input.spec.instructions = "reschedule on failure".to_string();
    let second = controller.apply(second_input).await.unwrap();

    assert_eq!(second.metadata.id, first.metadata.id, "apply on an existing slug must update, not recreate");
    assert_eq!(second.spec.instructions, "reschedule on failure");

    let all = controller.list().await.unwrap();
    assert_eq!(all.len(), 1, "apply must never produce a duplicate record");
}

#[tokio::test]
async fn duplicate_slug_is_rejected() {
    let store = Arc::new(InMemoryStore::new());
    let controller = AgentController::new(store);

    controller.create(new_agent("Billing Agent")).await.unwrap();
    let err = controller.create(new_agent("Billing Agent")).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::AlreadyExists);
}

#[tokio::test]
async fn duplicate_slug_is_allowed_across_orgs() {
    let store = Arc::new(InMemoryStore::new());
    let controller = AgentController::new(store);

    let mut acme = new_agent("Billing Agent");
    acme.metadata.org = Some("acme".to_string());
    let mut globex = new_agent("Billing Agent");
    globex.metadata.org = Some("globex".to_string());

    controller.create(acme).await.unwrap();
    controller.create(globex).await.unwrap();

    assert_eq!(controller.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_cannot_change_org() {
    let store = Arc::new(InMemoryStore::new());
    let controller = AgentController::new(store);

    let mut input = new_agent("Support Agent");
    input.metadata.org = Some("acme".to_string());
    let created = controller.create(input).await.unwrap();

    let mut attempted = created.clone();
    attempted.metadata.org = Some("globex".to_string());
    let updated = controller.update(attempted).await.unwrap();

    assert_eq!(updated.metadata.org, Some("acme".to_string()), "org must not be mutable via update");
}

#[tokio::test]
async fn delete_returns_the_deleted_resource() {
    let store = Arc::new(InMemoryStore::new());
    let controller = AgentController::new(store);

    let created = controller.create(new_agent("Throwaway Agent")).await.unwrap();
    let deleted = controller.delete(ResourceId { value: created.metadata.id.clone() }).await.unwrap();
    assert_eq!(deleted.metadata.id, created.metadata.id);

    let err = controller.get(ResourceId { value: created.metadata.id }).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn get_by_reference_finds_the_current_resource_by_slug() {
    let store = Arc::new(InMemoryStore::new());
    let controller = AgentController::new(store);

    let created = controller.create(new_agent("Lookup Agent")).await.unwrap();

    let reference = Reference { kind: None, slug: "lookup-agent".to_string(), org: None, version: "latest".to_string() };
    let found = controller.get_by_reference(reference).await.unwrap();
    assert_eq!(found.metadata.id, created.metadata.id);
}

#[tokio::test]
async fn get_by_reference_rejects_any_version_for_kinds_without_history() {
    let store = Arc::new(InMemoryStore::new());
    let controller = AgentController::new(store);

    controller.create(new_agent("Versionless Agent")).await.unwrap();

    let reference = Reference {
        kind: None,
        slug: "versionless-agent".to_string(),
        org: None,
        version: "some-old-tag".to_string(),
    };
    let err = controller.get_by_reference(reference).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn skill_push_is_content_addressable_and_deduplicates() {
    let store = Arc::new(InMemoryStore::new());
    let artifact_store = Arc::new(InMemoryArtifactStore::new());
    let controller = SkillController::new(store, artifact_store);

    let artifact = zip_with_skill_md(b"# Refund Policy\n\nAlways offer a refund.");
    let push_one = SkillPushInput {
        name: "Refund Policy".to_string(),
        tag: "v1".to_string(),
        org: None,
        scope: OwnerScope::Platform,
        artifact: artifact.clone(),
    };
    let first = controller.push(push_one).await.unwrap();

    // Pushing byte-identical content again under the same slug must not
    // mint a new id or a new storage key, only advance the audit trail.
    let push_two = SkillPushInput {
        name: "Refund Policy".to_string(),
        tag: "v1-resubmit".to_string(),
        org: None,
        scope: OwnerScope::Platform,
        artifact,
    };
    let second = controller.push(push_two).await.unwrap();

    assert_eq!(second.metadata.id, first.metadata.id);
    assert_eq!(second.status.version_hash, first.status.version_hash);
    assert_eq!(second.status.artifact_storage_key, first.status.artifact_storage_key);
    assert_eq!(controller.list().await.unwrap().len(), 1, "re-pushing must update, not duplicate, the skill");
}

#[tokio::test]
async fn skill_push_new_content_changes_the_hash_and_storage_key() {
    let store = Arc::new(InMemoryStore::new());
    let artifact_store = Arc::new(InMemoryArtifactStore::new());
    let controller = SkillController::new(store, artifact_store);

    let v1 = zip_with_skill_md(b"# Policy v1");
    let v2 = zip_with_skill_md(b"# Policy v2, materially different");

    let first = controller
        .push(SkillPushInput {
            name: "Evolving Policy".to_string(),
            tag: "v1".to_string(),
            org: None,
            scope: OwnerScope::Platform,
            artifact: v1,
        })
        .await
        .unwrap();
    let second = controller
        .push(SkillPushInput {
            name: "Evolving Policy".to_string(),
            tag: "v2".to_string(),
            org: None,
            scope: OwnerScope::Platform,
            artifact: v2,
        })
        .await
        .unwrap();

    assert_eq!(second.metadata.id, first.metadata.id, "same slug must still be the same resource");
    assert_ne!(second.status.version_hash, first.status.version_hash);
    assert_ne!(second.status.artifact_storage_key, first.status.artifact_storage_key);
}

#[tokio::test]
async fn skill_get_by_reference_resolves_hash_and_tag() {
    let store = Arc::new(InMemoryStore::new());
    let artifact_store = Arc::new(InMemoryArtifactStore::new());
    let controller = SkillController::new(store, artifact_store);

    let v1 = zip_with_skill_md(b"# v1 content");
    let v1_pushed = controller
        .push(SkillPushInput {
            name: "Versioned Skill".to_string(),
            tag: "v1".to_string(),
            org: None,
            scope: OwnerScope::Platform,
            artifact: v1,
        })
        .await
        .unwrap();
    let v1_hash = v1_pushed.status.version_hash.clone();

    let v2 = zip_with_skill_md(b"# v2 content, now current");
    controller
        .push(SkillPushInput {
            name: "Versioned Skill".to_string(),
            tag: "v2".to_string(),
            org: None,
            scope: OwnerScope::Platform,
            artifact: v2,
        })
        .await
        .unwrap();

    let latest = controller
        .get_by_reference(Reference {
            kind: None,
            slug: "versioned-skill".to_string(),
            org: None,
            version: "latest".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(latest.spec.tag, "v2");

    let by_hash = controller
        .get_by_reference(Reference {
            kind: None,
            slug: "versioned-skill".to_string(),
            org: None,
            version: v1_hash,
        })
        .await
        .unwrap();
    assert_eq!(by_hash.spec.tag, "v1");

    let by_tag = controller
        .get_by_reference(Reference {
            kind: None,
            slug: "versioned-skill".to_string(),
            org: None,
            version: "v1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(by_tag.status.version_hash, by_hash.status.version_hash);
}

#[tokio::test]
async fn skill_delete_removes_archive_history() {
    let store = Arc::new(InMemoryStore::new());
    let artifact_store = Arc::new(InMemoryArtifactStore::new());
    let controller = SkillController::new(store.clone(), artifact_store);

    let v1 = zip_with_skill_md(b"# first");
    let skill = controller
        .push(SkillPushInput {
            name: "Disposable Skill".to_string(),
            tag: "v1".to_string(),
            org: None,
            scope: OwnerScope::Platform,
            artifact: v1,
        })
        .await
        .unwrap();
    let v1_hash = skill.status.version_hash.clone();

    let v2 = zip_with_skill_md(b"# second, current");
    controller
        .push(SkillPushInput {
            name: "Disposable Skill".to_string(),
            tag: "v2".to_string(),
            org: None,
            scope: OwnerScope::Platform,
            artifact: v2,
        })
        .await
        .unwrap();

    controller.delete(ResourceId { value: skill.metadata.id.clone() }).await.unwrap();

    let archived_err = store
        .get_audit_by_hash(corepipe::ResourceKind::Skill, &skill.metadata.id, &v1_hash)
        .await
        .unwrap_err();
    assert!(matches!(archived_err, CoreError::NotFound(_)));
}

#[tokio::test]
async fn skill_push_rejects_a_malformed_archive() {
    let store = Arc::new(InMemoryStore::new());
    let artifact_store = Arc::new(InMemoryArtifactStore::new());
    let controller = SkillController::new(store, artifact_store);

    let err = controller
        .push(SkillPushInput {
            name: "Broken Skill".to_string(),
            tag: "v1".to_string(),
            org: None,
            scope: OwnerScope::Platform,
            artifact: b"definitely not a zip file".to_vec(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidArgument);
}
