//! Requirement catalog writes and refreshes against the in-memory backend.

mod support;

use std::sync::Arc;

use cscan_core::{RequirementDraft, RequirementId, RequirementPatch};
use cscan_view::{CatalogFilter, RequirementCatalog, Surface, ViewError, ViewScope};
use support::{requirement, StubBackend};

fn seeded() -> Arc<StubBackend> {
    Arc::new(StubBackend::with_requirements(vec![
        requirement(1, "Scope 1 emissions", Some("Environmental"), true),
        requirement(2, "Board diversity", Some("Social"), true),
        requirement(3, "Water usage", Some("Environmental"), false),
    ]))
}

async fn loaded(stub: &Arc<StubBackend>) -> RequirementCatalog<StubBackend> {
    let mut catalog = RequirementCatalog::new(Arc::clone(stub), ViewScope::new());
    assert_eq!(catalog.refresh().await.unwrap(), Some(3));
    catalog
}

fn ids(catalog: &RequirementCatalog<StubBackend>, filter: &CatalogFilter) -> Vec<i64> {
    catalog.view(filter).rows.iter().map(|r| r.id.get()).collect()
}

#[tokio::test]
async fn unloaded_catalog_is_stale() {
    let catalog = RequirementCatalog::new(seeded(), ViewScope::new());
    assert!(catalog.is_stale());
    assert!(catalog.view(&CatalogFilter::default()).rows.is_empty());
}

#[tokio::test]
async fn short_name_is_rejected_before_any_request() {
    let stub = seeded();
    let mut catalog = loaded(&stub).await;

    let err = catalog
        .create(RequirementDraft::new("ab", "Discloses scope 2 emissions"))
        .await
        .unwrap_err();
    assert_eq!(err.surface(), Surface::InlineField);
    assert!(err.user_message().contains("at least 3 characters"));
    assert_eq!(stub.count("create_requirement"), 0);
}

#[tokio::test]
async fn create_is_followed_by_refresh() {
    let stub = seeded();
    let mut catalog = loaded(&stub).await;

    let created = catalog
        .create(
            RequirementDraft::new("Scope 2 emissions", "Indirect energy emissions are disclosed")
                .with_category("Environmental"),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        stub.calls(),
        vec!["list_requirements", "create_requirement", "list_requirements"]
    );
    assert!(!catalog.is_stale());
    assert!(ids(&catalog, &CatalogFilter::default()).contains(&created.id.get()));
}

#[tokio::test]
async fn update_is_followed_by_refresh() {
    let stub = seeded();
    let mut catalog = loaded(&stub).await;

    catalog
        .update(RequirementId::new(3), RequirementPatch::new().active(true))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        stub.calls(),
        vec!["list_requirements", "update_requirement", "list_requirements"]
    );
    assert_eq!(ids(&catalog, &CatalogFilter::default()), vec![1, 2, 3]);
}

#[tokio::test]
async fn deleting_a_missing_requirement_leaves_the_list_alone() {
    let stub = seeded();
    let mut catalog = loaded(&stub).await;
    let before = catalog.requirements().to_vec();

    let err = catalog.delete(RequirementId::new(42)).await.unwrap_err();

    assert!(matches!(&err, ViewError::Request(e) if e.is_not_found()));
    assert_eq!(err.surface(), Surface::Notification);
    assert!(err.user_message().contains("not found"));
    assert_eq!(catalog.requirements(), before.as_slice());
    assert!(!catalog.is_stale());
    // No refresh after a rejected write.
    assert_eq!(stub.calls(), vec!["list_requirements", "delete_requirement"]);
}

#[tokio::test]
async fn updating_a_missing_requirement_is_a_notification() {
    let stub = seeded();
    let mut catalog = loaded(&stub).await;
    let before = catalog.requirements().to_vec();

    let err = catalog
        .update(RequirementId::new(42), RequirementPatch::new().active(false))
        .await
        .unwrap_err();

    assert!(matches!(&err, ViewError::Request(e) if e.is_not_found()));
    assert_eq!(err.surface(), Surface::Notification);
    assert!(err.user_message().contains("not found"));
    assert_eq!(catalog.requirements(), before.as_slice());
    assert!(!catalog.is_stale());
    assert_eq!(stub.calls(), vec!["list_requirements", "update_requirement"]);
}

#[tokio::test]
async fn delete_removes_only_after_confirmation() {
    let stub = seeded();
    let mut catalog = loaded(&stub).await;

    catalog.delete(RequirementId::new(1)).await.unwrap().unwrap();
    let all = CatalogFilter {
        active_only: false,
        ..CatalogFilter::default()
    };
    assert_eq!(ids(&catalog, &all), vec![2, 3]);
}

#[tokio::test]
async fn failed_refresh_after_write_marks_list_stale() {
    let stub = seeded();
    let mut catalog = loaded(&stub).await;
    stub.fail_lists(true);

    catalog.delete(RequirementId::new(2)).await.unwrap().unwrap();

    let view = catalog.view(&CatalogFilter::default());
    assert!(view.stale);
    // The old rows remain, flagged as possibly out of date.
    assert_eq!(view.rows.len(), 2);
    assert_eq!(stub.stored_requirements().len(), 2);
}

#[tokio::test]
async fn facet_and_default_filter() {
    let stub = seeded();
    let catalog = loaded(&stub).await;

    let view = catalog.view(&CatalogFilter::default());
    let facet: Vec<_> = view.categories.iter().cloned().collect();
    assert_eq!(facet, vec!["Environmental", "Social"]);
    assert_eq!(ids(&catalog, &CatalogFilter::default()), vec![1, 2]);
}

#[tokio::test]
async fn closed_view_does_not_write() {
    let stub = seeded();
    let scope = ViewScope::new();
    let mut catalog = RequirementCatalog::new(Arc::clone(&stub), scope.clone());
    scope.close();

    let out = catalog
        .create(RequirementDraft::new("Scope 3", "Value chain emissions are disclosed"))
        .await
        .unwrap();
    assert!(out.is_none());
    assert!(stub.calls().is_empty());
}
