//! # Requirement Catalog
//!
//! The catalog always loads the full requirement list and filters it
//! locally with a [`CatalogFilter`]. Writes are never applied optimistically:
//! the local list changes only by re-fetching after the backend has
//! acknowledged a create, update, or delete. If that re-fetch fails the list
//! is kept but flagged stale, and [`CatalogView::stale`] says so.

use std::collections::BTreeSet;
use std::sync::Arc;

use cscan_client::{ComplianceBackend, RequirementQuery};
use cscan_core::{Requirement, RequirementDraft, RequirementId, RequirementPatch};

use crate::error::ViewError;
use crate::scope::ViewScope;

/// Filter state of one catalog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Case-insensitive substring of name or description. Empty matches all.
    pub search_term: String,
    /// Exact category; `None` matches any. Uncategorized requirements never
    /// match a set category.
    pub category: Option<String>,
    /// Hide inactive requirements.
    pub active_only: bool,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: None,
            active_only: true,
        }
    }
}

impl CatalogFilter {
    /// Whether `requirement` passes every predicate.
    pub fn matches(&self, requirement: &Requirement) -> bool {
        self.matches_search(requirement)
            && self.matches_category(requirement)
            && (!self.active_only || requirement.active)
    }

    fn matches_search(&self, requirement: &Requirement) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        requirement.name.to_lowercase().contains(&needle)
            || requirement.description.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, requirement: &Requirement) -> bool {
        match &self.category {
            None => true,
            Some(wanted) => requirement.category.as_deref() == Some(wanted.as_str()),
        }
    }
}

/// The requirements passing `filter`, in their original order.
pub fn filter_requirements<'a>(
    requirements: &'a [Requirement],
    filter: &CatalogFilter,
) -> Vec<&'a Requirement> {
    requirements.iter().filter(|r| filter.matches(r)).collect()
}

/// Distinct non-null categories, sorted.
pub fn categories(requirements: &[Requirement]) -> BTreeSet<String> {
    requirements
        .iter()
        .filter_map(|r| r.category.clone())
        .collect()
}

/// What the catalog screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView<'a> {
    /// Requirements passing the filter.
    pub rows: Vec<&'a Requirement>,
    /// Category facet over the whole list, not just the filtered rows.
    pub categories: BTreeSet<String>,
    /// The last refresh failed; rows may not reflect the backend.
    pub stale: bool,
}

/// Requirement management state for one view.
#[derive(Debug)]
pub struct RequirementCatalog<B> {
    backend: Arc<B>,
    scope: ViewScope,
    requirements: Vec<Requirement>,
    stale: bool,
}

impl<B: ComplianceBackend> RequirementCatalog<B> {
    /// An empty catalog. Call [`refresh`](Self::refresh) to load it.
    pub fn new(backend: Arc<B>, scope: ViewScope) -> Self {
        Self {
            backend,
            scope,
            requirements: Vec::new(),
            stale: true,
        }
    }

    /// Everything currently loaded, unfiltered.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Whether the loaded list may be out of date.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Apply `filter` to the loaded list.
    pub fn view(&self, filter: &CatalogFilter) -> CatalogView<'_> {
        CatalogView {
            rows: filter_requirements(&self.requirements, filter),
            categories: categories(&self.requirements),
            stale: self.stale,
        }
    }

    /// Re-fetch the full list. Returns the number of requirements loaded,
    /// or `None` if the view closed first.
    ///
    /// # Errors
    ///
    /// On failure the previous list is kept and marked stale.
    pub async fn refresh(&mut self) -> Result<Option<usize>, ViewError> {
        let query = RequirementQuery::default();
        let Some(result) = self.scope.run(self.backend.list_requirements(&query)).await else {
            return Ok(None);
        };
        match result {
            Ok(requirements) => {
                tracing::debug!(count = requirements.len(), "requirement catalog refreshed");
                self.requirements = requirements;
                self.stale = false;
                Ok(Some(self.requirements.len()))
            }
            Err(e) => {
                tracing::warn!(error = %e, "requirement catalog refresh failed");
                self.stale = true;
                Err(e.into())
            }
        }
    }

    /// Validate and create a requirement, then refresh.
    ///
    /// # Errors
    ///
    /// [`ViewError::Validation`] without any request if the draft is
    /// invalid; otherwise [`ViewError::Request`], with the list unchanged.
    /// A 404 is a request error here, not a not-found page.
    pub async fn create(
        &mut self,
        draft: RequirementDraft,
    ) -> Result<Option<Requirement>, ViewError> {
        let body = draft.validate()?;
        let Some(result) = self.scope.run(self.backend.create_requirement(&body)).await else {
            return Ok(None);
        };
        let created = result.map_err(ViewError::Request)?;
        tracing::info!(requirement_id = %created.id, name = %created.name, "requirement created");
        self.refresh_after_write().await;
        Ok(Some(created))
    }

    /// Validate and apply a partial update, then refresh.
    ///
    /// # Errors
    ///
    /// As for [`create`](Self::create).
    pub async fn update(
        &mut self,
        id: RequirementId,
        patch: RequirementPatch,
    ) -> Result<Option<Requirement>, ViewError> {
        let body = patch.validate()?;
        let Some(result) = self
            .scope
            .run(self.backend.update_requirement(id, &body))
            .await
        else {
            return Ok(None);
        };
        let updated = result.map_err(ViewError::Request)?;
        tracing::info!(requirement_id = %id, "requirement updated");
        self.refresh_after_write().await;
        Ok(Some(updated))
    }

    /// Delete a requirement, then refresh.
    ///
    /// # Errors
    ///
    /// [`ViewError::Request`], with the list unchanged. This includes a
    /// missing id.
    pub async fn delete(&mut self, id: RequirementId) -> Result<Option<()>, ViewError> {
        let Some(result) = self.scope.run(self.backend.delete_requirement(id)).await else {
            return Ok(None);
        };
        if let Err(e) = result {
            tracing::warn!(requirement_id = %id, error = %e, "requirement delete failed");
            return Err(ViewError::Request(e));
        }
        tracing::info!(requirement_id = %id, "requirement deleted");
        self.refresh_after_write().await;
        Ok(Some(()))
    }

    /// The write was acknowledged, so the local list is now behind until a
    /// refresh succeeds.
    async fn refresh_after_write(&mut self) {
        self.stale = true;
        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "catalog left stale after write");
        }
    }
}
