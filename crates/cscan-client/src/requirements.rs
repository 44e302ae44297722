//! Typed client for the requirement endpoints.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/requirements` | List requirements |
//! | GET    | `/requirements/{id}` | Get one requirement |
//! | POST   | `/requirements` | Create |
//! | PATCH  | `/requirements/{id}` | Partial update |
//! | DELETE | `/requirements/{id}` | Delete |

use cscan_core::{NewRequirement, Requirement, RequirementId, ValidatedPatch};
use serde::Serialize;

use crate::error::ApiError;
use crate::transport;

/// Query parameters for `GET /requirements`. Unset fields are omitted, in
/// which case the backend returns every requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequirementQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Client for `/requirements`.
#[derive(Debug, Clone)]
pub struct RequirementClient {
    http: reqwest::Client,
    base_url: String,
}

impl RequirementClient {
    pub(crate) fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// List requirements.
    ///
    /// Calls `GET {base_url}/requirements`.
    pub async fn list(&self, query: &RequirementQuery) -> Result<Vec<Requirement>, ApiError> {
        let url = format!("{}/requirements", self.base_url);
        transport::send_json("GET /requirements", self.http.get(&url).query(query)).await
    }

    /// Get one requirement.
    ///
    /// Calls `GET {base_url}/requirements/{id}`.
    pub async fn get(&self, id: RequirementId) -> Result<Requirement, ApiError> {
        let endpoint = format!("GET /requirements/{id}");
        let url = format!("{}/requirements/{id}", self.base_url);
        transport::send_json(&endpoint, self.http.get(&url)).await
    }

    /// Create a requirement.
    ///
    /// Calls `POST {base_url}/requirements`.
    pub async fn create(&self, body: &NewRequirement) -> Result<Requirement, ApiError> {
        let url = format!("{}/requirements", self.base_url);
        transport::send_json("POST /requirements", self.http.post(&url).json(body)).await
    }

    /// Apply a partial update.
    ///
    /// Calls `PATCH {base_url}/requirements/{id}`.
    pub async fn update(
        &self,
        id: RequirementId,
        patch: &ValidatedPatch,
    ) -> Result<Requirement, ApiError> {
        let endpoint = format!("PATCH /requirements/{id}");
        let url = format!("{}/requirements/{id}", self.base_url);
        transport::send_json(&endpoint, self.http.patch(&url).json(patch)).await
    }

    /// Delete a requirement.
    ///
    /// Calls `DELETE {base_url}/requirements/{id}`.
    pub async fn delete(&self, id: RequirementId) -> Result<(), ApiError> {
        let endpoint = format!("DELETE /requirements/{id}");
        let url = format!("{}/requirements/{id}", self.base_url);
        transport::send(&endpoint, self.http.delete(&url)).await?;
        Ok(())
    }
}
