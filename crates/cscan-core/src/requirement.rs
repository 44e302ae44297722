//! # Regulatory Requirements
//!
//! [`Requirement`] is the backend record. Submissions go through
//! [`RequirementDraft::validate`] (create) or [`RequirementPatch::validate`]
//! (partial update); only the validated forms are serializable request
//! bodies.
//!
//! A category is either a non-empty string or absent. Blank category input
//! is submitted as `null`, never as `""`.

use serde::{Deserialize, Serialize};

use crate::error::{FieldErrors, ValidationError};
use crate::identity::RequirementId;
use crate::temporal::Timestamp;

/// Minimum requirement name length, in characters.
pub const NAME_MIN_CHARS: usize = 3;

/// Minimum requirement description length, in characters.
pub const DESCRIPTION_MIN_CHARS: usize = 10;

/// A regulatory requirement as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Backend identifier.
    pub id: RequirementId,
    /// Short name.
    pub name: String,
    /// What the requirement demands of a report.
    pub description: String,
    /// Optional grouping. `None` never matches a category filter.
    #[serde(default)]
    pub category: Option<String>,
    /// Inactive requirements are skipped by new scans.
    pub active: bool,
    /// Set by the backend.
    pub created_at: Timestamp,
    /// Set by the backend.
    pub updated_at: Timestamp,
}

/// Raw create-form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementDraft {
    /// Name as typed.
    pub name: String,
    /// Description as typed.
    pub description: String,
    /// Category as typed; blank means none.
    pub category: Option<String>,
    /// Active toggle.
    pub active: bool,
}

impl Default for RequirementDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            category: None,
            active: true,
        }
    }
}

impl RequirementDraft {
    /// Start a draft with the given name and description, active, no category.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Check every field and produce a submittable request body.
    ///
    /// # Errors
    ///
    /// Returns every failed constraint, in field order.
    pub fn validate(self) -> Result<NewRequirement, FieldErrors> {
        let mut errors = Vec::new();
        check_name(&self.name, &mut errors);
        check_description(&self.description, &mut errors);
        FieldErrors::collect(errors)?;

        Ok(NewRequirement {
            name: self.name,
            description: self.description,
            category: normalize_category(self.category),
            active: self.active,
        })
    }
}

/// A create request that passed local validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRequirement {
    name: String,
    description: String,
    category: Option<String>,
    active: bool,
}

impl NewRequirement {
    /// Validated name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Normalized category.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Active flag.
    pub fn active(&self) -> bool {
        self.active
    }
}

/// Raw edit-form input. Unset fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementPatch {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// `Some(None)` clears the category; `None` leaves it alone.
    pub category: Option<Option<String>>,
    /// New active flag.
    pub active: Option<bool>,
}

impl RequirementPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the category. Blank input clears it.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(Some(category.into()));
        self
    }

    /// Remove the category.
    pub fn clear_category(mut self) -> Self {
        self.category = Some(None);
        self
    }

    /// Replace the active flag.
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Check the fields that are set and produce a submittable body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyPatch`] when nothing is set, otherwise
    /// every failed constraint in field order.
    pub fn validate(self) -> Result<ValidatedPatch, FieldErrors> {
        if self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.active.is_none()
        {
            return Err(ValidationError::EmptyPatch.into());
        }

        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut errors);
        }
        if let Some(description) = &self.description {
            check_description(description, &mut errors);
        }
        FieldErrors::collect(errors)?;

        Ok(ValidatedPatch {
            name: self.name,
            description: self.description,
            category: self.category.map(normalize_category),
            active: self.active,
        })
    }
}

/// A partial update that passed local validation.
///
/// Serializes only the fields that were set; a cleared category is sent as
/// an explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<bool>,
}

fn check_name(name: &str, errors: &mut Vec<ValidationError>) {
    let actual = name.chars().count();
    if actual < NAME_MIN_CHARS {
        errors.push(ValidationError::NameTooShort {
            min: NAME_MIN_CHARS,
            actual,
        });
    }
}

fn check_description(description: &str, errors: &mut Vec<ValidationError>) {
    let actual = description.chars().count();
    if actual < DESCRIPTION_MIN_CHARS {
        errors.push(ValidationError::DescriptionTooShort {
            min: DESCRIPTION_MIN_CHARS,
            actual,
        });
    }
}

fn normalize_category(category: Option<String>) -> Option<String> {
    category.filter(|c| !c.trim().is_empty())
}
