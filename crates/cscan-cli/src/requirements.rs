//! # Requirements Subcommand
//!
//! - `list`: Filtered catalog view (active only unless `--all`).
//! - `categories`: Distinct categories across all requirements.
//! - `add`: Create a requirement.
//! - `edit`: Partially update a requirement.
//! - `remove`: Delete a requirement.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use cscan_client::ApiClient;
use cscan_core::{RequirementDraft, RequirementId, RequirementPatch};
use cscan_view::{CatalogFilter, RequirementCatalog, ViewScope};

use crate::output;
use crate::view_error;

/// Arguments for the `cscan requirements` subcommand.
#[derive(Args, Debug)]
pub struct RequirementsArgs {
    #[command(subcommand)]
    pub command: RequirementsCommand,
}

/// Requirement subcommands.
#[derive(Subcommand, Debug)]
pub enum RequirementsCommand {
    /// List requirements matching the filters.
    List {
        /// Case-insensitive text to find in name or description.
        #[arg(long, default_value = "")]
        search: String,
        /// Exact category.
        #[arg(long)]
        category: Option<String>,
        /// Include inactive requirements.
        #[arg(long)]
        all: bool,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// List the distinct categories in use.
    Categories,

    /// Create a requirement.
    Add {
        /// Name (at least 3 characters).
        #[arg(long)]
        name: String,
        /// Description (at least 10 characters).
        #[arg(long)]
        description: String,
        /// Category. Leave empty for none.
        #[arg(long)]
        category: Option<String>,
        /// Create the requirement inactive.
        #[arg(long)]
        inactive: bool,
    },

    /// Update selected fields of a requirement.
    Edit {
        /// Requirement identifier.
        id: RequirementId,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// New category. An empty value clears it.
        #[arg(long, conflicts_with = "clear_category")]
        category: Option<String>,
        /// Remove the category.
        #[arg(long)]
        clear_category: bool,
        /// Set active (true) or inactive (false).
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a requirement.
    Remove {
        /// Requirement identifier.
        id: RequirementId,
    },
}

/// Execute the requirements subcommand.
pub async fn run_requirements(args: &RequirementsArgs, client: Arc<ApiClient>) -> Result<u8> {
    let scope = ViewScope::new();
    crate::close_on_interrupt(&scope);
    let mut catalog = RequirementCatalog::new(client, scope);

    match &args.command {
        RequirementsCommand::List {
            search,
            category,
            all,
            json,
        } => {
            let filter = CatalogFilter {
                search_term: search.clone(),
                category: category.clone(),
                active_only: !*all,
            };
            cmd_list(&mut catalog, &filter, *json).await
        }
        RequirementsCommand::Categories => cmd_categories(&mut catalog).await,
        RequirementsCommand::Add {
            name,
            description,
            category,
            inactive,
        } => {
            let mut draft = RequirementDraft::new(name, description).with_active(!*inactive);
            draft.category = category.clone();
            let Some(created) = catalog.create(draft).await.map_err(view_error)? else {
                return Ok(0);
            };
            println!("Created requirement {}: {}", created.id, created.name);
            warn_if_stale(&catalog);
            Ok(0)
        }
        RequirementsCommand::Edit {
            id,
            name,
            description,
            category,
            clear_category,
            active,
        } => {
            let patch = build_patch(
                name.clone(),
                description.clone(),
                category.clone(),
                *clear_category,
                *active,
            );
            let Some(updated) = catalog.update(*id, patch).await.map_err(view_error)? else {
                return Ok(0);
            };
            println!("Updated requirement {}", updated.id);
            println!("{}", output::requirement_line(&updated));
            warn_if_stale(&catalog);
            Ok(0)
        }
        RequirementsCommand::Remove { id } => {
            if catalog.delete(*id).await.map_err(view_error)?.is_some() {
                println!("Deleted requirement {id}");
                warn_if_stale(&catalog);
            }
            Ok(0)
        }
    }
}

async fn cmd_list(
    catalog: &mut RequirementCatalog<ApiClient>,
    filter: &CatalogFilter,
    json: bool,
) -> Result<u8> {
    if catalog.refresh().await.map_err(view_error)?.is_none() {
        return Ok(0);
    }
    let view = catalog.view(filter);
    if json {
        println!("{}", serde_json::to_string_pretty(&view.rows)?);
    } else if view.rows.is_empty() {
        println!("No requirements match.");
    } else {
        for requirement in &view.rows {
            println!("{}", output::requirement_line(requirement));
        }
    }
    Ok(0)
}

async fn cmd_categories(catalog: &mut RequirementCatalog<ApiClient>) -> Result<u8> {
    if catalog.refresh().await.map_err(view_error)?.is_none() {
        return Ok(0);
    }
    let view = catalog.view(&CatalogFilter::default());
    if view.categories.is_empty() {
        bail!("no categories defined");
    }
    for category in &view.categories {
        println!("{category}");
    }
    Ok(0)
}

fn build_patch(
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    clear_category: bool,
    active: Option<bool>,
) -> RequirementPatch {
    let mut patch = RequirementPatch::new();
    patch.name = name;
    patch.description = description;
    patch.active = active;
    if clear_category {
        patch = patch.clear_category();
    } else if let Some(category) = category {
        patch = patch.category(category);
    }
    patch
}

fn warn_if_stale(catalog: &RequirementCatalog<ApiClient>) {
    if catalog.is_stale() {
        tracing::warn!("the change was saved but the requirement list could not be reloaded");
    }
}
