#![deny(missing_docs)]

//! # cscan-view: client-side compliance lifecycle and aggregation
//!
//! The state and derivation logic behind the Compliance Scan screens,
//! independent of how they are rendered:
//!
//! - [`catalog`]: requirement list with local search, category, and
//!   active-only filtering; writes go to the backend and are followed by a
//!   refresh, never applied optimistically.
//! - [`lifecycle`]: per-report tracking of `pending → processing →
//!   completed | failed`, fetching the compliance summary only once a
//!   report is completed.
//! - [`aggregate`]: summary consistency checks and the display math for
//!   the compliance indicator.
//! - [`scope`]: view lifetimes; responses arriving after a view closed are
//!   dropped.
//! - [`error`]: the user-facing error taxonomy.
//!
//! Everything talks to the backend through
//! [`cscan_client::ComplianceBackend`], so tests run against an in-memory
//! stub.

pub mod aggregate;
pub mod catalog;
pub mod display;
pub mod error;
pub mod lifecycle;
pub mod scope;

pub use aggregate::{
    confidence_percent, ring_arc, validate_summary, ComplianceBand, CompliancePanel, RingArc,
    RING_RADIUS,
};
pub use catalog::{categories, filter_requirements, CatalogFilter, CatalogView, RequirementCatalog};
pub use error::{Surface, ViewError};
pub use lifecycle::{submit_upload, ReportTracker, ReportView, DEFAULT_POLL_INTERVAL};
pub use scope::ViewScope;
