//! # cscan-cli: command-line front end for Compliance Scan
//!
//! Provides the `cscan` binary. It stands in for the browser screens: every
//! command goes through the same `cscan-view` state as the UI would, so
//! validation, lifecycle tracking, and summary checks behave identically.
//!
//! ## Subcommands
//!
//! - `cscan reports`: list, show (optionally `--watch`), upload, download,
//!   delete.
//! - `cscan requirements`: list with filters, categories, add, edit,
//!   remove.
//!
//! ```bash
//! cscan reports upload acme-2024.pdf --company-name "Acme" --fiscal-year 2024 --watch
//! cscan requirements list --search emissions --category Environmental
//! ```

pub mod output;
pub mod reports;
pub mod requirements;

use cscan_view::{Surface, ViewError};

/// Exit code for a failed command.
pub const EXIT_FAILURE: u8 = 1;

/// Turn a view error into a CLI error carrying the user-facing message.
pub fn view_error(e: ViewError) -> anyhow::Error {
    let prefix = match e.surface() {
        Surface::InlineField => "invalid input",
        Surface::Notification => "request failed",
        Surface::NotFoundPage => "not found",
        Surface::IntegrityAlert => "inconsistent data",
        Surface::ProcessingFailure => "processing failed",
    };
    tracing::debug!(error = ?e, "command failed");
    anyhow::anyhow!("{prefix}: {}", e.user_message())
}

/// Close `scope` when the user presses Ctrl-C, so in-flight requests and
/// polling loops end instead of the process being killed mid-write.
pub fn close_on_interrupt(scope: &cscan_view::ViewScope) {
    let scope = scope.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted; closing view");
            scope.close();
        }
    });
}
