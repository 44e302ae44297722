//! View scopes.
//!
//! A view owns a [`ViewScope`] for as long as it is on screen. Every backend
//! call the view makes goes through [`ViewScope::run`]; once the view is
//! closed, pending calls resolve to `None` and their responses are dropped
//! instead of being applied to state nobody is looking at.

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Lifetime of one view instance.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    cancel: CancellationToken,
}

impl ViewScope {
    /// A new, open scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope that closes when `parent` closes, but can also be closed on
    /// its own (a detail pane inside a page).
    pub fn child(&self) -> Self {
        Self {
            cancel: self.cancel.child_token(),
        }
    }

    /// Close the scope. Pending and future [`run`](Self::run) calls resolve
    /// to `None`.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    /// Whether the scope has been closed.
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` to completion unless the scope closes first.
    ///
    /// Returns `None` if the scope was closed before `fut` resolved; the
    /// future is dropped and its output never observed.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.cancel.is_cancelled() {
            tracing::debug!("view closed; request not issued");
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!("view closed; response discarded");
                None
            }
            out = fut => Some(out),
        }
    }

    /// Sleep for `duration` unless the scope closes first. Returns `false`
    /// if the scope closed.
    pub async fn sleep(&self, duration: std::time::Duration) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(duration) => true,
        }
    }
}
