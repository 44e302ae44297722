//! # Report Status Lifecycle
//!
//! Every uploaded report starts in `pending` and is moved forward by the
//! backend only:
//!
//! ```text
//! PENDING ──▶ PROCESSING ──┬──▶ COMPLETED   (terminal)
//!                          └──▶ FAILED      (terminal)
//! ```
//!
//! The client never issues these transitions. It observes `status` on each
//! fetch, and uses this module to decide what the view may do next and to
//! detect observations the lifecycle could not have produced.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StateTransitionError;

/// Processing status of an uploaded report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Uploaded and queued. Initial state.
    Pending,
    /// Text extraction and scoring in progress.
    Processing,
    /// Scoring finished; a compliance summary exists. Terminal.
    Completed,
    /// Processing hit an unrecoverable error. Terminal.
    Failed,
}

impl ReportStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Pending,
        ReportStatus::Processing,
        ReportStatus::Completed,
        ReportStatus::Failed,
    ];

    /// Wire name, as used by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Whether no further transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// States directly reachable in one backend step.
    pub fn successors(self) -> &'static [ReportStatus] {
        match self {
            Self::Pending => &[ReportStatus::Processing],
            Self::Processing => &[ReportStatus::Completed, ReportStatus::Failed],
            Self::Completed | Self::Failed => &[],
        }
    }

    /// Whether `next` is a single legal step from `self`.
    pub fn can_transition_to(self, next: ReportStatus) -> bool {
        self.successors().contains(&next)
    }

    /// Whether two successive observations are consistent with the lifecycle.
    ///
    /// Polling samples the status, so intermediate states may be skipped
    /// (`pending` then `completed` is fine). Staying put is always allowed.
    pub fn can_reach(self, later: ReportStatus) -> bool {
        if self == later {
            return true;
        }
        self.successors().iter().any(|s| s.can_reach(later))
    }

    /// Validate a single-step transition.
    pub fn transition(self, next: ReportStatus) -> Result<ReportStatus, StateTransitionError> {
        if self.can_transition_to(next) {
            return Ok(next);
        }
        let reason = if self.is_terminal() {
            format!("{self} is terminal")
        } else {
            format!(
                "{self} may only move to {}",
                self.successors()
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(" or ")
            )
        };
        Err(StateTransitionError::InvalidTransition {
            from: self,
            to: next,
            reason,
        })
    }

    /// Whether a compliance summary exists for a report in this state.
    pub fn has_summary(self) -> bool {
        self == Self::Completed
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(format!(
                "unknown report status \"{other}\" (expected pending, processing, completed, or failed)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_are_legal() {
        use ReportStatus::*;
        assert_eq!(Pending.transition(Processing), Ok(Processing));
        assert_eq!(Processing.transition(Completed), Ok(Completed));
        assert_eq!(Processing.transition(Failed), Ok(Failed));
    }

    #[test]
    fn terminal_states_have_no_successors() {
        use ReportStatus::*;
        for terminal in [Completed, Failed] {
            assert!(terminal.is_terminal());
            for next in ReportStatus::ALL {
                let err = terminal.transition(next).unwrap_err();
                assert!(err.to_string().contains("terminal"));
            }
        }
    }

    #[test]
    fn skipping_processing_is_not_a_single_step() {
        use ReportStatus::*;
        assert!(!Pending.can_transition_to(Completed));
        let err = Pending.transition(Completed).unwrap_err();
        assert!(err.to_string().contains("may only move to processing"));
    }

    #[test]
    fn reachability_tolerates_sampling_gaps() {
        use ReportStatus::*;
        assert!(Pending.can_reach(Completed));
        assert!(Pending.can_reach(Failed));
        assert!(Processing.can_reach(Processing));
        assert!(!Completed.can_reach(Pending));
        assert!(!Failed.can_reach(Completed));
        assert!(!Processing.can_reach(Pending));
    }

    #[test]
    fn only_completed_has_summary() {
        let with_summary: Vec<_> = ReportStatus::ALL
            .into_iter()
            .filter(|s| s.has_summary())
            .collect();
        assert_eq!(with_summary, vec![ReportStatus::Completed]);
    }

    #[test]
    fn wire_names_round_trip() {
        for status in ReportStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<ReportStatus>().unwrap(), status);
        }
        assert!("archived".parse::<ReportStatus>().is_err());
    }
}
