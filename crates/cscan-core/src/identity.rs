//! # Identifier Newtypes
//!
//! The backend assigns integer identifiers to reports and requirements.
//! Each is wrapped in its own type so a [`ReportId`] cannot be passed where
//! a [`RequirementId`] is expected. Both serialize as bare integers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Backend identifier of an uploaded report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(i64);

impl ReportId {
    /// Wrap a raw backend identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ReportId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Backend identifier of a regulatory requirement. Immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementId(i64);

impl RequirementId {
    /// Wrap a raw backend identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RequirementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RequirementId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_integers() {
        assert_eq!(serde_json::to_string(&ReportId::new(12)).unwrap(), "12");
        let id: RequirementId = serde_json::from_str("42").unwrap();
        assert_eq!(id, RequirementId::new(42));
    }

    #[test]
    fn ids_parse_from_cli_input() {
        assert_eq!(" 9 ".parse::<ReportId>().unwrap().get(), 9);
        assert!("nine".parse::<RequirementId>().is_err());
    }
}
