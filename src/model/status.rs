//! Publishing status vocabulary and status history entries.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CurationError;

/// Curation status of a phyloreference, drawn from the Publishing Status
/// Ontology (`pso:`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PhylorefStatus {
    /// `pso:draft`
    Draft,
    /// `pso:final-draft`
    FinalDraft,
    /// `pso:under-review`
    UnderReview,
    /// `pso:submitted`
    Submitted,
    /// `pso:published`
    Published,
    /// `pso:retracted-from-publication`
    RetractedFromPublication,
}

impl PhylorefStatus {
    /// Every status in vocabulary order.
    pub const ALL: [Self; 6] = [
        Self::Draft,
        Self::FinalDraft,
        Self::UnderReview,
        Self::Submitted,
        Self::Published,
        Self::RetractedFromPublication,
    ];

    /// Compact URI for this status.
    #[must_use]
    pub fn curie(self) -> &'static str {
        match self {
            Self::Draft => "pso:draft",
            Self::FinalDraft => "pso:final-draft",
            Self::UnderReview => "pso:under-review",
            Self::Submitted => "pso:submitted",
            Self::Published => "pso:published",
            Self::RetractedFromPublication => "pso:retracted-from-publication",
        }
    }

    /// English name for display.
    #[must_use]
    pub fn english_label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::FinalDraft => "Final draft",
            Self::UnderReview => "Under review",
            Self::Submitted => "Submitted",
            Self::Published => "Published",
            Self::RetractedFromPublication => "Retracted from publication",
        }
    }
}

impl fmt::Display for PhylorefStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.curie())
    }
}

impl FromStr for PhylorefStatus {
    type Err = CurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.curie() == value)
            .ok_or_else(|| CurationError::UnknownStatus { value: value.to_string() })
    }
}

impl TryFrom<String> for PhylorefStatus {
    type Error = CurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PhylorefStatus> for String {
    fn from(status: PhylorefStatus) -> Self {
        status.curie().to_string()
    }
}

/// One entry in a phyloreference's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    /// The status entered.
    #[serde(rename = "statusCURIE")]
    pub status_curie: PhylorefStatus,
    /// When the status was entered. Absent only on the implicit initial
    /// draft entry, which is never stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl StatusEntry {
    /// The implicit status of a phyloreference with no recorded history.
    #[must_use]
    pub fn initial() -> Self {
        Self { status_curie: PhylorefStatus::Draft, timestamp: None }
    }
}
