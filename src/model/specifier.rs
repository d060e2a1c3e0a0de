//! Specifiers and their role within a phyloreference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::document::ExtraFields;
use super::taxonomic_unit::{TaxonomicUnit, LABEL_SEPARATOR};
use crate::error::CurationError;

/// Label used when a specifier references nothing describable.
pub const UNNAMED_SPECIFIER: &str = "Unnamed specifier";

/// Label used in place of a specifier that is not there at all.
pub const MISSING_SPECIFIER: &str = "(undefined)";

/// A reference to one or more taxonomic units used to define a clade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specifier {
    /// Explicit label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Taxonomic units this specifier stands for.
    #[serde(default)]
    pub references_taxonomic_units: Vec<TaxonomicUnit>,
    /// Unmodelled keys.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Specifier {
    /// A specifier referencing a single taxonomic unit.
    #[must_use]
    pub fn for_unit(unit: TaxonomicUnit) -> Self {
        Self { references_taxonomic_units: vec![unit], ..Self::default() }
    }

    /// Display label: explicit label, description, then the labels of the
    /// referenced units.
    #[must_use]
    pub fn label(&self) -> String {
        if let Some(label) = self.label.clone().or_else(|| self.description.clone()) {
            return label;
        }

        let parts: Vec<String> = self
            .references_taxonomic_units
            .iter()
            .filter_map(|unit| {
                unit.label.clone().or_else(|| unit.description.clone()).or_else(|| unit.composite_label())
            })
            .collect();

        if parts.is_empty() {
            UNNAMED_SPECIFIER.to_string()
        } else {
            parts.join(LABEL_SEPARATOR)
        }
    }
}

/// Label for an optional specifier slot.
#[must_use]
pub fn specifier_label(specifier: Option<&Specifier>) -> String {
    specifier.map_or_else(|| MISSING_SPECIFIER.to_string(), Specifier::label)
}

/// Which list of a phyloreference a specifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierRole {
    /// The clade must include the specifier.
    Internal,
    /// The clade must exclude the specifier.
    External,
    /// The specifier is in neither list.
    Unassigned,
}

impl SpecifierRole {
    /// Display name used by curation tools.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "Internal",
            Self::External => "External",
            Self::Unassigned => "Specifier",
        }
    }
}

impl fmt::Display for SpecifierRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecifierRole {
    type Err = CurationError;

    /// Only `Internal` and `External` name a list a specifier can move to.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Internal" => Ok(Self::Internal),
            "External" => Ok(Self::External),
            other => Err(CurationError::UnknownSpecifierType { value: other.to_string() }),
        }
    }
}
