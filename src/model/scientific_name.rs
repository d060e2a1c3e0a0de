//! Scientific names and their genus/epithet decomposition.

use serde::{Deserialize, Serialize};

use super::document::ExtraFields;

/// A scientific name as entered by a curator.
///
/// Only `scientific_name` is authoritative. The other fields are either
/// supplied explicitly or derived from it; derivation never overwrites a
/// value that is already present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScientificName {
    /// Free-text name, possibly followed by an authority and year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    /// Genus and specific epithet separated by one space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binomial_name: Option<String>,
    /// First token of the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genus: Option<String>,
    /// Second token of the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_epithet: Option<String>,
    /// Unmodelled keys.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Pieces derivable from a free-text scientific name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedName {
    /// First whitespace-separated token.
    pub genus: Option<String>,
    /// Second whitespace-separated token.
    pub specific_epithet: Option<String>,
    /// `"<genus> <specific_epithet>"` when both tokens exist.
    pub binomial_name: Option<String>,
}

/// Splits a scientific name into genus, specific epithet and binomial name.
///
/// Tokens past the second (authority, year) are ignored. Empty input
/// yields an empty [`ParsedName`].
#[must_use]
pub fn parse_name(name: &str) -> ParsedName {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    let mut parsed = ParsedName::default();

    if let [genus, epithet, ..] = tokens.as_slice() {
        parsed.specific_epithet = Some((*epithet).to_string());
        parsed.binomial_name = Some(format!("{genus} {epithet}"));
    }
    if let Some(genus) = tokens.first() {
        parsed.genus = Some((*genus).to_string());
    }

    parsed
}

impl ScientificName {
    /// Creates a scientific name from free text without deriving anything.
    #[must_use]
    pub fn new(scientific_name: impl Into<String>) -> Self {
        Self { scientific_name: Some(scientific_name.into()), ..Self::default() }
    }

    /// Creates a scientific name and fills in the derived fields.
    #[must_use]
    pub fn parsed(scientific_name: impl Into<String>) -> Self {
        let mut name = Self::new(scientific_name);
        name.normalize();
        name
    }

    fn derived(&self) -> ParsedName {
        self.scientific_name.as_deref().map(parse_name).unwrap_or_default()
    }

    /// Fills in whichever of genus, specific epithet and binomial name are
    /// missing. Fields that are already set are left untouched, so calling
    /// this repeatedly is a no-op.
    pub fn normalize(&mut self) {
        if self.scientific_name.is_none() {
            return;
        }
        if self.binomial_name.is_some() && self.genus.is_some() && self.specific_epithet.is_some()
        {
            return;
        }

        let parsed = self.derived();
        if self.specific_epithet.is_none() {
            self.specific_epithet = parsed.specific_epithet;
        }
        if self.binomial_name.is_none() {
            self.binomial_name = parsed.binomial_name;
        }
        if self.genus.is_none() {
            self.genus = parsed.genus;
        }
    }

    /// Stored genus, or the one derived from the scientific name.
    #[must_use]
    pub fn genus(&self) -> Option<String> {
        self.genus.clone().or_else(|| self.derived().genus)
    }

    /// Stored specific epithet, or the one derived from the scientific name.
    #[must_use]
    pub fn specific_epithet(&self) -> Option<String> {
        self.specific_epithet.clone().or_else(|| self.derived().specific_epithet)
    }

    /// Stored binomial name, or the one derived from the scientific name.
    #[must_use]
    pub fn binomial_name(&self) -> Option<String> {
        self.binomial_name.clone().or_else(|| self.derived().binomial_name)
    }
}
