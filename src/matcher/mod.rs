//! Pairwise matching of taxonomic units.
//!
//! Two units match when they share a binomial name, an external reference
//! or a specimen identifier. Rules are tried in that order and the first
//! one that succeeds supplies the match reason.

use tracing::trace;

use crate::model::TaxonomicUnit;

/// Outcome of comparing two taxonomic units.
///
/// Computed on demand and never stored on the units themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    /// Whether any rule matched.
    pub matched: bool,
    /// Explanation of the rule that matched; `None` when nothing matched.
    pub reason: Option<String>,
    /// First unit compared.
    pub unit_a: &'a TaxonomicUnit,
    /// Second unit compared.
    pub unit_b: &'a TaxonomicUnit,
}

/// Compares two taxonomic units.
///
/// Each rule looks for any pairing of entries across the two units, so the
/// outcome does not depend on which unit is passed first.
#[derive(Debug, Clone, Copy)]
pub struct TaxonomicUnitMatcher<'a> {
    unit_a: &'a TaxonomicUnit,
    unit_b: &'a TaxonomicUnit,
}

fn trimmed_non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

impl<'a> TaxonomicUnitMatcher<'a> {
    /// Prepares a comparison between two units.
    #[must_use]
    pub fn new(unit_a: &'a TaxonomicUnit, unit_b: &'a TaxonomicUnit) -> Self {
        Self { unit_a, unit_b }
    }

    /// Whether some scientific name on each side has the same binomial name.
    #[must_use]
    pub fn match_by_binomial_name(&self) -> bool {
        self.binomial_name_reason().is_some()
    }

    /// Whether some external reference on each side is the same URI,
    /// ignoring case.
    #[must_use]
    pub fn match_by_external_references(&self) -> bool {
        self.external_reference_reason().is_some()
    }

    /// Whether some specimen on each side has the same canonical
    /// occurrence identifier.
    #[must_use]
    pub fn match_by_specimen_identifier(&self) -> bool {
        self.specimen_identifier_reason().is_some()
    }

    /// Runs every rule in order, stopping at the first that matches.
    #[must_use]
    pub fn result(&self) -> MatchResult<'a> {
        let reason = self
            .binomial_name_reason()
            .or_else(|| self.external_reference_reason())
            .or_else(|| self.specimen_identifier_reason());

        if let Some(reason) = &reason {
            trace!(%reason, "taxonomic units matched");
        }

        MatchResult { matched: reason.is_some(), reason, unit_a: self.unit_a, unit_b: self.unit_b }
    }

    /// Shorthand for `result().matched`.
    #[must_use]
    pub fn matched(&self) -> bool {
        self.result().matched
    }

    fn binomial_name_reason(&self) -> Option<String> {
        for name_a in &self.unit_a.scientific_names {
            let Some(binomial_a) = name_a.binomial_name() else { continue };
            let Some(binomial_a) = trimmed_non_empty(&binomial_a) else { continue };

            for name_b in &self.unit_b.scientific_names {
                let Some(binomial_b) = name_b.binomial_name() else { continue };
                let Some(binomial_b) = trimmed_non_empty(&binomial_b) else { continue };
                if binomial_b == binomial_a {
                    return Some(format!(
                        "Scientific name '{}' and scientific name '{}' share the same binomial name",
                        name_a.scientific_name.as_deref().unwrap_or(binomial_a),
                        name_b.scientific_name.as_deref().unwrap_or(binomial_b),
                    ));
                }
            }
        }
        None
    }

    fn external_reference_reason(&self) -> Option<String> {
        for reference_a in &self.unit_a.external_references {
            let Some(trimmed_a) = trimmed_non_empty(reference_a) else { continue };

            for reference_b in &self.unit_b.external_references {
                let Some(trimmed_b) = trimmed_non_empty(reference_b) else { continue };
                if trimmed_a.to_lowercase() == trimmed_b.to_lowercase() {
                    return Some(format!(
                        "External reference <{trimmed_a}> is identical to external reference <{trimmed_b}>"
                    ));
                }
            }
        }
        None
    }

    fn specimen_identifier_reason(&self) -> Option<String> {
        for specimen_a in &self.unit_a.includes_specimens {
            let Some(id_a) = specimen_a.occurrence_id() else { continue };

            for specimen_b in &self.unit_b.includes_specimens {
                let Some(id_b) = specimen_b.occurrence_id() else { continue };
                if id_a == id_b {
                    return Some(format!(
                        "Specimen identifier '{id_a}' is identical to specimen identifier '{id_b}'"
                    ));
                }
            }
        }
        None
    }
}
