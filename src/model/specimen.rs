//! Specimen records and their canonical occurrence identifier.
//!
//! Specimens arrive either as Darwin Core triples (institution code,
//! collection code, catalog number) or as a single occurrence identifier.
//! Both forms are reconciled through the `urn:catalog:` URN:
//!
//! ```text
//! urn:catalog:<institutionCode>:<collectionCode>:<catalogNumber>
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::document::ExtraFields;

/// Prefix of the canonical occurrence identifier.
pub const CATALOG_URN_PREFIX: &str = "urn:catalog:";

static COMPONENT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*:\s*").expect("separator pattern is valid"));

/// A specimen identified by catalog fields and/or an occurrence identifier.
///
/// Deserializing or constructing a specimen decomposes a bare
/// `urn:catalog:` occurrence identifier into catalog fields when none of
/// those fields were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SpecimenFields")]
pub struct Specimen {
    /// Catalog number within the collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_number: Option<String>,
    /// Code of the holding institution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_code: Option<String>,
    /// Code of the collection within the institution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_code: Option<String>,
    /// Occurrence identifier as entered.
    #[serde(rename = "occurrenceID", skip_serializing_if = "Option::is_none")]
    pub occurrence_id: Option<String>,
    /// Unmodelled keys.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Raw specimen fields as they appear in a document.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpecimenFields {
    #[serde(default)]
    catalog_number: Option<String>,
    #[serde(default)]
    institution_code: Option<String>,
    #[serde(default)]
    collection_code: Option<String>,
    #[serde(default, rename = "occurrenceID")]
    occurrence_id: Option<String>,
    #[serde(flatten)]
    extra: ExtraFields,
}

impl From<SpecimenFields> for Specimen {
    fn from(fields: SpecimenFields) -> Self {
        let mut specimen = Self {
            catalog_number: fields.catalog_number,
            institution_code: fields.institution_code,
            collection_code: fields.collection_code,
            occurrence_id: fields.occurrence_id,
            extra: fields.extra,
        };
        specimen.decompose();
        specimen
    }
}

/// Catalog fields recovered from an occurrence identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogParts {
    /// Institution code, when the identifier carried one.
    pub institution_code: Option<String>,
    /// Collection code, when the identifier carried one.
    pub collection_code: Option<String>,
    /// Catalog number.
    pub catalog_number: Option<String>,
}

fn non_empty(component: &str) -> Option<String> {
    let trimmed = component.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Other URN namespaces and hierarchical URLs keep their scheme segment,
/// which would otherwise be mistaken for an institution code.
fn is_foreign_uri(identifier: &str) -> bool {
    identifier.contains("://")
        || identifier.get(..4).is_some_and(|scheme| scheme.eq_ignore_ascii_case("urn:"))
}

/// Splits an occurrence identifier into catalog fields.
///
/// Accepts one, two or three colon-separated components after an optional
/// `urn:catalog:` prefix. Anything else (LSIDs, URLs, empty strings) is
/// rejected with `None`.
#[must_use]
pub fn decompose_occurrence_id(occurrence_id: &str) -> Option<CatalogParts> {
    let trimmed = occurrence_id.trim();
    let remainder = match trimmed.strip_prefix(CATALOG_URN_PREFIX) {
        Some(remainder) => remainder,
        None if is_foreign_uri(trimmed) => return None,
        None => trimmed,
    };
    if remainder.trim().is_empty() {
        return None;
    }

    let components: Vec<&str> = COMPONENT_SEPARATOR.split(remainder).collect();
    match components.as_slice() {
        [catalog] => {
            Some(CatalogParts { catalog_number: non_empty(catalog), ..CatalogParts::default() })
        }
        [institution, catalog] => Some(CatalogParts {
            institution_code: non_empty(institution),
            collection_code: None,
            catalog_number: non_empty(catalog),
        }),
        [institution, collection, catalog] => Some(CatalogParts {
            institution_code: non_empty(institution),
            collection_code: non_empty(collection),
            catalog_number: non_empty(catalog),
        }),
        _ => None,
    }
}

impl Specimen {
    /// Creates a specimen from an occurrence identifier, decomposing it
    /// into catalog fields when it has a recognised shape.
    #[must_use]
    pub fn from_occurrence_id(occurrence_id: impl Into<String>) -> Self {
        let mut specimen = Self { occurrence_id: Some(occurrence_id.into()), ..Self::default() };
        specimen.decompose();
        specimen
    }

    /// Creates a specimen from Darwin Core catalog fields.
    #[must_use]
    pub fn from_catalog(
        institution_code: Option<&str>,
        collection_code: Option<&str>,
        catalog_number: &str,
    ) -> Self {
        Self {
            catalog_number: Some(catalog_number.to_string()),
            institution_code: institution_code.map(str::to_string),
            collection_code: collection_code.map(str::to_string),
            ..Self::default()
        }
    }

    fn has_catalog_fields(&self) -> bool {
        self.catalog_number.is_some()
            || self.institution_code.is_some()
            || self.collection_code.is_some()
    }

    /// Populates catalog fields from the occurrence identifier.
    ///
    /// Does nothing when any catalog field is already present or when the
    /// identifier cannot be decomposed.
    pub fn decompose(&mut self) {
        if self.has_catalog_fields() {
            return;
        }
        let Some(parts) = self.occurrence_id.as_deref().and_then(decompose_occurrence_id) else {
            return;
        };
        self.institution_code = parts.institution_code;
        self.collection_code = parts.collection_code;
        self.catalog_number = parts.catalog_number;
    }

    /// Canonical occurrence identifier.
    ///
    /// Returns the stored identifier (trimmed) when non-empty, otherwise a
    /// `urn:catalog:` URN synthesized from the catalog fields. Absent
    /// institution or collection codes become empty segments. Returns
    /// `None` when there is no catalog number to build from.
    #[must_use]
    pub fn occurrence_id(&self) -> Option<String> {
        if let Some(stored) = self.occurrence_id.as_deref().map(str::trim) {
            if !stored.is_empty() {
                return Some(stored.to_string());
            }
        }

        let catalog_number = self.catalog_number.as_deref()?;
        let segment = |value: &Option<String>| value.as_deref().map_or("", str::trim).to_string();
        Some(format!(
            "{CATALOG_URN_PREFIX}{}:{}:{}",
            segment(&self.institution_code),
            segment(&self.collection_code),
            catalog_number.trim()
        ))
    }
}
