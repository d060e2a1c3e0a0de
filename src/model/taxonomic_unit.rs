//! Taxonomic units and their display labels.

use serde::{Deserialize, Serialize};

use super::document::ExtraFields;
use super::scientific_name::ScientificName;
use super::specimen::Specimen;

/// Label used when a taxonomic unit carries nothing to describe.
pub const UNNAMED_TAXONOMIC_UNIT: &str = "Unnamed taxonomic unit";

/// Separator between label fragments.
pub const LABEL_SEPARATOR: &str = " or ";

/// A bundle of identifiers that together denote one biological entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomicUnit {
    /// Explicit label; wins over everything else.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-text description; used when no label is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Scientific names denoting this unit.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scientific_names: Vec<ScientificName>,
    /// Specimens included in this unit.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes_specimens: Vec<Specimen>,
    /// External reference URIs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_references: Vec<String>,
    /// Unmodelled keys.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl TaxonomicUnit {
    /// A unit identified by a single scientific name.
    #[must_use]
    pub fn from_scientific_name(name: impl Into<String>) -> Self {
        Self { scientific_names: vec![ScientificName::parsed(name)], ..Self::default() }
    }

    /// A unit identified by a single specimen.
    #[must_use]
    pub fn from_specimen(specimen: Specimen) -> Self {
        Self { includes_specimens: vec![specimen], ..Self::default() }
    }

    /// A unit identified by a single external reference.
    #[must_use]
    pub fn from_external_reference(reference: impl Into<String>) -> Self {
        Self { external_references: vec![reference.into()], ..Self::default() }
    }

    /// Fills in derived name fields on every scientific name.
    pub fn normalize(&mut self) {
        for name in &mut self.scientific_names {
            name.normalize();
        }
        for specimen in &mut self.includes_specimens {
            specimen.decompose();
        }
    }

    /// Label fragments in group order: names, then specimens, then
    /// external references.
    #[must_use]
    pub fn label_fragments(&self) -> Vec<String> {
        let names = self.scientific_names.iter().filter_map(|n| n.scientific_name.clone());
        let specimens = self
            .includes_specimens
            .iter()
            .filter_map(Specimen::occurrence_id)
            .map(|id| format!("Specimen {id}"));
        let references = self.external_references.iter().map(|r| format!("<{r}>"));

        names.chain(specimens).chain(references).collect()
    }

    /// Label synthesized from the identifiers alone, ignoring any explicit
    /// label or description. `None` when there are no identifiers.
    #[must_use]
    pub fn composite_label(&self) -> Option<String> {
        let fragments = self.label_fragments();
        (!fragments.is_empty()).then(|| fragments.join(LABEL_SEPARATOR))
    }

    /// Display label: explicit label, then description, then the composite.
    #[must_use]
    pub fn label(&self) -> String {
        self.label
            .clone()
            .or_else(|| self.description.clone())
            .or_else(|| self.composite_label())
            .unwrap_or_else(|| UNNAMED_TAXONOMIC_UNIT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_label_wins() {
        let unit = TaxonomicUnit {
            label: Some("Frogs".to_string()),
            description: Some("All frogs".to_string()),
            ..TaxonomicUnit::from_scientific_name("Rana boylii")
        };
        assert_eq!(unit.label(), "Frogs");
    }

    #[test]
    fn description_used_without_label() {
        let unit = TaxonomicUnit {
            description: Some("All frogs".to_string()),
            ..TaxonomicUnit::from_scientific_name("Rana boylii")
        };
        assert_eq!(unit.label(), "All frogs");
    }

    #[test]
    fn composite_joins_groups_in_order() {
        let unit = TaxonomicUnit {
            scientific_names: vec![
                ScientificName::new("Rana boylii Baird, 1854"),
                ScientificName::new("Rana draytonii"),
            ],
            includes_specimens: vec![Specimen::from_catalog(Some("MVZ"), Some("Herp"), "1")],
            external_references: vec!["http://example.org/rana".to_string()],
            ..TaxonomicUnit::default()
        };

        assert_eq!(
            unit.label(),
            "Rana boylii Baird, 1854 or Rana draytonii or Specimen urn:catalog:MVZ:Herp:1 or <http://example.org/rana>"
        );
    }

    #[test]
    fn empty_unit_is_unnamed() {
        assert_eq!(TaxonomicUnit::default().label(), UNNAMED_TAXONOMIC_UNIT);
        assert_eq!(TaxonomicUnit::default().composite_label(), None);
    }

    #[test]
    fn specimens_without_identifiers_are_skipped() {
        let unit = TaxonomicUnit::from_specimen(Specimen::default());
        assert_eq!(unit.label(), UNNAMED_TAXONOMIC_UNIT);
    }

    #[test]
    fn deserializes_camel_case_document() {
        let unit: TaxonomicUnit = serde_json::from_str(
            r#"{
                "scientificNames": [{"scientificName": "Rana boylii"}],
                "includesSpecimens": [{"occurrenceID": "MVZ:Herp:1"}],
                "externalReferences": ["http://example.org/rana"]
            }"#,
        )
        .unwrap();

        assert_eq!(unit.scientific_names.len(), 1);
        assert_eq!(unit.includes_specimens[0].catalog_number.as_deref(), Some("1"));
        assert_eq!(unit.external_references, vec!["http://example.org/rana".to_string()]);
    }
}
