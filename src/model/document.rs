//! Curation documents bundling phyloreferences with phylogenies.

use serde::{Deserialize, Serialize};

use super::phylogeny::Phylogeny;
use super::phyloreference::Phyloreference;

/// Keys a record does not model, kept so that rewriting a document leaves
/// them in place.
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;

/// A curation document: phyloreferences and the phylogenies they are
/// tested against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhyxDocument {
    /// Phyloreferences being curated.
    #[serde(default)]
    pub phylorefs: Vec<Phyloreference>,
    /// Phylogenies to resolve phyloreferences on.
    #[serde(default)]
    pub phylogenies: Vec<Phylogeny>,
    /// Unmodelled keys such as `@context` or `title`.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl PhyxDocument {
    /// Parses a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or does not match the
    /// document shape.
    pub fn from_json(contents: &str) -> Result<Self, String> {
        serde_json::from_str(contents).map_err(|e| format!("Failed to parse JSON document: {e}"))
    }

    /// Parses a document from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or does not match the
    /// document shape.
    pub fn from_yaml(contents: &str) -> Result<Self, String> {
        serde_yaml::from_str(contents).map_err(|e| format!("Failed to parse YAML document: {e}"))
    }

    /// Fills in derived scientific name fields throughout the document.
    pub fn normalize(&mut self) {
        let specifier_units = self
            .phylorefs
            .iter_mut()
            .flat_map(|p| p.internal_specifiers.iter_mut().chain(p.external_specifiers.iter_mut()))
            .flat_map(|s| s.references_taxonomic_units.iter_mut());
        for unit in specifier_units {
            unit.normalize();
        }

        let node_units = self
            .phylogenies
            .iter_mut()
            .flat_map(|p| p.additional_node_properties.values_mut())
            .filter_map(|props| props.represents_taxonomic_units.as_mut())
            .flatten();
        for unit in node_units {
            unit.normalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"{
        "phylorefs": [{
            "label": "Ranidae",
            "internalSpecifiers": [
                {"referencesTaxonomicUnits": [{"scientificNames": [{"scientificName": "Rana boylii"}]}]}
            ]
        }],
        "phylogenies": [{
            "newick": "((Rana boylii, Rana draytonii)Ranidae, Bufo bufo);",
            "additionalNodeProperties": {
                "Ranidae": {"expectedPhyloreferenceNamed": "Ranidae"}
            }
        }]
    }"#;

    #[test]
    fn loads_json_document() {
        let doc = PhyxDocument::from_json(DOCUMENT).unwrap();
        assert_eq!(doc.phylorefs.len(), 1);
        assert_eq!(doc.phylogenies.len(), 1);
        assert_eq!(
            doc.phylogenies[0]
                .node_properties("Ranidae")
                .and_then(|p| p.expected_phyloreference_named.as_deref()),
            Some("Ranidae")
        );
    }

    #[test]
    fn loads_yaml_document() {
        let yaml = "phylorefs:\n  - label: Empty\nphylogenies:\n  - newick: '(A, B);'\n";
        let doc = PhyxDocument::from_yaml(yaml).unwrap();
        assert_eq!(doc.phylorefs[0].label.as_deref(), Some("Empty"));
        assert_eq!(doc.phylogenies[0].newick, "(A, B);");
    }

    #[test]
    fn normalize_derives_binomials() {
        let mut doc = PhyxDocument::from_json(DOCUMENT).unwrap();
        doc.normalize();

        let name = &doc.phylorefs[0].internal_specifiers[0].references_taxonomic_units[0]
            .scientific_names[0];
        assert_eq!(name.binomial_name.as_deref(), Some("Rana boylii"));
        assert_eq!(name.genus.as_deref(), Some("Rana"));
    }

    #[test]
    fn unknown_keys_survive_a_rewrite() {
        let json = r#"{
            "@context": "http://example.org/context.json",
            "title": "Frogs",
            "phylorefs": [{
                "label": "Ranidae",
                "curatorComments": "keep me",
                "internalSpecifiers": [{
                    "@type": "Specifier",
                    "referencesTaxonomicUnits": [{
                        "nameString": "Rana boylii",
                        "scientificNames": [{"scientificName": "Rana boylii", "nomenclaturalCode": 1}],
                        "includesSpecimens": [{"occurrenceID": "MVZ:1", "basisOfRecord": "Preserved"}]
                    }]
                }]
            }],
            "phylogenies": [{
                "newick": "(A, B);",
                "source": "doi:10.1/xyz",
                "additionalNodeProperties": {"A": {"note": "tip"}}
            }]
        }"#;
        let mut doc = PhyxDocument::from_json(json).unwrap();
        doc.normalize();

        let saved: serde_json::Value = serde_json::to_value(&doc).unwrap();
        assert_eq!(saved["@context"], "http://example.org/context.json");
        assert_eq!(saved["title"], "Frogs");
        let phyloref = &saved["phylorefs"][0];
        assert_eq!(phyloref["curatorComments"], "keep me");
        let specifier = &phyloref["internalSpecifiers"][0];
        assert_eq!(specifier["@type"], "Specifier");
        let unit = &specifier["referencesTaxonomicUnits"][0];
        assert_eq!(unit["nameString"], "Rana boylii");
        assert_eq!(unit["scientificNames"][0]["nomenclaturalCode"], 1);
        assert_eq!(unit["includesSpecimens"][0]["basisOfRecord"], "Preserved");
        assert_eq!(unit["includesSpecimens"][0]["institutionCode"], "MVZ");
        let phylogeny = &saved["phylogenies"][0];
        assert_eq!(phylogeny["source"], "doi:10.1/xyz");
        assert_eq!(phylogeny["additionalNodeProperties"]["A"]["note"], "tip");

        let yaml = serde_yaml::to_string(&doc).unwrap();
        assert_eq!(PhyxDocument::from_yaml(&yaml).unwrap(), doc);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = PhyxDocument::from_json("{not json").unwrap_err();
        assert!(err.contains("Failed to parse JSON document"));
    }
}
