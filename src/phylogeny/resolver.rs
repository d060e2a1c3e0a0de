//! Node labels, their taxonomic units, and specifier matching on a tree.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::newick::{NewickError, NewickTree};
use crate::matcher::TaxonomicUnitMatcher;
use crate::model::{Phylogeny, Phyloreference, ScientificName, Specifier, TaxonomicUnit};

/// A label starting with a capitalized genus and a lowercase epithet.
static BINOMIAL_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]+) ([a-z-]+)").expect("binomial label pattern is valid")
});

/// Which nodes to list labels for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeScope {
    /// Every labeled node.
    #[default]
    All,
    /// Nodes with at least one child.
    Internal,
    /// Nodes with no children.
    Terminal,
}

impl NodeScope {
    /// Name used on the command line and in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Internal => "internal",
            Self::Terminal => "terminal",
        }
    }
}

impl fmt::Display for NodeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeScope {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" | "both" => Ok(Self::All),
            "internal" => Ok(Self::Internal),
            "terminal" => Ok(Self::Terminal),
            other => Err(format!("Unknown node scope '{other}'")),
        }
    }
}

/// Taxonomic unit guessed from a node label that reads like a species name.
///
/// The whole label becomes the scientific name; genus and epithet come
/// from the leading `Genus epithet` pair only, so trailing specimen codes
/// do not leak into the binomial name.
#[must_use]
pub fn taxonomic_unit_from_label(label: &str) -> Option<TaxonomicUnit> {
    let captures = BINOMIAL_LABEL.captures(label)?;
    let genus = captures.get(1)?.as_str();
    let epithet = captures.get(2)?.as_str();

    let name = ScientificName {
        scientific_name: Some(label.to_string()),
        binomial_name: Some(format!("{genus} {epithet}")),
        genus: Some(genus.to_string()),
        specific_epithet: Some(epithet.to_string()),
        ..ScientificName::default()
    };
    Some(TaxonomicUnit { scientific_names: vec![name], ..TaxonomicUnit::default() })
}

/// A phylogeny record together with its parsed tree.
#[derive(Debug, Clone)]
pub struct ParsedPhylogeny<'a> {
    phylogeny: &'a Phylogeny,
    tree: NewickTree,
}

impl<'a> ParsedPhylogeny<'a> {
    /// Parses the phylogeny's Newick string.
    ///
    /// # Errors
    ///
    /// Returns the parser's error when the Newick string is malformed.
    pub fn parse(phylogeny: &'a Phylogeny) -> Result<Self, NewickError> {
        let tree = NewickTree::parse(&phylogeny.newick)?;
        Ok(Self { phylogeny, tree })
    }

    /// The parsed tree.
    #[must_use]
    pub fn tree(&self) -> &NewickTree {
        &self.tree
    }

    /// The underlying phylogeny record.
    #[must_use]
    pub fn phylogeny(&self) -> &'a Phylogeny {
        self.phylogeny
    }

    /// Labels of nodes in `scope`, in pre-order without duplicates.
    #[must_use]
    pub fn node_labels(&self, scope: NodeScope) -> Vec<String> {
        node_labels(&self.tree, scope)
    }

    /// Taxonomic units a node label stands for.
    ///
    /// Units attached as node metadata are returned as-is. Otherwise a
    /// label that reads like a species name yields one unit; anything else
    /// yields none.
    #[must_use]
    pub fn taxonomic_units_for_node_label(&self, label: &str) -> Vec<TaxonomicUnit> {
        if let Some(units) = self
            .phylogeny
            .node_properties(label)
            .and_then(|props| props.represents_taxonomic_units.as_ref())
        {
            return units.clone();
        }
        taxonomic_unit_from_label(label).into_iter().collect()
    }

    /// Labels of nodes with a taxonomic unit matching any unit the
    /// specifier references.
    #[must_use]
    pub fn node_labels_matched_by_specifier(&self, specifier: &Specifier) -> Vec<String> {
        let mut matched = Vec::new();
        for label in self.node_labels(NodeScope::All) {
            let node_units = self.taxonomic_units_for_node_label(&label);
            let is_match = node_units.iter().any(|node_unit| {
                specifier
                    .references_taxonomic_units
                    .iter()
                    .any(|unit| TaxonomicUnitMatcher::new(unit, node_unit).matched())
            });
            if is_match {
                debug!(node = %label, specifier = %specifier.label(), "specifier matched node");
                matched.push(label);
            }
        }
        matched
    }

    /// Labels of nodes annotated as the expected resolution of `phyloref`.
    #[must_use]
    pub fn expected_node_labels(&self, phyloref: &Phyloreference) -> Vec<String> {
        let Some(phyloref_label) = phyloref.label.as_deref() else {
            return Vec::new();
        };
        self.node_labels(NodeScope::All)
            .into_iter()
            .filter(|label| {
                self.phylogeny
                    .node_properties(label)
                    .and_then(|props| props.expected_phyloreference_named.as_deref())
                    == Some(phyloref_label)
            })
            .collect()
    }
}

/// Labels of nodes in `scope`, in pre-order without duplicates.
///
/// Unlabeled nodes other than the root are skipped.
#[must_use]
pub fn node_labels(tree: &NewickTree, scope: NodeScope) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for index in tree.preorder() {
        let in_scope = match scope {
            NodeScope::All => true,
            NodeScope::Internal => tree.node(index).is_internal(),
            NodeScope::Terminal => !tree.node(index).is_internal(),
        };
        if !in_scope {
            continue;
        }
        if let Some(label) = tree.node_label(index) {
            if !labels.iter().any(|existing| existing == label) {
                labels.push(label.to_string());
            }
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::model::{NodeProperties, Specimen};

    const TREE: &str = "(A, (B, (C, D))E, F, (G, (H, I, J)K, L)M, N)O";

    fn label_set(labels: Vec<String>) -> BTreeSet<String> {
        labels.into_iter().collect()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn lists_labels_by_scope() {
        let phylogeny = Phylogeny::from_newick(TREE);
        let parsed = ParsedPhylogeny::parse(&phylogeny).unwrap();

        let internal = label_set(parsed.node_labels(NodeScope::Internal));
        let terminal = label_set(parsed.node_labels(NodeScope::Terminal));
        let all = label_set(parsed.node_labels(NodeScope::All));

        assert_eq!(internal, set(&["E", "K", "M", "O"]));
        assert_eq!(terminal, set(&["A", "B", "C", "D", "F", "G", "H", "I", "J", "L", "N"]));
        assert_eq!(all, internal.union(&terminal).cloned().collect::<BTreeSet<_>>());
        assert_eq!(all.len(), 15);
    }

    #[test]
    fn unlabeled_root_is_called_root() {
        let phylogeny = Phylogeny::from_newick("(A, B);");
        let parsed = ParsedPhylogeny::parse(&phylogeny).unwrap();
        assert_eq!(parsed.node_labels(NodeScope::Internal), vec!["root".to_string()]);
    }

    #[test]
    fn parses_scope_names() {
        assert_eq!("internal".parse::<NodeScope>().unwrap(), NodeScope::Internal);
        assert_eq!("terminal".parse::<NodeScope>().unwrap(), NodeScope::Terminal);
        assert_eq!("all".parse::<NodeScope>().unwrap(), NodeScope::All);
        assert!("leaves".parse::<NodeScope>().is_err());
    }

    #[test]
    fn derives_unit_from_species_label() {
        let unit = taxonomic_unit_from_label("Rana boylii MVZ 12345").unwrap();
        let name = &unit.scientific_names[0];

        assert_eq!(name.scientific_name.as_deref(), Some("Rana boylii MVZ 12345"));
        assert_eq!(name.genus.as_deref(), Some("Rana"));
        assert_eq!(name.specific_epithet.as_deref(), Some("boylii"));
        assert_eq!(name.binomial_name.as_deref(), Some("Rana boylii"));
    }

    #[test]
    fn non_species_labels_have_no_units() {
        assert!(taxonomic_unit_from_label("Ranidae").is_none());
        assert!(taxonomic_unit_from_label("rana boylii").is_none());
        assert!(taxonomic_unit_from_label("node 12").is_none());
    }

    #[test]
    fn metadata_overrides_label_parsing() {
        let mut phylogeny = Phylogeny::from_newick("('Rana boylii', Bufo);");
        let attached = TaxonomicUnit::from_external_reference("http://example.org/rana");
        phylogeny.additional_node_properties.insert(
            "Rana boylii".to_string(),
            NodeProperties {
                represents_taxonomic_units: Some(vec![attached.clone()]),
                ..NodeProperties::default()
            },
        );
        let parsed = ParsedPhylogeny::parse(&phylogeny).unwrap();

        assert_eq!(parsed.taxonomic_units_for_node_label("Rana boylii"), vec![attached]);
        assert!(parsed.taxonomic_units_for_node_label("Bufo").is_empty());
    }

    #[test]
    fn finds_nodes_matched_by_specifier() {
        let mut phylogeny = Phylogeny::from_newick(
            "(('Rana boylii MVZ 1', 'Rana draytonii'), (Bufo_bufo, Specimen7)Bufonidae);",
        );
        phylogeny.additional_node_properties.insert(
            "Specimen7".to_string(),
            NodeProperties {
                represents_taxonomic_units: Some(vec![TaxonomicUnit::from_specimen(
                    Specimen::from_catalog(Some("MVZ"), None, "7"),
                )]),
                ..NodeProperties::default()
            },
        );
        let parsed = ParsedPhylogeny::parse(&phylogeny).unwrap();

        let by_name = Specifier::for_unit(TaxonomicUnit::from_scientific_name("Rana boylii"));
        assert_eq!(parsed.node_labels_matched_by_specifier(&by_name), vec!["Rana boylii MVZ 1"]);

        let by_specimen = Specifier::for_unit(TaxonomicUnit::from_specimen(
            Specimen::from_occurrence_id("urn:catalog:MVZ::7"),
        ));
        assert_eq!(parsed.node_labels_matched_by_specifier(&by_specimen), vec!["Specimen7"]);

        let either = Specifier {
            references_taxonomic_units: vec![
                TaxonomicUnit::from_scientific_name("Bufo bufo"),
                TaxonomicUnit::from_scientific_name("Rana draytonii"),
            ],
            ..Specifier::default()
        };
        assert_eq!(
            parsed.node_labels_matched_by_specifier(&either),
            vec!["Rana draytonii", "Bufo bufo"]
        );

        let nothing = Specifier::for_unit(TaxonomicUnit::from_scientific_name("Hyla arborea"));
        assert!(parsed.node_labels_matched_by_specifier(&nothing).is_empty());
    }

    #[test]
    fn finds_expected_node_labels() {
        let mut phylogeny = Phylogeny::from_newick("((A, B)Ranidae, C)Anura;");
        phylogeny.additional_node_properties.insert(
            "Ranidae".to_string(),
            NodeProperties {
                expected_phyloreference_named: Some("Ranidae".to_string()),
                ..NodeProperties::default()
            },
        );
        let parsed = ParsedPhylogeny::parse(&phylogeny).unwrap();

        assert_eq!(
            parsed.expected_node_labels(&Phyloreference::named("Ranidae")),
            vec!["Ranidae".to_string()]
        );
        assert!(parsed.expected_node_labels(&Phyloreference::named("Anura")).is_empty());
        assert!(parsed.expected_node_labels(&Phyloreference::default()).is_empty());
    }
}
