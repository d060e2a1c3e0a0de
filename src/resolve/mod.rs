//! Resolution of phyloreference specifiers against document phylogenies.
//!
//! For every phyloreference and phylogeny pair, records which nodes each
//! specifier matches and which nodes the curator expects the
//! phyloreference to resolve to.

use crate::model::{PhyxDocument, Phylogeny, Phyloreference, SpecifierRole};
use crate::phylogeny::{validate_newick, ParsedPhylogeny, PhylogenyError};

/// Nodes matched by a single specifier.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecifierResolution {
    /// Display label of the specifier.
    pub specifier_label: String,
    /// Whether the specifier is internal or external.
    pub role: SpecifierRole,
    /// Labels of matching nodes, in tree order.
    pub matched_nodes: Vec<String>,
}

/// Resolution of one phyloreference on one phylogeny.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionReport {
    /// Display label of the phyloreference.
    pub phyloref_label: String,
    /// Display label of the phylogeny.
    pub phylogeny_label: String,
    /// Nodes annotated as the expected resolution.
    pub expected_nodes: Vec<String>,
    /// Per-specifier matches, internal specifiers first.
    pub specifiers: Vec<SpecifierResolution>,
    /// Problems with the phylogeny's Newick string; when non-empty no
    /// matching was attempted.
    pub errors: Vec<PhylogenyError>,
}

impl ResolutionReport {
    /// Returns `true` if every specifier matched at least one node.
    #[must_use]
    pub fn fully_matched(&self) -> bool {
        self.errors.is_empty() && self.specifiers.iter().all(|s| !s.matched_nodes.is_empty())
    }

    /// Labels of specifiers that matched no node.
    #[must_use]
    pub fn unmatched(&self) -> Vec<&str> {
        self.specifiers
            .iter()
            .filter(|s| s.matched_nodes.is_empty())
            .map(|s| s.specifier_label.as_str())
            .collect()
    }
}

fn phylogeny_label(phylogeny: &Phylogeny, position: usize) -> String {
    phylogeny.label.clone().unwrap_or_else(|| format!("Phylogeny {}", position + 1))
}

/// Resolves one phyloreference on one phylogeny.
///
/// `position` is the phylogeny's index in its document, used to label
/// phylogenies that have no label of their own.
#[must_use]
pub fn resolve(
    phyloref: &Phyloreference,
    phylogeny: &Phylogeny,
    position: usize,
) -> ResolutionReport {
    let phyloref_label =
        phyloref.label.clone().unwrap_or_else(|| "Unnamed phyloreference".to_string());
    let mut report = ResolutionReport {
        phyloref_label,
        phylogeny_label: phylogeny_label(phylogeny, position),
        expected_nodes: Vec::new(),
        specifiers: Vec::new(),
        errors: Vec::new(),
    };

    let Ok(parsed) = ParsedPhylogeny::parse(phylogeny) else {
        report.errors = validate_newick(&phylogeny.newick);
        return report;
    };

    report.expected_nodes = parsed.expected_node_labels(phyloref);
    report.specifiers = phyloref
        .specifiers()
        .map(|specifier| SpecifierResolution {
            specifier_label: specifier.label(),
            role: phyloref.specifier_role(specifier),
            matched_nodes: parsed.node_labels_matched_by_specifier(specifier),
        })
        .collect();
    report
}

/// Resolves every phyloreference in a document on every phylogeny.
#[must_use]
pub fn resolve_document(document: &PhyxDocument) -> Vec<ResolutionReport> {
    document
        .phylorefs
        .iter()
        .flat_map(|phyloref| {
            document
                .phylogenies
                .iter()
                .enumerate()
                .map(move |(position, phylogeny)| resolve(phyloref, phylogeny, position))
        })
        .collect()
}

/// Formats resolution reports as human-readable text.
#[must_use]
pub fn format_reports(reports: &[ResolutionReport]) -> String {
    let mut lines = Vec::new();
    for report in reports {
        lines.push(format!("Phyloreference: {} on {}", report.phyloref_label, report.phylogeny_label));

        if !report.errors.is_empty() {
            for error in &report.errors {
                match &error.message {
                    Some(message) => lines.push(format!("  [ERROR] {}: {message}", error.title)),
                    None => lines.push(format!("  [ERROR] {}", error.title)),
                }
            }
            lines.push(String::new());
            continue;
        }

        let expected = if report.expected_nodes.is_empty() {
            "(none)".to_string()
        } else {
            report.expected_nodes.join(", ")
        };
        lines.push(format!("  expected: {expected}"));

        for specifier in &report.specifiers {
            let status = if specifier.matched_nodes.is_empty() { "MISS" } else { "HIT " };
            let nodes = if specifier.matched_nodes.is_empty() {
                "no matching nodes".to_string()
            } else {
                specifier.matched_nodes.join(", ")
            };
            lines.push(format!(
                "  [{status}] {} {}: {nodes}",
                specifier.role, specifier.specifier_label
            ));
        }
        lines.push(String::new());
    }

    let matched = reports.iter().filter(|r| r.fully_matched()).count();
    lines.push(format!("{matched}/{} resolution(s) fully matched.", reports.len()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeProperties, Specifier, TaxonomicUnit};

    fn specifier(name: &str) -> Specifier {
        Specifier::for_unit(TaxonomicUnit::from_scientific_name(name))
    }

    fn sample_document() -> PhyxDocument {
        let mut phylogeny =
            Phylogeny::from_newick("(('Rana boylii', 'Rana draytonii')Ranidae, 'Bufo bufo');");
        phylogeny.additional_node_properties.insert(
            "Ranidae".to_string(),
            NodeProperties {
                expected_phyloreference_named: Some("Ranidae".to_string()),
                ..NodeProperties::default()
            },
        );

        PhyxDocument {
            phylorefs: vec![Phyloreference {
                label: Some("Ranidae".to_string()),
                internal_specifiers: vec![specifier("Rana boylii"), specifier("Rana draytonii")],
                external_specifiers: vec![specifier("Hyla arborea")],
                ..Phyloreference::default()
            }],
            phylogenies: vec![phylogeny, Phylogeny::from_newick("(A, B));")],
            ..PhyxDocument::default()
        }
    }

    #[test]
    fn resolves_each_phyloref_on_each_phylogeny() {
        let reports = resolve_document(&sample_document());
        assert_eq!(reports.len(), 2);

        let first = &reports[0];
        assert_eq!(first.phyloref_label, "Ranidae");
        assert_eq!(first.phylogeny_label, "Phylogeny 1");
        assert_eq!(first.expected_nodes, vec!["Ranidae".to_string()]);
        assert_eq!(first.specifiers.len(), 3);
        assert_eq!(first.specifiers[0].role, SpecifierRole::Internal);
        assert_eq!(first.specifiers[0].matched_nodes, vec!["Rana boylii".to_string()]);
        assert_eq!(first.specifiers[2].role, SpecifierRole::External);
        assert!(!first.fully_matched());
        assert_eq!(first.unmatched(), vec!["Hyla arborea"]);
    }

    #[test]
    fn malformed_phylogeny_reports_errors() {
        let reports = resolve_document(&sample_document());
        let second = &reports[1];

        assert_eq!(second.errors.len(), 2);
        assert!(second.specifiers.is_empty());
        assert!(!second.fully_matched());
    }

    #[test]
    fn formats_report_text() {
        let text = format_reports(&resolve_document(&sample_document()));

        assert!(text.contains("Phyloreference: Ranidae on Phylogeny 1"));
        assert!(text.contains("expected: Ranidae"));
        assert!(text.contains("[HIT ] Internal Rana boylii: Rana boylii"));
        assert!(text.contains("[MISS] External Hyla arborea: no matching nodes"));
        assert!(text.contains("[ERROR] Unbalanced parentheses in Newick string"));
        assert!(text.ends_with("0/2 resolution(s) fully matched."));
    }
}
