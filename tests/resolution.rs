//! End-to-end resolution of a curation document through the library API.

use std::path::Path;

use phylocurate::adapters::fixed::FixedClock;
use phylocurate::model::{PhylorefStatus, PhyxDocument, Specifier, SpecifierRole};
use phylocurate::phylogeny::{ParsedPhylogeny, NodeScope};
use phylocurate::resolve::resolve_document;
use phylocurate::CurationError;

fn load_fixture() -> PhyxDocument {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/ranidae.json");
    let contents = std::fs::read_to_string(path).expect("fixture should exist");
    let mut document = PhyxDocument::from_json(&contents).expect("fixture should parse");
    document.normalize();
    document
}

#[test]
fn each_identifier_kind_resolves_to_its_node() {
    let document = load_fixture();
    let reports = resolve_document(&document);

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.phylogeny_label, "Frogs and toads");
    assert_eq!(report.expected_nodes, vec!["Ranidae".to_string()]);

    let matched: Vec<(SpecifierRole, Vec<String>)> =
        report.specifiers.iter().map(|s| (s.role, s.matched_nodes.clone())).collect();
    assert_eq!(
        matched,
        vec![
            (SpecifierRole::Internal, vec!["Rana boylii".to_string()]),
            (SpecifierRole::Internal, vec!["Draytonii specimen".to_string()]),
            (SpecifierRole::External, vec!["Bufo".to_string()]),
        ]
    );
    assert!(report.fully_matched());
}

#[test]
fn specifier_labels_come_from_their_units() {
    let document = load_fixture();
    let labels: Vec<String> = document.phylorefs[0].specifiers().map(Specifier::label).collect();

    assert_eq!(
        labels,
        vec![
            "Rana boylii Baird, 1854".to_string(),
            "Specimen urn:catalog:MVZ:Herp:148929".to_string(),
            "<http://example.org/taxa/bufo-bufo>".to_string(),
        ]
    );
}

#[test]
fn moving_a_specifier_changes_its_reported_role() {
    let mut document = load_fixture();
    let phyloref = &mut document.phylorefs[0];
    let toad = phyloref.external_specifiers[0].clone();

    phyloref.set_specifier_type(toad.clone(), "Internal");
    phyloref.set_specifier_type(toad.clone(), "Internal");

    assert_eq!(phyloref.internal_specifiers.len(), 3);
    assert_eq!(phyloref.internal_specifiers[0], toad);
    assert!(phyloref.external_specifiers.is_empty());

    let reports = resolve_document(&document);
    assert!(reports[0].specifiers.iter().all(|s| s.role == SpecifierRole::Internal));
}

#[test]
fn node_labels_follow_tree_structure() {
    let document = load_fixture();
    let parsed = ParsedPhylogeny::parse(&document.phylogenies[0]).unwrap();

    assert_eq!(parsed.node_labels(NodeScope::Internal), vec!["Anura", "Ranidae"]);
    assert_eq!(
        parsed.node_labels(NodeScope::Terminal),
        vec!["Rana boylii", "Draytonii specimen", "Bufo"]
    );
}

#[test]
fn status_history_survives_a_save() {
    let mut document = load_fixture();
    let clock = FixedClock::parse("2024-06-01T08:30:00Z").unwrap();
    let phyloref = &mut document.phylorefs[0];

    assert_eq!(phyloref.current_status().status_curie, PhylorefStatus::Draft);
    phyloref.set_status("pso:under-review", &clock).unwrap();
    assert_eq!(
        phyloref.set_status("pso:not-a-real-status", &clock),
        Err(CurationError::UnknownStatus { value: "pso:not-a-real-status".to_string() })
    );

    let saved = serde_json::to_string(&document).unwrap();
    let reloaded = PhyxDocument::from_json(&saved).unwrap();
    let history = reloaded.phylorefs[0].status_changes();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status_curie, PhylorefStatus::UnderReview);
    assert_eq!(history[0].timestamp, Some(clock.0));
}
