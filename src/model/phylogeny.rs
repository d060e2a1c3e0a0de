//! Phylogeny records as stored in a curation document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::document::ExtraFields;
use super::taxonomic_unit::TaxonomicUnit;

/// Curator-supplied metadata attached to a node label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperties {
    /// Taxonomic units the node stands for, overriding label parsing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub represents_taxonomic_units: Option<Vec<TaxonomicUnit>>,
    /// Label of the phyloreference expected to resolve to this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_phyloreference_named: Option<String>,
    /// Unmodelled keys.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// A phylogeny in Newick notation plus per-node metadata.
///
/// The parsed tree is not stored; it is rebuilt from `newick` on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phylogeny {
    /// Optional display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Tree in Newick notation.
    #[serde(default)]
    pub newick: String,
    /// Metadata keyed by node label.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_node_properties: BTreeMap<String, NodeProperties>,
    /// Unmodelled keys such as `source` or `description`.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Phylogeny {
    /// A phylogeny with no node metadata.
    #[must_use]
    pub fn from_newick(newick: impl Into<String>) -> Self {
        Self { newick: newick.into(), ..Self::default() }
    }

    /// Metadata for a node label, if any was recorded.
    #[must_use]
    pub fn node_properties(&self, label: &str) -> Option<&NodeProperties> {
        self.additional_node_properties.get(label)
    }
}
