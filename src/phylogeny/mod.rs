//! Phylogenies: Newick parsing, validation and node label resolution.

pub mod newick;
pub mod resolver;
pub mod validate;

pub use newick::{NewickError, NewickTree, Node, NodeIndex, ROOT_LABEL};
pub use resolver::{node_labels, taxonomic_unit_from_label, NodeScope, ParsedPhylogeny};
pub use validate::{validate_newick, PhylogenyError};
