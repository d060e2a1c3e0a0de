//! Curation record types.
//!
//! Mirrors the JSON document shape consumed by curation tools. Records are
//! plain data: operations either read them or fill in missing derived
//! fields in place.

mod document;
mod phylogeny;
mod phyloreference;
mod scientific_name;
mod specifier;
mod specimen;
mod status;
mod taxonomic_unit;

pub use document::{ExtraFields, PhyxDocument};
pub use phylogeny::{NodeProperties, Phylogeny};
pub use phyloreference::Phyloreference;
pub use scientific_name::{parse_name, ParsedName, ScientificName};
pub use specifier::{
    specifier_label, Specifier, SpecifierRole, MISSING_SPECIFIER, UNNAMED_SPECIFIER,
};
pub use specimen::{decompose_occurrence_id, CatalogParts, Specimen, CATALOG_URN_PREFIX};
pub use status::{PhylorefStatus, StatusEntry};
pub use taxonomic_unit::{TaxonomicUnit, LABEL_SEPARATOR, UNNAMED_TAXONOMIC_UNIT};
