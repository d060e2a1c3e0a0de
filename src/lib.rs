//! Core library for `phylocurate`.
//!
//! Curates phyloreferences (clade definitions built from taxonomic
//! specifiers) and decides which nodes of a Newick phylogeny each
//! specifier identifies.
//!
//! - [`model`]: records, name parsing, specimen identifiers, labels,
//!   specifier lists and status history
//! - [`matcher`]: pairwise taxonomic unit matching
//! - [`phylogeny`]: Newick parsing, validation and node label resolution
//! - [`resolve`]: document-wide resolution reports

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod matcher;
pub mod model;
pub mod phylogeny;
pub mod ports;
pub mod resolve;
pub mod telemetry;

use clap::Parser;

pub use error::CurationError;
pub use matcher::{MatchResult, TaxonomicUnitMatcher};

/// Run the CLI with the provided arguments and configuration.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I, config: &config::Config) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command, config)
}
