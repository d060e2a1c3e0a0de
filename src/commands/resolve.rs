//! `phylocurate resolve` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::resolve::{format_reports, resolve_document};

/// Execute the `resolve` command.
///
/// Loads the document and prints, for every phyloreference on every
/// phylogeny, the nodes each specifier matches.
///
/// # Errors
///
/// Returns an error string if the document cannot be loaded.
pub fn run(ctx: &ServiceContext, document: &Path) -> Result<(), String> {
    let document = super::load_document(ctx, document)?;
    if document.phylorefs.is_empty() {
        println!("No phyloreferences found in document.");
        return Ok(());
    }
    println!("{}", format_reports(&resolve_document(&document)));
    Ok(())
}
