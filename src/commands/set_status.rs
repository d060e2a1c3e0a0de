//! `phylocurate set-status` command.

use std::path::Path;

use crate::context::ServiceContext;

/// Execute the `set-status` command.
///
/// Appends a status entry to the named phyloreference and writes the
/// document back in place.
///
/// # Errors
///
/// Returns an error string if the document cannot be loaded or saved, no
/// phyloreference has the given label, or the status is unknown.
pub fn run(
    ctx: &ServiceContext,
    document_path: &Path,
    phyloref_label: &str,
    status: &str,
) -> Result<(), String> {
    let mut document = super::load_document(ctx, document_path)?;
    let phyloref = document
        .phylorefs
        .iter_mut()
        .find(|p| p.label.as_deref() == Some(phyloref_label))
        .ok_or_else(|| format!("No phyloreference labeled '{phyloref_label}' in document"))?;

    phyloref.set_status(status, ctx.clock.as_ref()).map_err(|e| e.to_string())?;
    let current = phyloref.current_status().status_curie;
    super::save_document(ctx, document_path, &document)?;

    println!("{phyloref_label}: {} ({current})", current.english_label());
    Ok(())
}
