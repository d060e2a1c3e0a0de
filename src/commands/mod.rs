//! Command dispatch and handlers.

pub mod check;
pub mod labels;
pub mod resolve;
pub mod set_status;
pub mod statuses;

use std::path::Path;

use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::model::PhyxDocument;

/// Dispatch a parsed command to its handler using live adapters.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command, config: &Config) -> Result<(), String> {
    dispatch_with_context(command, config, &ServiceContext::live())
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    config: &Config,
    ctx: &ServiceContext,
) -> Result<(), String> {
    match command {
        Command::Check { newick } => check::run(newick),
        Command::Labels { newick, scope } => labels::run(newick, scope.as_deref(), config),
        Command::Resolve { document } => resolve::run(ctx, document),
        Command::Statuses => statuses::run(),
        Command::SetStatus { document, phyloref, status } => {
            set_status::run(ctx, document, phyloref, status)
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| matches!(e, "yaml" | "yml"))
}

/// Loads a curation document, choosing YAML or JSON by file extension.
///
/// # Errors
///
/// Returns an error string if the file cannot be read or parsed.
pub fn load_document(ctx: &ServiceContext, path: &Path) -> Result<PhyxDocument, String> {
    let contents = ctx
        .fs
        .read_to_string(path)
        .map_err(|e| format!("Failed to read document {}: {e}", path.display()))?;
    let mut document = if is_yaml(path) {
        PhyxDocument::from_yaml(&contents)?
    } else {
        PhyxDocument::from_json(&contents)?
    };
    document.normalize();
    Ok(document)
}

/// Saves a curation document in the format implied by its extension.
///
/// # Errors
///
/// Returns an error string if serialization or writing fails.
pub fn save_document(
    ctx: &ServiceContext,
    path: &Path,
    document: &PhyxDocument,
) -> Result<(), String> {
    let contents = if is_yaml(path) {
        serde_yaml::to_string(document).map_err(|e| format!("Failed to serialize document: {e}"))?
    } else {
        serde_json::to_string_pretty(document)
            .map_err(|e| format!("Failed to serialize document: {e}"))?
    };
    ctx.fs
        .write(path, &contents)
        .map_err(|e| format!("Failed to write document {}: {e}", path.display()))
}
