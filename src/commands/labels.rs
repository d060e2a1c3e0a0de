//! `phylocurate labels` command.

use crate::config::Config;
use crate::phylogeny::{node_labels, NewickTree, NodeScope};

/// Execute the `labels` command.
///
/// Prints one node label per line. Without `--scope`, the configured
/// default scope is used.
///
/// # Errors
///
/// Returns an error string if the scope is unknown or the tree does not
/// parse.
pub fn run(newick: &str, scope: Option<&str>, config: &Config) -> Result<(), String> {
    for label in list(newick, scope, config)? {
        println!("{label}");
    }
    Ok(())
}

fn list(newick: &str, scope: Option<&str>, config: &Config) -> Result<Vec<String>, String> {
    let scope = scope.map_or(Ok(config.label_scope), str::parse::<NodeScope>)?;
    let tree = NewickTree::parse(newick).map_err(|e| format!("Failed to parse phylogeny: {e}"))?;
    Ok(node_labels(&tree, scope))
}
