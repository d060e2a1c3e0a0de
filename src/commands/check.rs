//! `phylocurate check` command.

use crate::phylogeny::{validate_newick, PhylogenyError};

/// Execute the `check` command.
///
/// Prints each problem found, or `OK` for a valid tree.
///
/// # Errors
///
/// Returns an error string when the Newick string has problems.
pub fn run(newick: &str) -> Result<(), String> {
    let errors = validate_newick(newick);
    println!("{}", render(&errors));
    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!("{} problem(s) found in Newick string", errors.len()))
    }
}

fn render(errors: &[PhylogenyError]) -> String {
    if errors.is_empty() {
        return "OK".to_string();
    }
    errors
        .iter()
        .map(|error| match &error.message {
            Some(message) => format!("{}: {message}", error.title),
            None => error.title.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
