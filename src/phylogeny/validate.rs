//! User-facing validation of Newick strings.

use serde::Serialize;
use tracing::debug;

use super::newick::NewickTree;

/// A problem with a Newick string, worded for display to a curator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhylogenyError {
    /// Short summary.
    pub title: String,
    /// Longer explanation, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PhylogenyError {
    fn new(title: &str, message: Option<String>) -> Self {
        Self { title: title.to_string(), message }
    }
}

/// Whether a Newick string, ignoring whitespace, describes no tree at all.
fn is_empty_tree(stripped: &str) -> bool {
    matches!(stripped, "" | ";" | "()" | "();")
}

/// Checks a Newick string and returns every problem found.
///
/// An empty tree yields a single "No phylogeny entered" error. Unbalanced
/// parentheses yield a count error followed by the parser's error. Any
/// other syntax problem yields the parser's error alone. A valid tree
/// yields no errors.
#[must_use]
pub fn validate_newick(newick: &str) -> Vec<PhylogenyError> {
    let stripped: String = newick.chars().filter(|c| !c.is_whitespace()).collect();
    if is_empty_tree(&stripped) {
        return vec![PhylogenyError::new("No phylogeny entered", None)];
    }

    let mut errors = Vec::new();

    let open = stripped.matches('(').count();
    let close = stripped.matches(')').count();
    if open != close {
        let direction = if open < close { "few" } else { "many" };
        errors.push(PhylogenyError::new(
            "Unbalanced parentheses in Newick string",
            Some(format!("You have {} too {direction} open parentheses", open.abs_diff(close))),
        ));
    }

    if let Err(err) = NewickTree::parse(newick) {
        debug!(%err, "failed to parse phylogeny");
        errors.push(PhylogenyError::new(
            "Error parsing phylogeny",
            Some(format!("An error occured while parsing this phylogeny: {err}")),
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_tree_has_no_errors() {
        assert!(validate_newick("(A:3, B:5, (C:6, N:7));").is_empty());
    }

    #[test]
    fn empty_tree_shapes() {
        for input in ["()", "();", " ( ) ; ", ""] {
            let errors = validate_newick(input);
            assert_eq!(errors.len(), 1, "input {input:?}");
            assert_eq!(errors[0].title, "No phylogeny entered");
        }
    }

    #[test]
    fn too_many_close_parens() {
        let errors = validate_newick("(A, B))");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].title, "Unbalanced parentheses in Newick string");
        assert_eq!(errors[0].message.as_deref(), Some("You have 1 too few open parentheses"));
        assert_eq!(errors[1].title, "Error parsing phylogeny");
    }

    #[test]
    fn too_many_open_parens() {
        let errors = validate_newick("((A, B), (C, D);");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message.as_deref(), Some("You have 1 too many open parentheses"));
    }

    #[test]
    fn deeply_nested_tree_reports_errors() {
        let depth = 50_000;
        let newick = format!("{}A{};", "(".repeat(depth), ")".repeat(depth));
        assert!(validate_newick(&newick).is_empty());

        let errors = validate_newick(&format!("{}A{};", "(".repeat(depth), ")".repeat(depth - 1)));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message.as_deref(), Some("You have 1 too many open parentheses"));
        assert_eq!(errors[1].title, "Error parsing phylogeny");
    }

    #[test]
    fn balanced_but_malformed() {
        let errors = validate_newick("(A,,B);");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].title, "Error parsing phylogeny");
        let message = errors[0].message.as_deref().unwrap();
        assert!(message.starts_with("An error occured while parsing this phylogeny: "));
        assert!(message.contains("empty terminal"));
    }
}
