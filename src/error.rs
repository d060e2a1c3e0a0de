//! Caller-input errors raised by curation operations.
//!
//! Tree syntax problems are not represented here; they are reported as
//! data by [`crate::phylogeny::validate_newick`].

/// An operation was called with an argument outside its accepted domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurationError {
    /// A status CURIE outside the publishing status vocabulary.
    #[error("Status '{value}' is not a recognised publishing status")]
    UnknownStatus {
        /// The rejected value.
        value: String,
    },

    /// A specifier type other than `Internal` or `External`.
    #[error("Specifier type '{value}' is not one of 'Internal' or 'External'")]
    UnknownSpecifierType {
        /// The rejected value.
        value: String,
    },
}
