//! Phyloreferences: specifier lists and curation status history.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::document::ExtraFields;
use super::specifier::{Specifier, SpecifierRole};
use super::status::{PhylorefStatus, StatusEntry};
use crate::error::CurationError;
use crate::ports::Clock;

/// A clade definition expressed through internal and external specifiers.
///
/// A specifier sits in at most one of the two lists. Specifiers are
/// compared structurally, so two identical specifiers count as the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phyloreference {
    /// Name of the clade being defined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Specifiers the clade must include.
    #[serde(default)]
    pub internal_specifiers: Vec<Specifier>,
    /// Specifiers the clade must exclude.
    #[serde(default)]
    pub external_specifiers: Vec<Specifier>,
    /// Append-only record of status changes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status_history: Vec<StatusEntry>,
    /// Unmodelled keys such as `curatorComments`.
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Phyloreference {
    /// Creates an empty phyloreference with the given label.
    #[must_use]
    pub fn named(label: impl Into<String>) -> Self {
        Self { label: Some(label.into()), ..Self::default() }
    }

    /// Internal specifiers followed by external specifiers.
    pub fn specifiers(&self) -> impl Iterator<Item = &Specifier> {
        self.internal_specifiers.iter().chain(self.external_specifiers.iter())
    }

    /// Which list currently holds `specifier`.
    #[must_use]
    pub fn specifier_role(&self, specifier: &Specifier) -> SpecifierRole {
        if self.internal_specifiers.contains(specifier) {
            SpecifierRole::Internal
        } else if self.external_specifiers.contains(specifier) {
            SpecifierRole::External
        } else {
            SpecifierRole::Unassigned
        }
    }

    /// Moves `specifier` to the list named by `specifier_type`.
    ///
    /// Type names other than `Internal` and `External` leave both lists
    /// untouched.
    pub fn set_specifier_type(&mut self, specifier: Specifier, specifier_type: &str) {
        match specifier_type.parse::<SpecifierRole>() {
            Ok(role) => self.move_specifier(specifier, role),
            Err(err) => debug!(%err, "ignoring specifier type change"),
        }
    }

    /// Moves `specifier` to the front of the list for `role`.
    ///
    /// The specifier is removed from whichever list holds it and then
    /// inserted at the front of the target list, so it appears exactly once.
    /// Moving it to [`SpecifierRole::Unassigned`] only removes it.
    pub fn move_specifier(&mut self, specifier: Specifier, role: SpecifierRole) {
        self.delete_specifier(&specifier);
        let target = match role {
            SpecifierRole::Internal => &mut self.internal_specifiers,
            SpecifierRole::External => &mut self.external_specifiers,
            SpecifierRole::Unassigned => return,
        };
        debug!(specifier = %specifier.label(), %role, "moving specifier");
        target.insert(0, specifier);
    }

    /// Adds `specifier` to the end of the list for `role` unless it is
    /// already present in either list.
    pub fn add_specifier(&mut self, specifier: Specifier, role: SpecifierRole) {
        if self.specifier_role(&specifier) != SpecifierRole::Unassigned {
            return;
        }
        match role {
            SpecifierRole::Internal => self.internal_specifiers.push(specifier),
            SpecifierRole::External => self.external_specifiers.push(specifier),
            SpecifierRole::Unassigned => {}
        }
    }

    /// Removes `specifier` from whichever list holds it.
    pub fn delete_specifier(&mut self, specifier: &Specifier) {
        self.internal_specifiers.retain(|existing| existing != specifier);
        self.external_specifiers.retain(|existing| existing != specifier);
    }

    /// Recorded status changes in the order they were made.
    #[must_use]
    pub fn status_changes(&self) -> &[StatusEntry] {
        &self.status_history
    }

    /// The latest status, or an implicit draft when nothing was recorded.
    #[must_use]
    pub fn current_status(&self) -> StatusEntry {
        self.status_history.last().cloned().unwrap_or_else(StatusEntry::initial)
    }

    /// Records a new status, timestamped by `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`CurationError::UnknownStatus`] when `curie` is not in the
    /// publishing status vocabulary; the history is left unchanged.
    pub fn set_status(&mut self, curie: &str, clock: &dyn Clock) -> Result<(), CurationError> {
        let status: PhylorefStatus = curie.parse()?;
        self.record_status(status, clock);
        Ok(())
    }

    /// Records a new status from the typed vocabulary.
    pub fn record_status(&mut self, status: PhylorefStatus, clock: &dyn Clock) {
        let timestamp = clock.now();
        debug!(phyloref = ?self.label, %status, %timestamp, "status changed");
        self.status_history.push(StatusEntry { status_curie: status, timestamp: Some(timestamp) });
    }
}
