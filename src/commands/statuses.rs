//! `phylocurate statuses` command.

use crate::model::PhylorefStatus;

/// Execute the `statuses` command.
///
/// # Errors
///
/// Never fails; returns `Result` for dispatch uniformity.
pub fn run() -> Result<(), String> {
    let width = PhylorefStatus::ALL.iter().map(|s| s.curie().len()).max().unwrap_or(0);
    for status in PhylorefStatus::ALL {
        println!("{:<width$}  {}", status.curie(), status.english_label());
    }
    Ok(())
}
