//! Trait definitions for engdocs.

use std::path::Path;

/// Decides whether an existing output file may be replaced.
///
/// Injected so the export path runs without a terminal.
pub trait ConfirmOverwrite {
    /// Returns true to delete `path` and continue.
    fn confirm_overwrite(&self, path: &Path) -> bool;

    /// Called when `path` could not be deleted (usually because it is open
    /// in another application). Returns true to try again.
    fn retry_delete(&self, path: &Path) -> bool;
}
