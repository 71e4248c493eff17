//! Pre-export check for an existing output file.

use engdocs_core::ConfirmOverwrite;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::error::StoreError;

const RETRY_PAUSE: Duration = Duration::from_millis(500);

/// Deletes an existing `path` after confirmation.
///
/// A missing file is fine. A declined confirmation is
/// [`StoreError::Cancelled`]. A locked file is retried for as long as
/// `confirm` agrees to.
pub fn prepare_output(path: &Path, confirm: &dyn ConfirmOverwrite) -> Result<(), StoreError> {
    if !path.exists() {
        info!("File {} does not exist. Proceeding with export...", path.display());
        return Ok(());
    }

    if !confirm.confirm_overwrite(path) {
        info!("Operation cancelled by user");
        return Err(StoreError::Cancelled);
    }

    loop {
        match std::fs::remove_file(path) {
            Ok(()) => {
                info!("File {} has been deleted.", path.display());
                return Ok(());
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                warn!(
                    "Unable to delete {}. The file may be open in another application.",
                    path.display()
                );
                if !confirm.retry_delete(path) {
                    info!("Operation cancelled by user");
                    return Err(StoreError::Cancelled);
                }
                thread::sleep(RETRY_PAUSE);
            }
            Err(e) => {
                error!("Error deleting file {}: {}", path.display(), e);
                return Err(e.into());
            }
        }
    }
}

// ============================================================================
// Confirmers
// ============================================================================

/// Asks on the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl StdinConfirm {
    fn ask(prompt: &str) -> Option<String> {
        print!("{prompt}");
        io::stdout().flush().ok()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_lowercase()),
        }
    }
}

impl ConfirmOverwrite for StdinConfirm {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        println!("File {} already exists.", path.display());
        loop {
            match Self::ask("Do you want to delete it? (yes/no): ").as_deref() {
                Some("yes" | "y") => return true,
                Some("no" | "n") | None => return false,
                Some(_) => println!("Invalid response. Please enter 'yes' or 'no'."),
            }
        }
    }

    fn retry_delete(&self, path: &Path) -> bool {
        println!("Please close {} and try again.", path.display());
        let answer = Self::ask("Press Enter to try again or type 'exit' to cancel: ");
        !matches!(answer.as_deref(), Some("exit") | None)
    }
}

/// Always agrees; `--yes` on the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl ConfirmOverwrite for AutoConfirm {
    fn confirm_overwrite(&self, path: &Path) -> bool {
        info!("Overwriting {}", path.display());
        true
    }

    fn retry_delete(&self, _path: &Path) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::tempdir;

    struct Answer {
        overwrite: bool,
        asked: Cell<bool>,
    }

    impl ConfirmOverwrite for Answer {
        fn confirm_overwrite(&self, _path: &Path) -> bool {
            self.asked.set(true);
            self.overwrite
        }

        fn retry_delete(&self, _path: &Path) -> bool {
            false
        }
    }

    #[test]
    fn test_missing_file_is_not_asked() {
        let dir = tempdir().unwrap();
        let answer = Answer { overwrite: false, asked: Cell::new(false) };
        prepare_output(&dir.path().join("getGTPs.xlsm"), &answer).unwrap();
        assert!(!answer.asked.get());
    }

    #[test]
    fn test_declined_is_cancelled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("getGTPs.xlsm");
        std::fs::write(&path, b"old").unwrap();

        let answer = Answer { overwrite: false, asked: Cell::new(false) };
        let err = prepare_output(&path, &answer).unwrap_err();

        assert!(matches!(err, StoreError::Cancelled));
        assert!(path.exists());
    }

    #[test]
    fn test_confirmed_deletes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("getGTPs.xlsm");
        std::fs::write(&path, b"old").unwrap();

        prepare_output(&path, &AutoConfirm).unwrap();
        assert!(!path.exists());
    }
}
