//! Debug dump writer.
//!
//! When debug mode is on, every page's URL, raw body, decoded JSON and
//! converted rows are written under `debug/{data_type}/`. Write failures are
//! logged and ignored.

use engdocs_core::ResultTable;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default root of debug dumps.
pub const DEFAULT_DEBUG_DIR: &str = "debug";

/// Writes diagnostic files when enabled.
#[derive(Debug, Clone)]
pub struct DebugDump {
    root: PathBuf,
    enabled: bool,
}

impl DebugDump {
    /// Creates a writer rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            root: root.into(),
            enabled,
        }
    }

    /// A writer that never writes.
    pub fn disabled() -> Self {
        Self::new(DEFAULT_DEBUG_DIR, false)
    }

    /// Whether dumps are written.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `content` verbatim to `root/relative`.
    pub fn text(&self, relative: &str, content: &str) {
        if !self.enabled {
            return;
        }
        self.write(relative, content.as_bytes());
    }

    /// Writes `value` pretty-printed to `root/relative`.
    pub fn json(&self, relative: &str, value: &Value) {
        if !self.enabled {
            return;
        }
        match serde_json::to_string_pretty(value) {
            Ok(content) => self.write(relative, content.as_bytes()),
            Err(e) => warn!(file = relative, error = %e, "Failed to serialize debug JSON"),
        }
    }

    /// Writes `table` as CSV to `root/relative`.
    pub fn table(&self, relative: &str, table: &ResultTable) {
        if !self.enabled {
            return;
        }
        let mut buffer = Vec::new();
        match table.write_csv(&mut buffer) {
            Ok(()) => self.write(relative, &buffer),
            Err(e) => warn!(file = relative, error = %e, "Failed to render debug CSV"),
        }
    }

    fn write(&self, relative: &str, content: &[u8]) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "Failed to create debug directory");
                return;
            }
        }
        match fs::write(&path, content) {
            Ok(()) => debug!(path = %path.display(), "Saved debug file"),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to write debug file"),
        }
    }
}

impl Default for DebugDump {
    fn default() -> Self {
        Self::disabled()
    }
}

/// File stem shared by every dump of one page: `{idx:03}_page{page:02}_{type}`.
pub fn page_stem(index: usize, page: u32, data_type: &str) -> String {
    format!("{index:03}_page{page:02}_{data_type}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use engdocs_core::RecordBatch;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_page_stem() {
        assert_eq!(page_stem(7, 2, "GTP"), "007_page02_GTP");
    }

    #[test]
    fn test_disabled_writes_nothing() {
        let dir = tempdir().unwrap();
        let dump = DebugDump::new(dir.path().join("debug"), false);
        dump.text("GTP/url.txt", "http://x");
        assert!(!dir.path().join("debug").exists());
    }

    #[test]
    fn test_writes_files() {
        let dir = tempdir().unwrap();
        let dump = DebugDump::new(dir.path(), true);

        dump.text("GTP/url_001_page01_GTP.txt", "http://x");
        dump.json("GTP/parsed_001_page01_GTP.json", &json!({"a": 1}));
        let table = engdocs_core::assemble([&RecordBatch::from_value(&json!([{"a": 1}]))]);
        dump.table("GTP/dataframe_001_page01_GTP.csv", &table);

        let gtp = dir.path().join("GTP");
        assert_eq!(fs::read_to_string(gtp.join("url_001_page01_GTP.txt")).unwrap(), "http://x");
        assert_eq!(
            fs::read_to_string(gtp.join("parsed_001_page01_GTP.json")).unwrap(),
            "{\n  \"a\": 1\n}"
        );
        assert_eq!(
            fs::read_to_string(gtp.join("dataframe_001_page01_GTP.csv")).unwrap(),
            "a\n1\n"
        );
    }
}
