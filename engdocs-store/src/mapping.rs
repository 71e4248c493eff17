//! Program-to-group mapping.
//!
//! `program_group.txt` holds one `name;group` pair per line. Applying the
//! mapping replaces matching `program` cells with their group.

use engdocs_core::ResultTable;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::error::StoreError;

/// Default mapping file name.
pub const MAPPING_FILE: &str = "program_group.txt";

/// Column the mapping applies to.
pub const PROGRAM_COLUMN: &str = "program";

const DELIMITER: char = ';';

/// Parsed program-to-group mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramMapping {
    entries: HashMap<String, String>,
}

/// Counters reported after applying a mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappingStats {
    /// Unique program values before mapping.
    pub before: usize,
    /// Unique program values after mapping.
    pub after: usize,
    /// Unique program values that had a mapping.
    pub mapped: usize,
}

impl ProgramMapping {
    /// Fails when the mapping file is missing. The file may be empty.
    pub fn require(path: &Path) -> Result<(), StoreError> {
        if path.is_file() {
            return Ok(());
        }
        let name = path.display().to_string();
        error!("Error: {} not found in current directory", name);
        error!("This file is required for program mapping configuration");
        error!("To proceed without mapping, create an empty file:");
        error!("  Windows: type nul > {}", name);
        error!("  Linux/Mac: touch {}", name);
        Err(StoreError::MissingFile {
            path: name,
            purpose: "program mapping configuration".to_string(),
        })
    }

    /// Reads and parses a mapping file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        Self::require(path)?;
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Parses mapping text.
    pub fn parse(content: &str) -> Self {
        let mut entries = HashMap::new();
        let mut valid = 0;
        let mut lines = 0;

        for (idx, raw) in content.lines().enumerate() {
            let number = idx + 1;
            lines = number;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let Some((program, group)) = line.split_once(DELIMITER) else {
                debug!("Line {} skipped (no delimiter): {}", number, line);
                continue;
            };
            let (program, group) = (program.trim(), group.trim());
            if program.is_empty() || group.is_empty() {
                warn!("Line {} has empty values: '{}'", number, line);
                continue;
            }

            if entries.insert(program.to_string(), group.to_string()).is_some() {
                warn!("Duplicate program '{}' on line {} (overwriting)", program, number);
            }
            valid += 1;
        }

        let mapping = Self { entries };
        info!(
            "Program mapping loaded: {} valid entries from {} lines",
            valid, lines
        );
        info!("Unique program groups: {}", mapping.group_count());
        mapping
    }

    /// Group of `program`, if mapped.
    pub fn get(&self, program: &str) -> Option<&str> {
        self.entries.get(program).map(String::as_str)
    }

    /// Number of mapped programs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct groups.
    pub fn group_count(&self) -> usize {
        self.entries.values().collect::<HashSet<_>>().len()
    }

    /// Replaces mapped values of the `program` column in place.
    ///
    /// A table without that column is left unchanged.
    pub fn apply(&self, table: &mut ResultTable) -> MappingStats {
        if !table.has_column(PROGRAM_COLUMN) {
            warn!("'{}' column not found in table - skipping mapping", PROGRAM_COLUMN);
            return MappingStats::default();
        }

        let originals = unique_values(table);
        let mut stats = MappingStats {
            before: originals.len(),
            ..MappingStats::default()
        };
        info!("Programs before mapping: {} unique values", stats.before);

        for row in 0..table.len() {
            let group = match table.cell(row, PROGRAM_COLUMN) {
                Value::String(program) => self.get(program).map(str::to_string),
                _ => None,
            };
            if let Some(group) = group {
                table.set_cell(row, PROGRAM_COLUMN, Value::String(group));
            }
        }

        stats.after = unique_values(table).len();
        let unmapped: Vec<&Value> = originals
            .iter()
            .filter(|v| v.as_str().is_none_or(|p| self.get(p).is_none()))
            .collect();
        stats.mapped = originals.len() - unmapped.len();

        #[allow(clippy::cast_precision_loss)]
        let reduction = if stats.before > 0 {
            (stats.before - stats.after) as f64 / stats.before as f64 * 100.0
        } else {
            0.0
        };
        info!("Programs after mapping: {} unique values", stats.after);
        info!("Mapped {} programs (reduction: {:.1}%)", stats.mapped, reduction);

        let named: Vec<&str> = unmapped.iter().filter_map(|v| v.as_str()).collect();
        if !named.is_empty() {
            debug!(
                "Unmapped programs ({}): {}",
                named.len(),
                named.iter().take(10).copied().collect::<Vec<_>>().join(", ")
            );
            if named.len() > 10 {
                debug!("... and {} more", named.len() - 10);
            }
        }

        stats
    }
}

fn unique_values(table: &ResultTable) -> Vec<Value> {
    let mut seen = Vec::new();
    for value in table.column_values(PROGRAM_COLUMN) {
        if !seen.contains(value) {
            seen.push(value.clone());
        }
    }
    seen
}
