//! Text output formatting with colors.

use engdocs_core::Program;
use engdocs_fetch::{ProbeResult, ProbeStage};
use std::time::Duration;

use crate::commands::run::RunReport;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

const RULE_WIDTH: usize = 38;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    // ========================================================================
    // Programs
    // ========================================================================

    /// Header line of the program table.
    pub fn format_programs_header(&self) -> String {
        self.bold(&format!("{:<10} {:<14} {}", "ID", "CODE", "PROGRAM"))
    }

    /// One program row.
    pub fn format_program_line(&self, program: &Program) -> String {
        let mut line = format!(
            "{:<10} {:<14} {}",
            program.program_id, program.program_code, program.program
        );
        if let Some(name) = program.program_name.as_deref().filter(|n| *n != program.program) {
            line.push_str(&self.dim(&format!(" ({name})")));
        }
        line
    }

    // ========================================================================
    // Probe
    // ========================================================================

    /// Connectivity probe result.
    pub fn format_probe(&self, result: &ProbeResult, base_url: &str) -> String {
        let status = match result.stage {
            ProbeStage::Quick => self.green("✓ Reachable"),
            ProbeStage::Full => self.yellow("✓ Reachable (slow)"),
            ProbeStage::Unreachable => self.red("✗ Unreachable"),
        };

        let mut lines = vec![format!("{:<15} {}", self.bold("API"), status)];
        lines.push(format!("  Base URL:     {base_url}"));
        if let Some(code) = result.status_code {
            lines.push(format!("  HTTP Status:  {code}"));
        }
        if let Some(elapsed) = result.elapsed {
            lines.push(format!("  Response:     {:.2}s", elapsed.as_secs_f64()));
        }
        if let Some(content_type) = &result.content_type {
            lines.push(format!("  Content-Type: {content_type}"));
        }
        lines.join("\n")
    }

    // ========================================================================
    // Run summary
    // ========================================================================

    /// Summary lines of a finished extraction.
    pub fn format_report(&self, report: &RunReport) -> Vec<String> {
        let rule = "=".repeat(RULE_WIDTH);
        let mut lines = vec![rule.clone(), "Data Summary:".to_string()];

        for feed in &report.feeds {
            lines.push(format!(
                "{} records: {}",
                feed_label(feed.data_type),
                format_number(feed.records)
            ));
            if feed.failed_programs > 0 {
                lines.push(self.yellow(&format!(
                    "  {} of {} programs failed",
                    feed.failed_programs, feed.total_programs
                )));
            }
        }
        if report.feeds.len() > 1 {
            lines.push(format!("TOTAL records: {}", format_number(report.total_records)));
        }

        lines.push(rule);
        lines.push("Processing completed successfully!".to_string());
        lines.push(format!("Total records: {}", format_number(report.total_records)));
        lines.push(format!("CSV file: {}", report.csv.display()));
        lines.push(format!("Excel file: {}", report.workbook.display()));
        lines.push(format!(
            "Total execution time: {}",
            format_duration(report.elapsed)
        ));
        lines
    }

    // ========================================================================
    // Color helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }
}

fn feed_label(data_type: &str) -> &str {
    match data_type {
        "TechRep" => "Technical Reports",
        other => other,
    }
}

/// `1234567` as `1,234,567`.
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole seconds as `H:MM:SS`.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0:00:00");
        assert_eq!(format_duration(Duration::from_millis(307_900)), "0:05:07");
        assert_eq!(format_duration(Duration::from_secs(3_725)), "1:02:05");
    }

    #[test]
    fn test_feed_label() {
        assert_eq!(feed_label("TechRep"), "Technical Reports");
        assert_eq!(feed_label("BDI"), "BDI");
    }

    #[test]
    fn test_colors_only_when_enabled() {
        assert!(TextFormatter::new(true).red("x").contains(RED));
        assert_eq!(TextFormatter::new(false).red("x"), "x");
    }
}
