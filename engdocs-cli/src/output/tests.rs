//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::TextFormatter;
    use crate::commands::run::{FeedTotals, RunReport};
    use chrono::Local;
    use engdocs_core::{Environment, Program, Schema};
    use engdocs_fetch::{ProbeResult, ProbeStage};
    use std::path::PathBuf;
    use std::time::Duration;

    fn totals(data_type: &'static str, records: usize, failed: usize) -> FeedTotals {
        FeedTotals {
            data_type,
            records,
            successful_programs: 3 - failed,
            failed_programs: failed,
            empty_programs: 0,
            total_programs: 3,
        }
    }

    fn dtr_report() -> RunReport {
        RunReport {
            system: Schema::Dtr,
            environment: Environment::Qas,
            started_at: Local::now(),
            elapsed: Duration::from_secs(65),
            total_records: 1_500,
            feeds: vec![totals("BDI", 1_200, 0), totals("TechRep", 300, 1)],
            csv: PathBuf::from("BDI_TechReports.csv"),
            workbook: PathBuf::from("BDI_TechReports.xlsm"),
        }
    }

    #[test]
    fn test_program_line() {
        let formatter = TextFormatter::new(false);
        let line = formatter.format_program_line(&Program::new("12", "E2", "E2 Jet"));
        assert!(line.starts_with("12 "));
        assert!(line.contains("E2 Jet"));
    }

    #[test]
    fn test_program_line_with_display_name() {
        let formatter = TextFormatter::new(false);
        let mut program = Program::new("12", "E2", "E2 Jet");
        program.program_name = Some("E-Jets E2".to_string());
        assert!(formatter.format_program_line(&program).ends_with("(E-Jets E2)"));
    }

    #[test]
    fn test_report_lines() {
        let lines = TextFormatter::new(false).format_report(&dtr_report());

        assert!(lines.contains(&"BDI records: 1,200".to_string()));
        assert!(lines.contains(&"Technical Reports records: 300".to_string()));
        assert!(lines.contains(&"TOTAL records: 1,500".to_string()));
        assert!(lines.contains(&"  1 of 3 programs failed".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Total execution time: 0:01:05"));
    }

    #[test]
    fn test_single_feed_report_has_no_total_line() {
        let mut report = dtr_report();
        report.feeds.truncate(1);
        let lines = TextFormatter::new(false).format_report(&report);
        assert!(!lines.iter().any(|l| l.starts_with("TOTAL")));
    }

    #[test]
    fn test_probe_unreachable() {
        let result = ProbeResult {
            stage: ProbeStage::Unreachable,
            status_code: None,
            elapsed: None,
            content_type: None,
        };
        let output = TextFormatter::new(false).format_probe(&result, "https://h/gtp");
        assert!(output.contains("✗ Unreachable"));
        assert!(output.contains("https://h/gtp"));
        assert!(!output.contains("HTTP Status"));
    }

    #[test]
    fn test_probe_colors() {
        let result = ProbeResult {
            stage: ProbeStage::Quick,
            status_code: Some(200),
            elapsed: Some(Duration::from_millis(250)),
            content_type: Some("application/json".to_string()),
        };
        let output = TextFormatter::new(true).format_probe(&result, "https://h/gtp");
        assert!(output.contains("\x1b[32m"), "Quick stage should be green");
        assert!(output.contains("0.25s"));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::JsonFormatter;
    use engdocs_core::Program;
    use engdocs_fetch::{ProbeResult, ProbeStage};
    use std::time::Duration;

    #[test]
    fn test_probe_output() {
        let result = ProbeResult {
            stage: ProbeStage::Full,
            status_code: Some(200),
            elapsed: Some(Duration::from_millis(1500)),
            content_type: None,
        };
        let output = JsonFormatter::new(false)
            .format_probe(&result, "https://h/gtp")
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["reachable"], true);
        assert_eq!(parsed["stage"], "full");
        assert_eq!(parsed["statusCode"], 200);
        assert_eq!(parsed["elapsedMs"], 1500);
        assert!(parsed.get("contentType").is_none());
    }

    #[test]
    fn test_programs_use_api_field_names() {
        let programs = vec![Program::new("7", "KC", "KC-390")];
        let output = JsonFormatter::new(false).format(&programs).unwrap();
        assert_eq!(
            output,
            r#"[{"programID":"7","programCode":"KC","program":"KC-390"}]"#
        );
    }
}
