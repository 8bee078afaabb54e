//! Text report writer

use std::fmt::Write as _;
use std::path::PathBuf;

use ticketprobe_domain::{
    BatchVerification, FieldName, OverallResult, Result, TicketProbeError,
    TicketVerificationResult, VerificationStatus,
};
use tracing::info;

const SEPARATOR: &str =
    "================================================================================";
const RULE: &str =
    "--------------------------------------------------------------------------------";

/// Writes verification run reports into a log directory.
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Render the batch and write it to a timestamped report file.
    ///
    /// # Errors
    /// Returns `TicketProbeError::Internal` when the directory cannot be
    /// created or the file cannot be written.
    pub fn write(&self, batch: &BatchVerification) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            TicketProbeError::Internal(format!(
                "failed to create report directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let filename =
            format!("verification_{}.log", batch.verified_at.format("%Y%m%d_%H%M%S"));
        let path = self.dir.join(filename);

        let report = render(batch);
        std::fs::write(&path, report).map_err(|e| {
            TicketProbeError::Internal(format!(
                "failed to write report {}: {e}",
                path.display()
            ))
        })?;

        info!(path = %path.display(), "verification report written");
        Ok(path)
    }
}

/// Render a batch verification as plain text.
pub fn render(batch: &BatchVerification) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{SEPARATOR}");
    let _ = writeln!(out, "TICKET VERIFICATION REPORT");
    let _ = writeln!(out, "Batch started:  {}", batch.batch_start_time.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "Verified at:    {}", batch.verified_at.format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out, "{SEPARATOR}");

    for result in &batch.results {
        let _ = writeln!(out);
        render_result(&mut out, result);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{SEPARATOR}");
    let _ = writeln!(out, "SUMMARY");
    let _ = writeln!(out, "{RULE}");
    let summary = &batch.summary;
    let _ = writeln!(out, "Total sent:      {}", summary.total);
    let _ = writeln!(out, "Found:           {}", summary.found);
    let _ = writeln!(out, "Not found:       {}", summary.not_found);
    let _ = writeln!(out, "Passed:          {}", summary.passed);
    let _ = writeln!(out, "Failed:          {}", summary.failed);
    let _ = writeln!(out, "Pass rate:       {:.1}% (of found)", summary.pass_rate);

    if !summary.field_accuracy.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Field accuracy:");
        for (field, accuracy) in &summary.field_accuracy {
            let _ = writeln!(
                out,
                "  {:<14} {:>5.1}%  ({}/{})",
                field.to_string(),
                accuracy.percentage(),
                accuracy.correct,
                accuracy.evaluated
            );
        }
    }

    if !summary.group_distribution.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Assignment group distribution:");
        for (group, count) in &summary.group_distribution {
            let _ = writeln!(out, "  {group}: {count}");
        }
    }

    let _ = writeln!(out, "{SEPARATOR}");
    out
}

fn render_result(out: &mut String, result: &TicketVerificationResult) {
    let _ = writeln!(out, "Probe {}: {}", result.sequence_number, result.subject);

    match result.status {
        VerificationStatus::NotFound => {
            let _ = writeln!(out, "  NOT FOUND - no ticket carries this subject tag");
            return;
        }
        VerificationStatus::Found => {
            let verdict = match result.overall {
                Some(OverallResult::Pass) => "PASS",
                Some(OverallResult::Fail) => "FAIL",
                Some(OverallResult::Discovery) => "DISCOVERY",
                None => "UNKNOWN",
            };
            let _ = writeln!(
                out,
                "  Ticket #{}  {}  ({} matched, {} mismatched)",
                result.ticket_id.unwrap_or_default(),
                verdict,
                result.match_count,
                result.mismatch_count
            );
        }
    }

    for field in FieldName::ALL {
        let Some(comparison) = result.comparisons.get(&field) else {
            continue;
        };
        let marker = match comparison.matched {
            Some(true) => "OK  ",
            Some(false) => "DIFF",
            None => "    ",
        };
        let _ = writeln!(
            out,
            "    {marker} {:<14} expected: {:<24} actual: {}",
            field.to_string(),
            comparison.expected,
            comparison.actual
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;
    use ticketprobe_domain::{BatchSummary, FieldAccuracy, FieldComparison};

    use super::*;

    fn sample_batch() -> BatchVerification {
        let mut comparisons = BTreeMap::new();
        comparisons.insert(
            FieldName::Priority,
            FieldComparison::evaluated("Priority 2", "High", true),
        );
        comparisons.insert(
            FieldName::Urgency,
            FieldComparison::evaluated("Medium or High", "High", true),
        );
        comparisons.insert(
            FieldName::Group,
            FieldComparison::evaluated(
                "One of the valid assignment groups",
                "Service Desk Team",
                true,
            ),
        );

        let found = TicketVerificationResult {
            sequence_number: 42,
            subject: "[TEST-TKT-42] VPN down".to_string(),
            status: VerificationStatus::Found,
            ticket_id: Some(5000),
            comparisons,
            overall: Some(OverallResult::Pass),
            match_count: 7,
            mismatch_count: 0,
        };

        let missing = TicketVerificationResult {
            sequence_number: 43,
            subject: "[TEST-TKT-43] printer jam".to_string(),
            status: VerificationStatus::NotFound,
            ticket_id: None,
            comparisons: BTreeMap::new(),
            overall: None,
            match_count: 0,
            mismatch_count: 0,
        };

        let mut field_accuracy = BTreeMap::new();
        field_accuracy.insert(FieldName::Priority, FieldAccuracy { correct: 1, evaluated: 1 });

        let mut group_distribution = BTreeMap::new();
        group_distribution.insert("Service Desk Team".to_string(), 1);

        BatchVerification {
            results: vec![found, missing],
            summary: BatchSummary {
                total: 2,
                found: 1,
                not_found: 1,
                passed: 1,
                failed: 0,
                pass_rate: 100.0,
                field_accuracy,
                group_distribution,
            },
            batch_start_time: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            verified_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 5, 0).unwrap(),
        }
    }

    #[test]
    fn rendered_report_carries_verdicts_and_disjunctions() {
        let report = render(&sample_batch());

        assert!(report.contains("Ticket #5000  PASS  (7 matched, 0 mismatched)"));
        // The set-valued urgency expectation renders as a disjunction here,
        // at the reporting boundary.
        assert!(report.contains("Medium or High"));
        assert!(report.contains("NOT FOUND"));
        assert!(report.contains("Pass rate:       100.0% (of found)"));
        assert!(report.contains("Service Desk Team: 1"));
    }

    #[test]
    fn write_creates_timestamped_file_in_report_dir() {
        let dir = tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("logs"));

        let path = writer.write(&sample_batch()).unwrap();
        assert!(path.exists());
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("verification_20250601_090500.log")
        );

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.contains("TICKET VERIFICATION REPORT"));
    }
}
