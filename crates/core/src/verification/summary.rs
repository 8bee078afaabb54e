//! Batch summary aggregation

use std::collections::BTreeMap;

use ticketprobe_domain::{
    BatchSummary, FieldAccuracy, FieldName, OverallResult, TicketVerificationResult,
    VerificationStatus,
};

/// Aggregate a batch of verification results.
///
/// The pass rate denominator is the number of *found* tickets, never the
/// total sent: a batch where nothing was found reports 0, not a flattering
/// rate over the full batch. Discovery results count as found but are
/// excluded from pass/fail and from field accuracy.
pub fn summarize(results: &[TicketVerificationResult]) -> BatchSummary {
    let total = results.len();
    let found = results.iter().filter(|r| r.status == VerificationStatus::Found).count();
    let not_found = total - found;
    let passed = results.iter().filter(|r| r.overall == Some(OverallResult::Pass)).count();
    let failed = results.iter().filter(|r| r.overall == Some(OverallResult::Fail)).count();

    let pass_rate =
        if found > 0 { passed as f64 / found as f64 * 100.0 } else { 0.0 };

    let mut field_accuracy: BTreeMap<FieldName, FieldAccuracy> = BTreeMap::new();
    let mut group_distribution: BTreeMap<String, usize> = BTreeMap::new();

    for result in results {
        if result.status != VerificationStatus::Found {
            continue;
        }
        for field in FieldName::ALL {
            let Some(comparison) = result.comparisons.get(&field) else {
                continue;
            };
            if let Some(matched) = comparison.matched {
                let tally = field_accuracy.entry(field).or_default();
                tally.evaluated += 1;
                if matched {
                    tally.correct += 1;
                }
            }
        }
        if let Some(group) = result.comparisons.get(&FieldName::Group) {
            *group_distribution.entry(group.actual.clone()).or_insert(0) += 1;
        }
    }

    BatchSummary { total, found, not_found, passed, failed, pass_rate, field_accuracy, group_distribution }
}
