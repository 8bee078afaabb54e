//! Field-by-field comparison
//!
//! Produces the per-field verdict map and aggregate result for one matched
//! (record, ticket) pair. The mode branch is taken once per record:
//! discovery records report actual values without judgment, fully
//! specified records are compared field by field.

use std::collections::BTreeMap;

use ticketprobe_domain::{
    Expectation, FieldComparison, FieldName, HelpDeskTicket, OverallResult, SentEmailRecord,
    TicketKind, TicketVerificationResult, VerificationStatus,
};

use super::matrix::{self, ExpectedSeverity};
use crate::groups::{GroupRegistry, UNASSIGNED_GROUP};

const VALID_GROUP_EXPECTATION: &str = "One of the valid assignment groups";
const NOT_SET: &str = "Not Set";
const NOT_APPLICABLE: &str = "N/A";

/// Compare one matched pair and build its verification result.
pub fn compare_ticket(
    record: &SentEmailRecord,
    ticket: &HelpDeskTicket,
    groups: &GroupRegistry,
) -> TicketVerificationResult {
    // The source system leaves urgency/impact unset on email-created
    // tickets; its documented default for unset is Low.
    let urgency_actual = ticket.urgency.unwrap_or(1);
    let impact_actual = ticket.impact.unwrap_or(1);

    let mut comparisons = BTreeMap::new();
    let mut match_count = 0u32;
    let mut mismatch_count = 0u32;

    let group_actual = match ticket.group_id {
        Some(id) => groups.name_of(id),
        None => UNASSIGNED_GROUP.to_string(),
    };

    let overall = match &record.expectation {
        Expectation::Discovery => {
            comparisons.insert(
                FieldName::Priority,
                FieldComparison::informational(matrix::priority_label(ticket.priority)),
            );
            comparisons.insert(
                FieldName::Urgency,
                FieldComparison::informational(matrix::severity_label(urgency_actual)),
            );
            comparisons.insert(
                FieldName::Impact,
                FieldComparison::informational(matrix::severity_label(impact_actual)),
            );
            comparisons
                .insert(FieldName::Type, FieldComparison::informational(ticket.kind().as_str()));
            comparisons.insert(
                FieldName::Category,
                FieldComparison::informational(ticket.category.as_deref().unwrap_or(NOT_SET)),
            );
            comparisons.insert(
                FieldName::SubCategory,
                FieldComparison::informational(ticket.sub_category.as_deref().unwrap_or(NOT_SET)),
            );
            comparisons.insert(
                FieldName::Item,
                FieldComparison::informational(ticket.item.as_deref().unwrap_or(NOT_SET)),
            );
            comparisons.insert(FieldName::Group, FieldComparison::informational(group_actual));

            OverallResult::Discovery
        }
        Expectation::Expected { priority, kind, category_path } => {
            let mut record_field = |field: FieldName, comparison: FieldComparison| {
                match comparison.matched {
                    Some(true) => match_count += 1,
                    Some(false) => mismatch_count += 1,
                    None => {}
                }
                comparisons.insert(field, comparison);
            };

            let expected_number = matrix::expected_priority_number(priority);
            record_field(
                FieldName::Priority,
                FieldComparison::evaluated(
                    priority.clone(),
                    matrix::priority_label(ticket.priority),
                    ticket.priority == expected_number,
                ),
            );

            let expected_urgency = ExpectedSeverity::urgency_for(priority);
            record_field(
                FieldName::Urgency,
                FieldComparison::evaluated(
                    expected_urgency.to_string(),
                    matrix::severity_label(urgency_actual),
                    expected_urgency.matches(urgency_actual),
                ),
            );

            let expected_impact = ExpectedSeverity::impact_for(priority);
            record_field(
                FieldName::Impact,
                FieldComparison::evaluated(
                    expected_impact.to_string(),
                    matrix::severity_label(impact_actual),
                    expected_impact.matches(impact_actual),
                ),
            );

            let actual_kind = ticket.kind();
            record_field(
                FieldName::Type,
                FieldComparison::evaluated(
                    kind.as_str(),
                    actual_kind.as_str(),
                    actual_kind == *kind,
                ),
            );

            let [expected_cat, expected_subcat, expected_item] = split_category_path(category_path);
            record_field(
                FieldName::Category,
                compare_category_level(expected_cat.as_deref(), ticket.category.as_deref()),
            );
            record_field(
                FieldName::SubCategory,
                compare_category_level(expected_subcat.as_deref(), ticket.sub_category.as_deref()),
            );
            record_field(
                FieldName::Item,
                compare_category_level(expected_item.as_deref(), ticket.item.as_deref()),
            );

            // Group validation is an allow-list check, not an
            // expected-vs-actual comparison: a failure is a defect
            // (mismatch), a success adds nothing to match_count.
            let group_valid = ticket.group_id.is_some_and(|id| groups.is_valid(id));
            if !group_valid {
                mismatch_count += 1;
            }
            comparisons.insert(
                FieldName::Group,
                FieldComparison::evaluated(VALID_GROUP_EXPECTATION, group_actual, group_valid),
            );

            if mismatch_count == 0 {
                OverallResult::Pass
            } else {
                OverallResult::Fail
            }
        }
    };

    TicketVerificationResult {
        sequence_number: record.sequence_number,
        subject: record.subject.clone(),
        status: VerificationStatus::Found,
        ticket_id: Some(ticket.id),
        comparisons,
        overall: Some(overall),
        match_count,
        mismatch_count,
    }
}

/// Split a `>`-delimited category path into up to three trimmed levels.
/// Empty or missing segments become `None`; extra segments are dropped.
fn split_category_path(path: &str) -> [Option<String>; 3] {
    let mut levels: [Option<String>; 3] = [None, None, None];
    for (slot, part) in levels.iter_mut().zip(path.split('>')) {
        let trimmed = part.trim();
        if !trimmed.is_empty() {
            *slot = Some(trimmed.to_string());
        }
    }
    levels
}

/// Compare one category level by exact string equality.
///
/// Unset on both sides counts as a match: an expectation that names only
/// two levels makes no claim about the third, and email-created tickets
/// often carry none at all.
fn compare_category_level(expected: Option<&str>, actual: Option<&str>) -> FieldComparison {
    FieldComparison::evaluated(
        expected.unwrap_or(NOT_APPLICABLE),
        actual.unwrap_or(NOT_SET),
        expected == actual,
    )
}

#[cfg(test)]
mod tests {
    use ticketprobe_domain::Expectation;

    use super::*;

    fn registry() -> GroupRegistry {
        GroupRegistry::builtin()
    }

    fn expected_record(sequence: u64, priority: &str, kind: TicketKind, path: &str) -> SentEmailRecord {
        SentEmailRecord {
            sequence_number: sequence,
            subject: format!("[TEST-TKT-{sequence}] probe"),
            expectation: Expectation::Expected {
                priority: priority.to_string(),
                kind,
                category_path: path.to_string(),
            },
        }
    }

    fn discovery_record(sequence: u64) -> SentEmailRecord {
        SentEmailRecord {
            sequence_number: sequence,
            subject: format!("[TEST-TKT-{sequence}] probe"),
            expectation: Expectation::Discovery,
        }
    }

    fn base_ticket() -> HelpDeskTicket {
        HelpDeskTicket {
            id: 5000,
            subject: "[TEST-TKT-42] VPN down".to_string(),
            priority: 4,
            urgency: Some(3),
            impact: Some(3),
            ticket_type: Some("Incident".to_string()),
            category: Some("Network".to_string()),
            sub_category: Some("VPN".to_string()),
            item: Some("Down".to_string()),
            group_id: Some(76000128925),
            description: None,
            updated_at: None,
        }
    }

    #[test]
    fn fully_matching_ticket_passes_with_seven_matches() {
        let record = expected_record(42, "Priority 1", TicketKind::Incident, "Network>VPN>Down");
        let result = compare_ticket(&record, &base_ticket(), &registry());

        assert_eq!(result.status, VerificationStatus::Found);
        assert_eq!(result.ticket_id, Some(5000));
        assert_eq!(result.overall, Some(OverallResult::Pass));
        assert_eq!(result.match_count, 7);
        assert_eq!(result.mismatch_count, 0);
        assert_eq!(result.comparisons.len(), FieldName::ALL.len());
        assert_eq!(result.comparisons[&FieldName::Group].matched, Some(true));
    }

    #[test]
    fn wrong_priority_fails_the_ticket() {
        let record = expected_record(42, "Priority 1", TicketKind::Incident, "Network>VPN>Down");
        let mut ticket = base_ticket();
        ticket.priority = 2;

        let result = compare_ticket(&record, &ticket, &registry());
        assert_eq!(result.overall, Some(OverallResult::Fail));
        assert_eq!(result.comparisons[&FieldName::Priority].matched, Some(false));
        assert_eq!(result.comparisons[&FieldName::Priority].actual, "Medium");
        assert!(result.mismatch_count >= 1);
    }

    #[test]
    fn discovery_mode_never_judges_any_field() {
        let record = discovery_record(42);
        let result = compare_ticket(&record, &base_ticket(), &registry());

        assert_eq!(result.overall, Some(OverallResult::Discovery));
        assert_eq!(result.match_count, 0);
        assert_eq!(result.mismatch_count, 0);
        assert_eq!(result.comparisons.len(), FieldName::ALL.len());
        for comparison in result.comparisons.values() {
            assert_eq!(comparison.matched, None);
            assert_eq!(comparison.expected, "Discovery Mode");
        }
    }

    #[test]
    fn null_urgency_and_impact_compare_as_low() {
        let record = expected_record(42, "Priority 4", TicketKind::Incident, "Network>VPN>Down");
        let mut ticket = base_ticket();
        ticket.priority = 1;
        ticket.urgency = None;
        ticket.impact = None;

        let result = compare_ticket(&record, &ticket, &registry());
        assert_eq!(result.comparisons[&FieldName::Urgency].matched, Some(true));
        assert_eq!(result.comparisons[&FieldName::Urgency].actual, "Low");
        assert_eq!(result.comparisons[&FieldName::Impact].matched, Some(true));
        assert_eq!(result.comparisons[&FieldName::Impact].actual, "Low");
    }

    #[test]
    fn priority_two_urgency_disjunction_accepts_high_or_medium() {
        let record = expected_record(42, "Priority 2", TicketKind::Incident, "Network>VPN>Down");

        for (urgency, impact, should_match) in [(3, 2, true), (2, 3, true), (1, 3, false)] {
            let mut ticket = base_ticket();
            ticket.priority = 3;
            ticket.urgency = Some(urgency);
            ticket.impact = Some(impact);

            let result = compare_ticket(&record, &ticket, &registry());
            assert_eq!(
                result.comparisons[&FieldName::Urgency].matched,
                Some(should_match),
                "urgency {urgency} expected match={should_match}"
            );
        }
    }

    #[test]
    fn category_levels_unset_on_both_sides_match() {
        // Expectation names only the first level; the ticket carries only
        // the first level. The two unset levels agree and count as
        // matches.
        let record = expected_record(42, "Priority 1", TicketKind::Incident, "Network");
        let mut ticket = base_ticket();
        ticket.sub_category = None;
        ticket.item = None;

        let result = compare_ticket(&record, &ticket, &registry());
        assert_eq!(result.comparisons[&FieldName::Category].matched, Some(true));
        assert_eq!(result.comparisons[&FieldName::SubCategory].matched, Some(true));
        assert_eq!(result.comparisons[&FieldName::SubCategory].expected, "N/A");
        assert_eq!(result.comparisons[&FieldName::SubCategory].actual, "Not Set");
        assert_eq!(result.comparisons[&FieldName::Item].matched, Some(true));
        assert_eq!(result.overall, Some(OverallResult::Pass));
    }

    #[test]
    fn expected_level_missing_from_ticket_mismatches() {
        let record = expected_record(42, "Priority 1", TicketKind::Incident, "Network>VPN>Down");
        let mut ticket = base_ticket();
        ticket.item = None;

        let result = compare_ticket(&record, &ticket, &registry());
        assert_eq!(result.comparisons[&FieldName::Item].matched, Some(false));
        assert_eq!(result.overall, Some(OverallResult::Fail));
    }

    #[test]
    fn group_outside_allow_list_is_always_a_mismatch() {
        let record = expected_record(42, "Priority 1", TicketKind::Incident, "Network>VPN>Down");
        let mut ticket = base_ticket();
        ticket.group_id = Some(999);

        let result = compare_ticket(&record, &ticket, &registry());
        let group = &result.comparisons[&FieldName::Group];
        assert_eq!(group.matched, Some(false));
        assert_eq!(group.actual, "Unknown Group (ID: 999)");
        assert_eq!(result.overall, Some(OverallResult::Fail));
    }

    #[test]
    fn unassigned_group_is_a_mismatch_with_unassigned_actual() {
        let record = expected_record(42, "Priority 1", TicketKind::Incident, "Network>VPN>Down");
        let mut ticket = base_ticket();
        ticket.group_id = None;

        let result = compare_ticket(&record, &ticket, &registry());
        let group = &result.comparisons[&FieldName::Group];
        assert_eq!(group.matched, Some(false));
        assert_eq!(group.actual, "Unassigned");
        assert_eq!(result.overall, Some(OverallResult::Fail));
    }

    #[test]
    fn type_normalization_routes_non_incidents_as_service_requests() {
        let record =
            expected_record(42, "Priority 1", TicketKind::ServiceRequest, "Network>VPN>Down");
        let mut ticket = base_ticket();
        ticket.ticket_type = Some("Query".to_string());

        let result = compare_ticket(&record, &ticket, &registry());
        assert_eq!(result.comparisons[&FieldName::Type].matched, Some(true));
        assert_eq!(result.comparisons[&FieldName::Type].actual, "Service Request");
    }

    #[test]
    fn category_path_splitting_trims_and_drops_empty_segments() {
        assert_eq!(
            split_category_path(" Network > VPN > Down "),
            [Some("Network".to_string()), Some("VPN".to_string()), Some("Down".to_string())]
        );
        assert_eq!(split_category_path("Hardware"), [Some("Hardware".to_string()), None, None]);
        assert_eq!(split_category_path("Hardware>>"), [Some("Hardware".to_string()), None, None]);
        assert_eq!(split_category_path(""), [None, None, None]);
    }
}
