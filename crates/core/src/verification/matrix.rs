//! Priority / urgency / impact translation tables
//!
//! A single business priority label maps to one numeric help-desk priority
//! and to one or more operationally-equivalent (urgency, impact) pairs from
//! the ITIL-style matrix. Expectations for one axis are therefore a *set*
//! of accepted values; the set renders as an "X or Y" string only at the
//! reporting boundary.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One axis of the help-desk severity matrix (urgency or impact).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Decode the wire value (1=Low, 2=Medium, 3=High).
    pub fn from_numeric(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for a numeric urgency or impact value, for reporting.
pub fn severity_label(value: i64) -> String {
    match Severity::from_numeric(value) {
        Some(severity) => severity.as_str().to_string(),
        None => format!("Unknown ({value})"),
    }
}

/// Label for a numeric priority value (1=Low .. 4=Urgent), for reporting.
pub fn priority_label(value: i64) -> String {
    match value {
        1 => "Low".to_string(),
        2 => "Medium".to_string(),
        3 => "High".to_string(),
        4 => "Urgent".to_string(),
        other => format!("Unknown ({other})"),
    }
}

/// Numeric help-desk priority expected for a priority label.
///
/// Unrecognized labels fall back to 2 (Medium). This is a deliberate
/// default, not an error: test catalogs occasionally carry labels the
/// matrix predates.
pub fn expected_priority_number(priority_name: &str) -> i64 {
    match priority_name {
        "Priority 1" => 4, // Urgent
        "Priority 2" => 3, // High
        "Priority 3" => 2, // Medium
        "Priority 4" => 1, // Low
        _ => 2,
    }
}

/// Valid (urgency, impact) pairs per priority label.
fn matrix_pairs(priority_name: &str) -> &'static [(Severity, Severity)] {
    use Severity::{High, Low, Medium};
    match priority_name {
        "Priority 1" => &[(High, High)],
        "Priority 2" => &[(High, Medium), (Medium, High)],
        "Priority 3" => &[(High, Low), (Medium, Medium), (Low, High)],
        "Priority 4" => &[(Low, Low)],
        _ => &[],
    }
}

/// The set of severity values accepted for one axis of an expectation.
///
/// An empty set (unrecognized priority label) renders as "Unknown" and
/// matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedSeverity {
    accepted: BTreeSet<Severity>,
}

impl ExpectedSeverity {
    /// Urgency values accepted for a priority label.
    pub fn urgency_for(priority_name: &str) -> Self {
        Self { accepted: matrix_pairs(priority_name).iter().map(|&(urgency, _)| urgency).collect() }
    }

    /// Impact values accepted for a priority label.
    pub fn impact_for(priority_name: &str) -> Self {
        Self { accepted: matrix_pairs(priority_name).iter().map(|&(_, impact)| impact).collect() }
    }

    /// Whether the actual numeric value is one of the accepted severities.
    /// Callers default unset wire values to 1 (Low) before asking.
    pub fn matches(&self, actual: i64) -> bool {
        Severity::from_numeric(actual).is_some_and(|severity| self.accepted.contains(&severity))
    }

    pub fn is_known(&self) -> bool {
        !self.accepted.is_empty()
    }
}

impl fmt::Display for ExpectedSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.accepted.is_empty() {
            return f.write_str("Unknown");
        }
        let mut first = true;
        for severity in &self.accepted {
            if !first {
                f.write_str(" or ")?;
            }
            f.write_str(severity.as_str())?;
            first = false;
        }
        Ok(())
    }
}
