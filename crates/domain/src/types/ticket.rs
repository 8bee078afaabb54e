//! Help-desk ticket types
//!
//! Read-only representations of ticket records fetched from the external
//! help-desk API. Field names mirror the wire format.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TicketProbeError;

/// A ticket record in the external help-desk system.
///
/// Urgency, impact, category levels and group assignment are nullable on
/// the wire: email-created tickets frequently arrive without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpDeskTicket {
    pub id: u64,
    #[serde(default)]
    pub subject: String,
    /// Numeric priority, 1 (Low) to 4 (Urgent)
    pub priority: i64,
    /// Numeric urgency, 1 (Low) to 3 (High); unset means Low
    #[serde(default)]
    pub urgency: Option<i64>,
    /// Numeric impact, 1 (Low) to 3 (High); unset means Low
    #[serde(default)]
    pub impact: Option<i64>,
    /// Raw ticket type string, e.g. "Incident" or "Service Request"
    #[serde(rename = "type", default)]
    pub ticket_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    /// Assignment group id; unset means the ticket was never routed
    #[serde(default)]
    pub group_id: Option<u64>,
    /// Free text, carried for reporting only and never compared
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl HelpDeskTicket {
    /// The ticket type normalized to the two kinds the system routes.
    pub fn kind(&self) -> TicketKind {
        TicketKind::from_raw(self.ticket_type.as_deref())
    }
}

/// The two ticket kinds recognized by the help-desk workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketKind {
    Incident,
    ServiceRequest,
}

impl TicketKind {
    /// Normalize a raw type string. Anything that is not exactly
    /// "Incident" routes as a service request, matching help-desk intake
    /// behavior for email-created tickets.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("Incident") => Self::Incident,
            _ => Self::ServiceRequest,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Incident => "Incident",
            Self::ServiceRequest => "Service Request",
        }
    }
}

impl fmt::Display for TicketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketKind {
    type Err = TicketProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Incident" => Ok(Self::Incident),
            "Service Request" => Ok(Self::ServiceRequest),
            other => Err(TicketProbeError::InvalidInput(format!("unknown ticket kind: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_normalizes_to_service_request_unless_incident() {
        assert_eq!(TicketKind::from_raw(Some("Incident")), TicketKind::Incident);
        assert_eq!(TicketKind::from_raw(Some("Service Request")), TicketKind::ServiceRequest);
        assert_eq!(TicketKind::from_raw(Some("Change")), TicketKind::ServiceRequest);
        assert_eq!(TicketKind::from_raw(None), TicketKind::ServiceRequest);
    }

    #[test]
    fn ticket_deserializes_with_nullable_fields_absent() {
        let ticket: HelpDeskTicket = serde_json::from_str(
            r#"{"id": 9001, "subject": "[TEST-TKT-7] printer on fire", "priority": 1}"#,
        )
        .unwrap();
        assert_eq!(ticket.id, 9001);
        assert_eq!(ticket.urgency, None);
        assert_eq!(ticket.impact, None);
        assert_eq!(ticket.group_id, None);
        assert_eq!(ticket.kind(), TicketKind::ServiceRequest);
    }
}
