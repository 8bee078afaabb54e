//! Domain types and models

pub mod dispatch;
pub mod ticket;
pub mod verification;

pub use dispatch::{DispatchOutcome, FailedProbe, ProbeSpec};
pub use ticket::{HelpDeskTicket, TicketKind};
pub use verification::{
    BatchSummary, BatchVerification, Expectation, FieldAccuracy, FieldComparison, FieldName,
    OverallResult, SentEmailRecord, TicketVerificationResult, VerificationStatus,
};
