//! Ticket verification engine
//!
//! Locates the help-desk tickets produced by previously sent probe emails
//! and compares their categorization against the expected metadata:
//!
//! - [`matrix`] - priority / urgency / impact translation tables
//! - [`matcher`] - widen-search candidate retrieval and subject-tag binding
//! - [`comparator`] - field-by-field comparison for one matched pair
//! - [`summary`] - batch aggregation
//! - [`service`] - orchestration over the above

pub mod comparator;
pub mod matcher;
pub mod matrix;
pub mod ports;
pub mod service;
pub mod summary;

pub use comparator::compare_ticket;
pub use matcher::{bind_records, ConsumedTickets, TicketMatcher};
pub use matrix::{ExpectedSeverity, Severity};
pub use service::VerificationService;
pub use summary::summarize;
