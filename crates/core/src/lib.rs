//! # TicketProbe Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The ticket verification engine (severity matrix, matcher, comparator,
//!   batch summary)
//! - The probe dispatch service
//! - Port/adapter interfaces (traits) for the help-desk source, mail
//!   transport and sequence counter
//!
//! ## Architecture Principles
//! - Only depends on `ticketprobe-domain`
//! - No HTTP or file-system code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod dispatch;
pub mod groups;
pub mod verification;

// Re-export specific items to avoid ambiguity
pub use dispatch::ports::{MailTransport, SequenceProvider};
pub use dispatch::DispatchService;
pub use groups::GroupRegistry;
pub use verification::ports::TicketSource;
pub use verification::{
    bind_records, compare_ticket, summarize, ConsumedTickets, TicketMatcher, VerificationService,
};
