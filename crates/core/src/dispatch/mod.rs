//! Probe dispatch
//!
//! Sends pre-generated probe emails through a mail transport, tagging each
//! subject with a unique sequence number so the resulting tickets can be
//! found and verified later.

pub mod ports;
pub mod service;

pub use ports::{MailTransport, SequenceProvider};
pub use service::DispatchService;
