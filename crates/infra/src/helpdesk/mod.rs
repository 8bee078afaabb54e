//! Help-desk read API adapter
//!
//! HTTP implementation of the `TicketSource` port against the help-desk
//! ticket API.

pub mod client;
pub mod types;

pub use client::HelpDeskClient;
