//! Probe mail delivery adapter
//!
//! Graph-style `sendMail` implementation of the `MailTransport` port. The
//! bearer credential comes from an injected [`AccessTokenProvider`]; token
//! acquisition itself (device flow, caching) lives outside this crate.

pub mod client;

pub use client::{AccessTokenProvider, GraphMailClient};
