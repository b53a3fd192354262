//! Rust client for the Zortrax Plus printer's length-prefixed
//! JSON-over-TCP protocol.

#![deny(missing_docs)]

pub mod client;
pub mod command;
pub mod error;
pub mod frame;
pub mod message;
pub mod preview;
