//! Outbound message delivery seam
//!
//! The engine never talks to a chat platform directly; it hands finished
//! text to a [`Transport`]. The binary wires in [`StdoutTransport`]; tests
//! use the recording implementation.

use std::sync::Arc;

pub(crate) trait Transport: Send + Sync {
    /// Deliver a reply to the conversation the command came from.
    fn reply(&self, text: &str);

    /// Deliver a standalone message for one member of a group (rollover
    /// summaries).
    fn push(&self, group_id: &str, user_key: &str, text: &str);
}

pub(crate) type SharedTransport = Arc<dyn Transport>;

pub(crate) struct StdoutTransport;

impl Transport for StdoutTransport {
    fn reply(&self, text: &str) {
        println!("{text}");
    }

    fn push(&self, group_id: &str, user_key: &str, text: &str) {
        println!("→ {user_key}@{group_id}\n{text}");
    }
}
