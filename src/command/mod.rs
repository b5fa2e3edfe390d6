//! Chat command interpretation
//!
//! The line grammar in [`grammar`] is shared with the report import merger
//! so printed reports and inbound commands parse through one layer.

pub(crate) mod action;
pub(crate) mod grammar;
pub(crate) mod parser;

pub(crate) use action::{Action, AmountSpec, Share};
pub(crate) use parser::parse_message;
