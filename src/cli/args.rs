//! CLI argument definitions
//!
//! A local driver for the ledger engine: the same commands a chat transport
//! would deliver, fed from the command line or stdin.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "warikan")]
#[command(about = "Group shared-expense ledger driven by chat-style commands", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Ledger document path (overrides the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Apply one chat message to the ledger and print the reply
    Apply {
        /// Group (conversation) the message belongs to
        #[arg(short, long)]
        group: String,
        /// Member id of the sender
        #[arg(short, long)]
        user: String,
        /// Sender's display name, if known
        #[arg(short, long)]
        name: Option<String>,
        /// Message text; read from stdin when omitted
        message: Option<String>,
    },
    /// Close out every group now: push summaries, then reset
    Rollover,
    /// Run the close-out schedule in the foreground
    Watch {
        /// Fixed tick in seconds instead of the monthly schedule
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
    },
    /// Dump the stored ledger as JSON
    Show {
        /// Limit the dump to one group
        #[arg(short, long)]
        group: Option<String>,
    },
}
