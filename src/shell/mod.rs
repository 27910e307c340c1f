//! Shell Module
//!
//! Line-oriented command interpreter over a shared [`Store`](crate::kv::Store).
//!
//! # Commands
//! - `SET <key> <value>` - Store a key-value pair
//! - `GET <key>` - Retrieve a value
//! - `DEL <key>` - Delete a key
//! - `PREFIX <prefix>` - List keys starting with a prefix
//! - `BLOOM <key>` - Ask the membership filter about a key
//! - `STATS` - Print store counters as JSON
//! - `HELP` / `EXIT`

mod command;
mod reply;
mod repl;
mod session;

pub use command::Command;
pub use repl::{run_repl, spawn_line_reader};
pub use reply::{Reply, HELP_TEXT};
pub use session::Session;
