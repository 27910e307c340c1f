//! Interpreter Session
//!
//! Holds the shared store and executes parsed commands against it.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::kv::Store;
use crate::shell::{Command, Reply};

/// Command session over a shared store.
///
/// The store sits behind a single lock held for the whole of each command,
/// so concurrent sessions see every command as atomic.
#[derive(Clone)]
pub struct Session {
    pub store: Arc<RwLock<Store>>,
}

impl Session {
    /// Creates a new Session around the given store.
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Creates a new Session from configuration.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        Ok(Self::new(Store::new(config)?))
    }

    /// Parses and runs one input line.
    ///
    /// Returns `None` for a blank line. Parse errors become [`Reply::Error`].
    pub async fn execute(&self, line: &str) -> Option<Reply> {
        match Command::parse(line) {
            Ok(Some(command)) => Some(self.dispatch(command).await),
            Ok(None) => None,
            Err(err) => {
                warn!(line, "rejected command: {}", err);
                Some(Reply::Error(err.to_string()))
            }
        }
    }

    /// Runs a parsed command.
    pub async fn dispatch(&self, command: Command) -> Reply {
        match command {
            Command::Set { key, value } => {
                self.store.write().await.set(key, value);
                Reply::Ok
            }
            // Write lock: a hit promotes the key in the recency cache
            Command::Get { key } => Reply::Value(self.store.write().await.get(&key)),
            Command::Del { key } => Reply::Deleted(self.store.write().await.remove(&key)),
            Command::Prefix { prefix } => {
                Reply::Keys(self.store.read().await.prefix_search(&prefix))
            }
            Command::Bloom { key } => {
                let maybe = self.store.read().await.might_contain(&key);
                Reply::Bloom { key, maybe }
            }
            Command::Stats => Reply::Stats(self.store.read().await.stats()),
            Command::Help => Reply::Help,
            Command::Exit => Reply::Exit,
        }
    }
}
