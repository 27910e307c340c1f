//! Command Replies
//!
//! The outcome of each command and the text the interpreter prints for it.

use std::fmt;

use serde::Serialize;

use crate::kv::StoreStats;

/// Text printed for `HELP`.
pub const HELP_TEXT: &str =
    "Commands: SET <key> <value>, GET <key>, DEL <key>, PREFIX <prefix>, BLOOM <key>, STATS, HELP, EXIT";

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A write was applied
    Ok,
    /// Lookup result; `None` renders as `(nil)`
    Value(Option<String>),
    /// Whether a `DEL` removed anything
    Deleted(bool),
    /// Keys matching a prefix, in index order
    Keys(Vec<String>),
    /// Filter answer for `key`
    Bloom { key: String, maybe: bool },
    Stats(StoreStats),
    Help,
    /// The session is over
    Exit,
    /// The command was rejected
    Error(String),
}

/// JSON body printed for `STATS`: the raw counters plus the derived hit rate.
#[derive(Serialize)]
struct StatsReport<'a> {
    #[serde(flatten)]
    stats: &'a StoreStats,
    hit_rate: f64,
}

impl Reply {
    /// Returns true if the session should stop after this reply.
    pub fn is_exit(&self) -> bool {
        matches!(self, Reply::Exit)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Value(Some(value)) => write!(f, "\"{}\"", value),
            Reply::Value(None) => write!(f, "(nil)"),
            Reply::Deleted(true) => write!(f, "OK (deleted)"),
            Reply::Deleted(false) => write!(f, "OK (key not found)"),
            Reply::Keys(keys) if keys.is_empty() => {
                write!(f, "(no keys found with this prefix)")
            }
            Reply::Keys(keys) => {
                let lines: Vec<String> = keys
                    .iter()
                    .enumerate()
                    .map(|(i, key)| format!("{}) {}", i + 1, key))
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
            Reply::Bloom { key, maybe: true } => write!(
                f,
                "Key \"{}\" MIGHT be present (check GET for confirmation).",
                key
            ),
            Reply::Bloom { key, maybe: false } => {
                write!(f, "Key \"{}\" is DEFINITELY NOT present.", key)
            }
            Reply::Stats(stats) => {
                let report = StatsReport {
                    stats,
                    hit_rate: stats.hit_rate(),
                };
                let json = serde_json::to_string(&report).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
            Reply::Help => write!(f, "{}", HELP_TEXT),
            Reply::Exit => write!(f, "Exiting store."),
            Reply::Error(message) => write!(f, "ERR: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_values() {
        assert_eq!(Reply::Ok.to_string(), "OK");
        assert_eq!(
            Reply::Value(Some("apple".to_string())).to_string(),
            "\"apple\""
        );
        assert_eq!(Reply::Value(Some(String::new())).to_string(), "\"\"");
        assert_eq!(Reply::Value(None).to_string(), "(nil)");
    }

    #[test]
    fn test_render_deleted() {
        assert_eq!(Reply::Deleted(true).to_string(), "OK (deleted)");
        assert_eq!(Reply::Deleted(false).to_string(), "OK (key not found)");
    }

    #[test]
    fn test_render_keys() {
        let reply = Reply::Keys(vec!["app_config".to_string(), "app_service".to_string()]);
        assert_eq!(reply.to_string(), "1) app_config\n2) app_service");
        assert_eq!(
            Reply::Keys(Vec::new()).to_string(),
            "(no keys found with this prefix)"
        );
    }

    #[test]
    fn test_render_bloom() {
        let maybe = Reply::Bloom {
            key: "k".to_string(),
            maybe: true,
        };
        let never = Reply::Bloom {
            key: "k".to_string(),
            maybe: false,
        };
        assert!(maybe.to_string().contains("MIGHT be present"));
        assert_eq!(never.to_string(), "Key \"k\" is DEFINITELY NOT present.");
    }

    #[test]
    fn test_render_stats_json() {
        let reply = Reply::Stats(StoreStats::new());
        let json: serde_json::Value = serde_json::from_str(&reply.to_string()).unwrap();
        assert_eq!(json["cache_hits"], 0);
        assert_eq!(json["total_entries"], 0);
        assert_eq!(json["hit_rate"], 0.0);
    }

    #[test]
    fn test_render_stats_includes_hit_rate() {
        let mut stats = StoreStats::new();
        stats.record_cache_hit();
        stats.record_miss();

        let json: serde_json::Value =
            serde_json::from_str(&Reply::Stats(stats).to_string()).unwrap();
        assert_eq!(json["hit_rate"], 0.5);
        assert_eq!(json["cache_hits"], 1);
        assert_eq!(json["misses"], 1);
    }

    #[test]
    fn test_exit_and_error() {
        assert!(Reply::Exit.is_exit());
        assert!(!Reply::Ok.is_exit());
        assert_eq!(Reply::Exit.to_string(), "Exiting store.");
        assert_eq!(Reply::Error("bad".to_string()).to_string(), "ERR: bad");
    }
}
