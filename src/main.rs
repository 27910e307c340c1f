//! Layered KV - interactive shell
//!
//! Reads commands from stdin and prints replies to stdout. Logs go to
//! stderr so they never interleave with replies.

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use layered_kv::shell::{run_repl, spawn_line_reader};
use layered_kv::{Session, StoreConfig};

/// Main entry point for the Layered KV shell.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load store configuration from environment variables
/// 3. Create the session and its store
/// 4. Run the read-eval-print loop until EOF, EXIT or Ctrl+C
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "layered_kv=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = StoreConfig::from_env();
    info!(
        "Configuration loaded: bucket_count={}, cache_capacity={}, filter_size={}, filter_hash_count={}",
        config.bucket_count, config.cache_capacity, config.filter_size, config.filter_hash_count
    );

    let session = Session::from_config(&config).context("failed to build store")?;
    let lines = spawn_line_reader(std::io::BufReader::new(std::io::stdin()))
        .context("failed to start stdin reader")?;
    let mut stdout = tokio::io::stdout();

    tokio::select! {
        result = run_repl(&session, lines, &mut stdout) => {
            result.context("shell I/O failed")?;
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    info!("Shell shutdown complete");
    Ok(())
}
