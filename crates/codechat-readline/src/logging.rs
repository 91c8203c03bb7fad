//! Log setup.
//!
//! Logs go to a daily rolling file so they never interleave with the chat on
//! the terminal. The filter comes from `CODECHAT_LOG` (default `warn`).

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use codechat_infrastructure::CodechatPaths;

const LOG_ENV: &str = "CODECHAT_LOG";
const LOG_FILE_PREFIX: &str = "codechat.log";

/// Installs the global subscriber. Keep the guard alive for the program's
/// lifetime or buffered lines are lost.
pub fn init() -> Result<WorkerGuard> {
    let logs_dir = CodechatPaths::logs_dir()?;
    std::fs::create_dir_all(&logs_dir)?;

    let appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
