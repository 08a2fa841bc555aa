// 📝 Logging - tracing subscriber setup
// Terminal UI logs to a file (stdout is the screen); everything else to stderr

use std::path::Path;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// `RUST_LOG` if set, else `info`
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Append to `path`; falls back to stderr if the file cannot be opened
pub fn init_file(path: &Path) {
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let installed = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .try_init()
                .is_ok();
            if installed {
                let _ = LOG_GUARD.set(guard);
                tracing::info!(path = %path.display(), "logging initialized");
            }
        }
        Err(e) => {
            init_stderr();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_info() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(env_filter().to_string(), "info");
        }
    }

    #[test]
    fn test_init_file_creates_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beach-directory.log");
        init_file(&path);
        assert!(path.exists());
    }
}
