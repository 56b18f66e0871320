//! Tracing subscriber setup
//!
//! Status lines for the user go to stdout directly; tracing only carries
//! diagnostics. Normal runs log warnings to stderr. `--debug` writes JSON
//! records to a timestamped file under the local data directory.

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,cvbuild=warn,cvbuild_builder=warn";
const DEBUG_FILTER: &str = "info,cvbuild=debug,cvbuild_builder=debug,cvbuild_config=debug";

pub fn init_tracing(debug_enabled: bool) {
    if debug_enabled {
        let log_dir = log_dir();
        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            eprintln!("Warning: Failed to create log directory: {e}");
        }

        let log_file = log_dir.join(format!(
            "cvbuild-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_env_filter(filter_or(DEBUG_FILTER))
                    .init();

                eprintln!("Debug logging enabled: {}", log_file.display());
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file: {e}");
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter_or(DEBUG_FILTER))
                    .init();
            }
        }
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter_or(DEFAULT_FILTER))
            .init();
    }
}

/// `RUST_LOG` wins over the built-in filter
fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("cvbuild")
        .join("logs")
}
