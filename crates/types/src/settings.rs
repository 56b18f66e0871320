//! Per-run build choices and results

use crate::BuildType;
use std::path::PathBuf;

/// The three values collected before CMake runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub build_type: BuildType,
    /// Passed through to CMake verbatim
    pub library_path: String,
    /// Export `compile_commands.json` and copy it next to the sources
    pub compile_commands: bool,
}

/// How a configure + build run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Succeeded {
        /// Where the compile database was copied to, if requested
        compile_commands: Option<PathBuf>,
    },
    /// `exit_code` is `None` when the child was killed by a signal
    ConfigureFailed { exit_code: Option<i32> },
    BuildFailed { exit_code: Option<i32> },
}

impl BuildOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}
