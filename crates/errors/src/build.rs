//! Build tool error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error("failed to launch {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("failed to create build directory {path}: {message}")]
    BuildDirFailed { path: String, message: String },

    #[error("failed to copy {from} to {to}: {message}")]
    ArtifactCopyFailed {
        from: String,
        to: String,
        message: String,
    },
}

impl UserFacingError for BuildError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::SpawnFailed { .. } => {
                Some("Install CMake or point `--cmake` at the executable, then retry.")
            }
            Self::BuildDirFailed { .. } => {
                Some("Ensure the build directory location is writable.")
            }
            Self::ArtifactCopyFailed { .. } => Some(
                "Check that the CMake generator supports CMAKE_EXPORT_COMPILE_COMMANDS \
                 (Makefile and Ninja generators do).",
            ),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::SpawnFailed { .. } => "build.spawn_failed",
            Self::BuildDirFailed { .. } => "build.build_dir_failed",
            Self::ArtifactCopyFailed { .. } => "build.artifact_copy_failed",
        };
        Some(code)
    }
}
