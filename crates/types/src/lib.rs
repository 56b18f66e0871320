#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for cvbuild
//!
//! Value types shared between the prompter, the CMake invoker and the CLI.

pub mod command;
pub mod settings;

pub use command::CommandLine;
pub use settings::{BuildOutcome, BuildSettings};

use serde::{Deserialize, Serialize};

/// CMake build profile forwarded as `CMAKE_BUILD_TYPE` and `--config`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
}

impl BuildType {
    /// Map a menu selection to a build type.
    ///
    /// Returns `None` for anything that is not an exact menu entry, leaving
    /// the fallback decision to the caller.
    #[must_use]
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Self::Debug),
            "2" => Some(Self::Release),
            _ => None,
        }
    }

    /// Name as CMake expects it
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
