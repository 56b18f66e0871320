//! Command line interface definition

use clap::Parser;
use cvbuild_builder::{resolve_library_path, SettingsOverrides};
use cvbuild_types::BuildType;
use std::path::PathBuf;

/// Configure and build an OpenCV project with CMake
///
/// Any choice not given as a flag is asked for interactively.
#[derive(Parser, Debug)]
#[command(name = "cvbuild")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Build type, skips the build type prompt
    #[arg(long, value_enum, value_name = "TYPE")]
    pub build_type: Option<BuildType>,

    /// OpenCV install directory, skips the path prompt
    #[arg(long, value_name = "PATH")]
    pub opencv_dir: Option<String>,

    /// Export compile_commands.json, skips the prompt
    #[arg(long, conflicts_with = "no_compile_commands")]
    pub compile_commands: bool,

    /// Do not export compile_commands.json, skips the prompt
    #[arg(long)]
    pub no_compile_commands: bool,

    /// CMake executable to run
    #[arg(long, value_name = "PROGRAM")]
    pub cmake: Option<String>,

    /// Build directory, relative to the current directory
    #[arg(long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write debug logs to a file
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Choices that were settled on the command line
    pub fn overrides(&self, default_library_path: &str) -> SettingsOverrides {
        let compile_commands = if self.compile_commands {
            Some(true)
        } else if self.no_compile_commands {
            Some(false)
        } else {
            None
        };

        SettingsOverrides {
            build_type: self.build_type,
            library_path: self
                .opencv_dir
                .as_deref()
                .map(|path| resolve_library_path(path, default_library_path)),
            compile_commands,
        }
    }
}
