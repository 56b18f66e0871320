#![deny(clippy::pedantic, unsafe_code)]
//! Interactive CMake configure + build for cvbuild
//!
//! This crate collects the build choices from a line-oriented input stream
//! and drives CMake's configure and build steps as child processes.

mod cmake;
mod process;
mod prompt;

pub use cmake::CMakeInvoker;
pub use process::{CommandRunner, CommandStatus, ProcessRunner};
pub use prompt::{
    compile_commands_from_choice, resolve_build_type, resolve_library_path, Prompter,
    SettingsOverrides,
};
