//! Built-in defaults
//!
//! The file names below are what CMake itself produces and are not
//! configurable.

pub const CMAKE_PROGRAM: &str = "cmake";
pub const BUILD_DIR: &str = "build";
/// Project source directory as seen from inside the build directory
pub const SOURCE_DIR: &str = "..";

pub const LIBRARY_VAR: &str = "OpenCV_DIR";
pub const DEFAULT_LIBRARY_PATH: &str = "C:/opencv/build";

pub const COMPILE_COMMANDS_FILE: &str = "compile_commands.json";

pub const APP_DIR_NAME: &str = "cvbuild";
pub const CONFIG_FILE_NAME: &str = "config.toml";
