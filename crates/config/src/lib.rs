#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for cvbuild
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/cvbuild/config.toml)
//! - Environment variables
//!
//! CLI flags are applied last by the binary.

pub mod constants;

use cvbuild_errors::{ConfigError, Error};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,
}

/// How CMake is invoked
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    /// CMake executable, looked up on `PATH` when not absolute
    #[serde(default = "default_cmake")]
    pub cmake: String,
    /// Out-of-source build directory, relative to the invocation directory
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
    /// Project sources as seen from the build directory
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    /// CMake cache variable that receives the library path
    #[serde(default = "default_library_var")]
    pub library_var: String,
    /// Used when the library path prompt is left empty
    #[serde(default = "default_library_path")]
    pub default_library_path: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            cmake: default_cmake(),
            build_dir: default_build_dir(),
            source_dir: default_source_dir(),
            library_var: default_library_var(),
            default_library_path: default_library_path(),
        }
    }
}

// Default value functions for serde
fn default_cmake() -> String {
    constants::CMAKE_PROGRAM.to_string()
}

fn default_build_dir() -> PathBuf {
    PathBuf::from(constants::BUILD_DIR)
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(constants::SOURCE_DIR)
}

fn default_library_var() -> String {
    constants::LIBRARY_VAR.to_string()
}

fn default_library_path() -> String {
    constants::DEFAULT_LIBRARY_PATH.to_string()
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir
            .join(constants::APP_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        let config = toml::from_str(&contents).map_err(ConfigError::from)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        // No config dir on this platform just means no config file
        let Ok(config_path) = Self::default_path() else {
            return Ok(Self::default());
        };

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a recognised variable is set to an empty value.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        self.merge_env_from(|name| std::env::var(name).ok())
    }

    /// Merge overrides from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns an error if a recognised variable is set to an empty value.
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        // CVBUILD_CMAKE
        if let Some(cmake) = lookup("CVBUILD_CMAKE") {
            self.build.cmake = non_empty("CVBUILD_CMAKE", cmake)?;
        }

        // CVBUILD_BUILD_DIR
        if let Some(dir) = lookup("CVBUILD_BUILD_DIR") {
            self.build.build_dir = PathBuf::from(non_empty("CVBUILD_BUILD_DIR", dir)?);
        }

        // CVBUILD_OPENCV_DIR
        if let Some(path) = lookup("CVBUILD_OPENCV_DIR") {
            self.build.default_library_path = non_empty("CVBUILD_OPENCV_DIR", path)?;
        }

        Ok(())
    }
}

fn non_empty(field: &str, value: String) -> Result<String, Error> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_the_stock_project_layout() {
        let config = Config::default();

        assert_eq!(config.build.cmake, "cmake");
        assert_eq!(config.build.build_dir, PathBuf::from("build"));
        assert_eq!(config.build.source_dir, PathBuf::from(".."));
        assert_eq!(config.build.library_var, "OpenCV_DIR");
        assert_eq!(config.build.default_library_path, "C:/opencv/build");
    }

    #[tokio::test]
    async fn partial_file_keeps_remaining_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[build]\ncmake = \"/usr/local/bin/cmake\"\ndefault_library_path = \"/opt/opencv\"\n",
        )
        .await
        .unwrap();

        let config = Config::load_from_file(&path).await.unwrap();

        assert_eq!(config.build.cmake, "/usr/local/bin/cmake");
        assert_eq!(config.build.default_library_path, "/opt/opencv");
        assert_eq!(config.build.build_dir, PathBuf::from("build"));
        assert_eq!(config.build.library_var, "OpenCV_DIR");
    }

    #[tokio::test]
    async fn missing_explicit_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nope.toml");

        let err = Config::load_or_default(Some(path.as_path())).await.unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotFound { .. })));
    }

    #[tokio::test]
    async fn malformed_file_is_a_parse_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[build\ncmake = 1").await.unwrap();

        let err = Config::load_from_file(&path).await.unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError { .. })));
    }

    #[test]
    fn env_overrides_file_values() {
        let vars = HashMap::from([
            ("CVBUILD_CMAKE", "cmake3"),
            ("CVBUILD_BUILD_DIR", "out"),
            ("CVBUILD_OPENCV_DIR", "/usr/lib/cmake/opencv4"),
        ]);
        let mut config = Config::default();

        config
            .merge_env_from(|name| vars.get(name).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.build.cmake, "cmake3");
        assert_eq!(config.build.build_dir, PathBuf::from("out"));
        assert_eq!(config.build.default_library_path, "/usr/lib/cmake/opencv4");
    }

    #[test]
    fn empty_env_value_is_rejected() {
        let mut config = Config::default();

        let err = config
            .merge_env_from(|name| (name == "CVBUILD_CMAKE").then(|| "  ".to_string()))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { ref field, .. }) if field == "CVBUILD_CMAKE"
        ));
        assert_eq!(config.build.cmake, "cmake");
    }
}
