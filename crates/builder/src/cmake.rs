//! CMake configure + build invocation

use crate::process::CommandRunner;
use cvbuild_config::{constants, BuildConfig};
use cvbuild_errors::{BuildError, Error};
use cvbuild_types::{BuildOutcome, BuildSettings, BuildType, CommandLine};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;

const EXPORT_COMPILE_COMMANDS: &str = "-DCMAKE_EXPORT_COMPILE_COMMANDS=ON";
const SUPPRESS_DEV_WARNINGS: &str = "-Wno-dev";

/// Out-of-source CMake configure and build of one project
#[derive(Debug, Clone)]
pub struct CMakeInvoker {
    program: String,
    build_dir: PathBuf,
    source_dir: PathBuf,
    library_var: String,
}

impl CMakeInvoker {
    /// Invoker for the project rooted at `project_dir`
    #[must_use]
    pub fn new(config: &BuildConfig, project_dir: &Path) -> Self {
        Self {
            program: config.cmake.clone(),
            build_dir: project_dir.join(&config.build_dir),
            source_dir: config.source_dir.clone(),
            library_var: config.library_var.clone(),
        }
    }

    /// Directory both commands run in
    #[must_use]
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// `cmake <src> -D<var>=<path> -DCMAKE_BUILD_TYPE=<type> [export] -Wno-dev`
    #[must_use]
    pub fn configure_command(&self, settings: &BuildSettings) -> CommandLine {
        let mut cmd = CommandLine::new(&self.program)
            .arg(self.source_dir.display().to_string())
            .arg(format!("-D{}={}", self.library_var, settings.library_path))
            .arg(format!("-DCMAKE_BUILD_TYPE={}", settings.build_type));

        if settings.compile_commands {
            cmd = cmd.arg(EXPORT_COMPILE_COMMANDS);
        }

        cmd.arg(SUPPRESS_DEV_WARNINGS)
    }

    /// `cmake --build . --config <type>`
    #[must_use]
    pub fn build_command(&self, build_type: BuildType) -> CommandLine {
        CommandLine::new(&self.program)
            .arg("--build")
            .arg(".")
            .arg("--config")
            .arg(build_type.as_str())
    }

    /// Where CMake writes the compile database and where it is copied to
    #[must_use]
    pub fn compile_commands_paths(&self) -> (PathBuf, PathBuf) {
        (
            self.build_dir.join(constants::COMPILE_COMMANDS_FILE),
            self.build_dir
                .join(&self.source_dir)
                .join(constants::COMPILE_COMMANDS_FILE),
        )
    }

    /// Configure, then build, then copy the compile database if requested
    ///
    /// A non-zero exit from either step ends the run with a failed
    /// [`BuildOutcome`]; the build step is never attempted after a failed
    /// configure.
    ///
    /// # Errors
    ///
    /// Returns an error if the build directory cannot be created, CMake cannot
    /// be launched, status output cannot be written, or the compile database
    /// is missing when it has to be copied.
    pub async fn run<R, W>(
        &self,
        runner: &R,
        settings: &BuildSettings,
        out: &mut W,
    ) -> Result<BuildOutcome, Error>
    where
        R: CommandRunner + ?Sized,
        W: Write,
    {
        writeln!(
            out,
            "\nRunning CMake to configure and build the project..."
        )?;

        fs::create_dir_all(&self.build_dir)
            .await
            .map_err(|e| BuildError::BuildDirFailed {
                path: self.build_dir.display().to_string(),
                message: e.to_string(),
            })?;

        let configure = self.configure_command(settings);
        let build = self.build_command(settings.build_type);

        writeln!(out, "CONFIGURE:  {configure}")?;
        writeln!(out, "BUILD:  {build}")?;
        writeln!(out, "\n")?;
        out.flush()?;

        tracing::info!(build_dir = %self.build_dir.display(), "configuring");
        let status = runner.run(&configure, &self.build_dir).await?;
        if !status.success() {
            tracing::warn!(exit_code = ?status.exit_code, "configure step failed");
            writeln!(out, "Error: CMake configuration failed!")?;
            return Ok(BuildOutcome::ConfigureFailed {
                exit_code: status.exit_code,
            });
        }

        tracing::info!(build_type = %settings.build_type, "building");
        let status = runner.run(&build, &self.build_dir).await?;
        if !status.success() {
            tracing::warn!(exit_code = ?status.exit_code, "build step failed");
            writeln!(out, "Error: CMake build failed!")?;
            return Ok(BuildOutcome::BuildFailed {
                exit_code: status.exit_code,
            });
        }

        let compile_commands = if settings.compile_commands {
            Some(self.copy_compile_commands().await?)
        } else {
            None
        };

        writeln!(out, "CMake configuration and build succeeded!")?;
        Ok(BuildOutcome::Succeeded { compile_commands })
    }

    /// Copy the compile database next to the sources, replacing any old one
    async fn copy_compile_commands(&self) -> Result<PathBuf, Error> {
        let (from, to) = self.compile_commands_paths();

        fs::copy(&from, &to)
            .await
            .map_err(|e| BuildError::ArtifactCopyFailed {
                from: from.display().to_string(),
                to: to.display().to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!(to = %to.display(), "copied compile database");
        Ok(to)
    }
}
