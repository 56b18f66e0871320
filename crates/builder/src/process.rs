//! Child process execution
//!
//! Commands run with inherited stdio so the tool's own output streams
//! straight to the terminal. The working directory is always passed to the
//! child explicitly; the parent's current directory is left alone.

use async_trait::async_trait;
use cvbuild_errors::{BuildError, Error};
use cvbuild_types::CommandLine;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Exit status of a finished child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// `None` when the child was terminated by a signal
    pub exit_code: Option<i32>,
}

impl CommandStatus {
    #[must_use]
    pub fn success(self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Something that can run a command line to completion
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` inside `working_dir` and wait for it to exit
    ///
    /// A non-zero exit is reported through [`CommandStatus`], not as an error.
    async fn run(&self, command: &CommandLine, working_dir: &Path)
        -> Result<CommandStatus, Error>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        command: &CommandLine,
        working_dir: &Path,
    ) -> Result<CommandStatus, Error> {
        tracing::debug!(
            command = %command,
            working_dir = %working_dir.display(),
            "spawning"
        );

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| BuildError::SpawnFailed {
                program: command.program.clone(),
                message: e.to_string(),
            })?;

        let result = CommandStatus {
            exit_code: status.code(),
        };
        tracing::debug!(program = %command.program, exit_code = ?result.exit_code, "exited");
        Ok(result)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sh(script: &str) -> CommandLine {
        CommandLine::new("sh").arg("-c").arg(script)
    }

    #[tokio::test]
    async fn reports_exit_codes() {
        let temp = tempdir().unwrap();

        let ok = ProcessRunner.run(&sh("exit 0"), temp.path()).await.unwrap();
        let failed = ProcessRunner.run(&sh("exit 3"), temp.path()).await.unwrap();

        assert!(ok.success());
        assert_eq!(failed.exit_code, Some(3));
        assert!(!failed.success());
    }

    #[tokio::test]
    async fn runs_inside_the_given_directory() {
        let temp = tempdir().unwrap();
        let before = std::env::current_dir().unwrap();

        let status = ProcessRunner
            .run(&sh("touch marker"), temp.path())
            .await
            .unwrap();

        assert!(status.success());
        assert!(temp.path().join("marker").exists());
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let temp = tempdir().unwrap();
        let cmd = CommandLine::new("cvbuild-definitely-not-a-real-program");

        let err = ProcessRunner.run(&cmd, temp.path()).await.unwrap_err();

        assert!(matches!(err, Error::Build(BuildError::SpawnFailed { .. })));
    }

    #[test]
    fn signal_death_is_not_success() {
        assert!(!CommandStatus { exit_code: None }.success());
    }
}
