//! Line-oriented prompts for the three build choices
//!
//! Unrecognised selections never fail: they fall back to the default and a
//! notice is printed. Only I/O failures on the streams are errors.

use cvbuild_errors::{Error, PromptError};
use cvbuild_types::{BuildSettings, BuildType};
use std::io::{BufRead, Write};

/// Values already decided elsewhere (CLI flags); `None` means ask
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub build_type: Option<BuildType>,
    pub library_path: Option<String>,
    pub compile_commands: Option<bool>,
}

/// Build type for a raw menu answer, `Release` unless the answer is `"1"`
#[must_use]
pub fn resolve_build_type(choice: &str) -> BuildType {
    BuildType::from_choice(choice.trim()).unwrap_or_default()
}

/// Trimmed answer, or `default` when nothing was entered
#[must_use]
pub fn resolve_library_path(input: &str, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `Some(true)` for "1", `Some(false)` for "2", `None` otherwise
#[must_use]
pub fn compile_commands_from_choice(choice: &str) -> Option<bool> {
    match choice {
        "1" => Some(true),
        "2" => Some(false),
        _ => None,
    }
}

/// Asks questions on `output` and reads answers from `input`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Gather all three settings, prompting only for the ones not overridden
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing a prompt fails.
    pub fn gather(
        &mut self,
        overrides: SettingsOverrides,
        default_library_path: &str,
    ) -> Result<BuildSettings, Error> {
        let build_type = match overrides.build_type {
            Some(build_type) => build_type,
            None => self.build_type()?,
        };
        let library_path = match overrides.library_path {
            Some(path) => path,
            None => self.library_path(default_library_path)?,
        };
        let compile_commands = match overrides.compile_commands {
            Some(flag) => flag,
            None => self.compile_commands()?,
        };

        Ok(BuildSettings {
            build_type,
            library_path,
            compile_commands,
        })
    }

    /// Ask for the build type
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing the prompt fails.
    pub fn build_type(&mut self) -> Result<BuildType, Error> {
        self.say("\nSelect build type (default: Release):\n1. Debug\n2. Release\n")?;
        let choice = self.ask("Enter choice (1/2): ", "build type")?;

        let build_type = if let Some(build_type) = BuildType::from_choice(&choice) {
            build_type
        } else {
            tracing::debug!(choice = %choice, "unrecognised build type selection");
            self.say("Incorrect build type selected. Defaulting to Release\n")?;
            BuildType::default()
        };

        self.say(&format!("Build type: {build_type}\n"))?;
        Ok(build_type)
    }

    /// Ask for the library install directory
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing the prompt fails.
    pub fn library_path(&mut self, default: &str) -> Result<String, Error> {
        let answer = self.ask(
            &format!("\nEnter the full path to the OpenCV directory (default: {default}): "),
            "library path",
        )?;
        let path = resolve_library_path(&answer, default);

        self.say(&format!("OpenCV path: {path}\n"))?;
        Ok(path)
    }

    /// Ask whether to export `compile_commands.json`
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing the prompt fails.
    pub fn compile_commands(&mut self) -> Result<bool, Error> {
        self.say("\nSelect if generate compile_commands.json (default: Yes)\n1. Yes\n2. No\n")?;
        let choice = self.ask("Enter choice (1/2): ", "compile commands choice")?;

        let flag = if let Some(flag) = compile_commands_from_choice(&choice) {
            flag
        } else {
            tracing::debug!(choice = %choice, "unrecognised compile commands selection");
            self.say("Incorrect compile commands selected. Defaulting to True\n")?;
            true
        };

        self.say(&format!("Compile commands: {flag}\n"))?;
        Ok(flag)
    }

    /// Give back the output stream
    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `question` and return the trimmed answer; end of input reads as empty
    fn ask(&mut self, question: &str, field: &str) -> Result<String, Error> {
        self.say(question)?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(|e| PromptError::ReadFailed {
                field: field.to_string(),
                message: e.to_string(),
            })?;

        Ok(line.trim().to_string())
    }

    fn say(&mut self, text: &str) -> Result<(), Error> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|e| {
                Error::from(PromptError::WriteFailed {
                    message: e.to_string(),
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn gather(input: &str) -> (BuildSettings, String) {
        let mut prompter = prompter(input);
        let settings = prompter
            .gather(SettingsOverrides::default(), "C:/opencv/build")
            .unwrap();
        let output = String::from_utf8(prompter.into_output()).unwrap();
        (settings, output)
    }

    #[test]
    fn build_type_choices() {
        assert_eq!(resolve_build_type("1"), BuildType::Debug);
        assert_eq!(resolve_build_type("2"), BuildType::Release);
        for junk in ["", "   ", "3", "0", "x", "Debug", "debug", "12", "1.0"] {
            assert_eq!(resolve_build_type(junk), BuildType::Release, "input {junk:?}");
        }
    }

    #[test]
    fn compile_commands_choices() {
        assert_eq!(compile_commands_from_choice("1"), Some(true));
        assert_eq!(compile_commands_from_choice("2"), Some(false));
        for junk in ["", "3", "yes", "no", "y", "n"] {
            assert_eq!(compile_commands_from_choice(junk), None, "input {junk:?}");
        }
    }

    #[test]
    fn library_path_defaults_only_when_blank() {
        assert_eq!(resolve_library_path("", "/def"), "/def");
        assert_eq!(resolve_library_path("  \t ", "/def"), "/def");
        assert_eq!(resolve_library_path("/custom/path", "/def"), "/custom/path");
        assert_eq!(resolve_library_path("  /custom/path \n", "/def"), "/custom/path");
        assert_eq!(resolve_library_path("/does/not/exist", "/def"), "/does/not/exist");
    }

    #[test]
    fn release_with_defaults() {
        let (settings, output) = gather("2\n\n1\n");

        assert_eq!(settings.build_type, BuildType::Release);
        assert_eq!(settings.library_path, "C:/opencv/build");
        assert!(settings.compile_commands);
        assert!(output.contains("Build type: Release"));
        assert!(output.contains("OpenCV path: C:/opencv/build"));
        assert!(output.contains("Compile commands: true"));
        assert!(!output.contains("Incorrect"));
    }

    #[test]
    fn debug_with_custom_path_and_no_database() {
        let (settings, _) = gather("1\n/custom/path\n2\n");

        assert_eq!(settings.build_type, BuildType::Debug);
        assert_eq!(settings.library_path, "/custom/path");
        assert!(!settings.compile_commands);
    }

    #[test]
    fn garbage_choices_fall_back_with_a_notice() {
        let (settings, output) = gather("x\nx\nx\n");

        assert_eq!(settings.build_type, BuildType::Release);
        assert_eq!(settings.library_path, "x");
        assert!(settings.compile_commands);
        assert!(output.contains("Incorrect build type selected. Defaulting to Release"));
        assert!(output.contains("Incorrect compile commands selected. Defaulting to True"));
    }

    #[test]
    fn windows_line_endings_are_trimmed() {
        let (settings, _) = gather("1\r\nD:\\opencv\\build\r\n2\r\n");

        assert_eq!(settings.build_type, BuildType::Debug);
        assert_eq!(settings.library_path, "D:\\opencv\\build");
        assert!(!settings.compile_commands);
    }

    #[test]
    fn exhausted_input_uses_defaults() {
        let (settings, _) = gather("");

        assert_eq!(settings.build_type, BuildType::Release);
        assert_eq!(settings.library_path, "C:/opencv/build");
        assert!(settings.compile_commands);
    }

    #[test]
    fn overrides_skip_their_prompts() {
        let mut prompter = prompter("/from/stdin\n");
        let overrides = SettingsOverrides {
            build_type: Some(BuildType::Debug),
            library_path: None,
            compile_commands: Some(false),
        };

        let settings = prompter.gather(overrides, "C:/opencv/build").unwrap();
        let output = String::from_utf8(prompter.into_output()).unwrap();

        assert_eq!(settings.build_type, BuildType::Debug);
        assert_eq!(settings.library_path, "/from/stdin");
        assert!(!settings.compile_commands);
        assert!(!output.contains("Select build type"));
        assert!(!output.contains("compile_commands.json"));
        assert!(output.contains("Enter the full path to the OpenCV directory"));
    }

    #[test]
    fn read_failure_is_reported() {
        struct Broken;

        impl std::io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("stdin closed"))
            }
        }

        let mut prompter = Prompter::new(std::io::BufReader::new(Broken), Vec::new());
        let err = prompter.build_type().unwrap_err();

        assert!(matches!(err, Error::Prompt(PromptError::ReadFailed { .. })));
    }
}
