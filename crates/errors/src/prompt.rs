//! Interactive input errors

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum PromptError {
    #[error("failed to read {field}: {message}")]
    ReadFailed { field: String, message: String },

    #[error("failed to write prompt: {message}")]
    WriteFailed { message: String },
}

impl UserFacingError for PromptError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::ReadFailed { .. } => {
                Some("Supply the value with a command line flag when stdin is not a terminal.")
            }
            Self::WriteFailed { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::ReadFailed { .. } => "prompt.read_failed",
            Self::WriteFailed { .. } => "prompt.write_failed",
        };
        Some(code)
    }
}
