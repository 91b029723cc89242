#![forbid(unsafe_code)]

use thiserror::Error;

/// Style text that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty style value")]
    Empty,

    #[error("invalid color: {input:?}")]
    Color { input: String },

    #[error("invalid gradient {input:?}: {reason}")]
    Gradient { input: String, reason: &'static str },
}

impl ParseError {
    pub(crate) fn color(input: &str) -> Self {
        Self::Color {
            input: input.to_owned(),
        }
    }

    pub(crate) fn gradient(input: &str, reason: &'static str) -> Self {
        Self::Gradient {
            input: input.to_owned(),
            reason,
        }
    }

    /// The offending input, if any.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Color { input } | Self::Gradient { input, .. } => Some(input),
        }
    }
}
