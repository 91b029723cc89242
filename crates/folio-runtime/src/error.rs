#![forbid(unsafe_code)]

use thiserror::Error;

use folio_style::ParseError;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors from loading or applying a [`MotionConfig`](crate::config::MotionConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("TOML encode error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid style value: {0}")]
    Style(#[from] ParseError),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

impl ConfigError {
    /// Problems found by validation, if that is what failed.
    #[must_use]
    pub fn problems(&self) -> &[String] {
        match self {
            Self::Validation(problems) => problems,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_lists_every_problem() {
        let error = ConfigError::Validation(vec!["a must be > 0".into(), "b is empty".into()]);
        assert_eq!(
            error.to_string(),
            "validation errors: a must be > 0; b is empty"
        );
        assert_eq!(error.problems().len(), 2);
    }

    #[test]
    fn style_errors_convert() {
        let parse = folio_style::StyleValue::parse("").unwrap_err();
        let error: ConfigError = parse.into();
        assert!(error.to_string().starts_with("invalid style value"));
        assert!(error.problems().is_empty());
    }
}
