use crate::config::BuildMode;
use thiserror::Error;

const BODY_CONTAINER_MESSAGE: &str =
    "you cannot render() to the document body. Use an empty element as a container instead.";
const PRODUCTION_MESSAGE: &str =
    "a runtime error occurred! Use the development build to see the full error message.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationErrorKind {
    /// The container is the document body
    BodyContainer,
    /// A bound renderer was called before any container was pinned
    MissingContainer,
}

impl ConfigurationErrorKind {
    fn describe(self) -> &'static str {
        match self {
            ConfigurationErrorKind::BodyContainer => BODY_CONTAINER_MESSAGE,
            ConfigurationErrorKind::MissingContainer => {
                "a bound renderer needs a container on its first call before it can render."
            }
        }
    }
}

/// Misuse of the render API. Always fatal, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Arbor Error: {message}")]
pub struct ConfigurationError {
    kind: ConfigurationErrorKind,
    message: &'static str,
}

impl ConfigurationError {
    /// Build the error with the message for `mode`: descriptive in
    /// development, generic in production.
    pub fn new(kind: ConfigurationErrorKind, mode: BuildMode) -> Self {
        let message = match mode {
            BuildMode::Development => kind.describe(),
            BuildMode::Production => PRODUCTION_MESSAGE,
        };
        Self { kind, message }
    }

    pub fn kind(&self) -> ConfigurationErrorKind {
        self.kind
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Raised by a reconciler or a lifecycle callback, passed through as is
    #[error(transparent)]
    Delegated(#[from] anyhow::Error),
}

impl RenderError {
    pub fn configuration_kind(&self) -> Option<ConfigurationErrorKind> {
        match self {
            RenderError::Configuration(err) => Some(err.kind()),
            RenderError::Delegated(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_message_is_descriptive() {
        let err =
            ConfigurationError::new(ConfigurationErrorKind::BodyContainer, BuildMode::Development);
        assert!(err.to_string().contains("document body"));
    }

    #[test]
    fn test_production_message_is_terse() {
        let err =
            ConfigurationError::new(ConfigurationErrorKind::BodyContainer, BuildMode::Production);
        assert!(!err.to_string().contains("document body"));
        assert_eq!(err.kind(), ConfigurationErrorKind::BodyContainer);
    }

    #[test]
    fn test_delegated_error_is_transparent() {
        let err = RenderError::from(anyhow::anyhow!("mount failed"));
        assert_eq!(err.to_string(), "mount failed");
        assert!(err.configuration_kind().is_none());
    }
}
