//! Error types for the resize controller

/// Errors returned by controller construction and platform calls.
///
/// Malformed options are never errors: unknown handle tokens are dropped and
/// an unusable threshold falls back to the default.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResizeError {
    /// No target was supplied.
    #[error("the target parameter is required")]
    MissingTarget,

    /// A selector target matched no element.
    #[error("no element matches selector {selector:?}")]
    TargetNotFound { selector: String },

    /// Options supplied by a script host could not be read.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A platform operation (element creation, styling, listener binding) failed.
    #[error("platform error: {0}")]
    Platform(String),
}

impl ResizeError {
    /// Build a platform error from any displayable cause
    pub fn platform(cause: impl std::fmt::Display) -> Self {
        ResizeError::Platform(cause.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ResizeError::MissingTarget.to_string(), "the target parameter is required");
        assert_eq!(
            ResizeError::TargetNotFound { selector: "#box".to_string() }.to_string(),
            "no element matches selector \"#box\""
        );
        assert_eq!(ResizeError::platform("detached").to_string(), "platform error: detached");
    }
}
