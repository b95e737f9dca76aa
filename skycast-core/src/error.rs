use thiserror::Error;

/// Errors produced by provider construction and payload normalization.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Invalid or unsupported configuration: a bad unit-system selector,
    /// a missing API key. Surfaced before any payload is parsed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The payload could not be parsed, or a required section is missing
    /// or has the wrong type. `section` names the part that failed.
    #[error("malformed payload in `{section}`: {reason}")]
    MalformedPayload {
        section: &'static str,
        reason: String,
    },

    /// The provider variant does not implement this operation. Calling it
    /// is a programming error, not a runtime condition to branch on.
    #[error("operation not supported by this provider: {0}")]
    Unsupported(&'static str),
}

impl ProviderError {
    pub fn malformed(section: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedPayload { section, reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_error_names_the_failing_section() {
        let err = ProviderError::malformed("hourly", "`data` must be an array");
        let msg = err.to_string();
        assert!(msg.contains("`hourly`"));
        assert!(msg.contains("must be an array"));
    }

    #[test]
    fn unsupported_error_names_the_operation() {
        let err = ProviderError::Unsupported("city search");
        assert!(err.to_string().contains("city search"));
    }
}
