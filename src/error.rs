//! Error types for the query-parameter rewrite policy.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Rewrite policy errors.
///
/// Both variants abort the apply and surface to the policy chain; there is
/// nothing to retry inside a pure in-memory transformation.
#[derive(Error, Debug)]
pub enum Error {
    /// The expression engine failed to resolve a directive's name or value.
    #[error("failed to render '{expression}': {reason}")]
    Render {
        /// The raw directive string that failed to render.
        expression: String,
        /// Renderer-supplied failure reason.
        reason: String,
    },

    /// Malformed directive data reaching the transformer.
    ///
    /// A configuration defect, not a per-request condition: fail fast
    /// rather than silently skip the directive.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a render error for a directive string.
    pub fn render(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Render {
            expression: expression.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_names_the_expression() {
        let err = Error::render("{{attrs.missing}}", "unknown reference");
        let msg = err.to_string();
        assert!(msg.contains("{{attrs.missing}}"));
        assert!(msg.contains("unknown reference"));
    }

    #[test]
    fn config_error_carries_message() {
        let err = Error::Config("blank parameter name".to_string());
        assert_eq!(err.to_string(), "configuration error: blank parameter name");
    }
}
