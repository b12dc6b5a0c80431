//! Error types for route compilation.
//!
//! Only construction can fail. A request path that matches no route is not an
//! error and is reported as `None` by the matcher.

use thiserror::Error;

/// Errors raised while building a route table.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The route template is malformed.
    #[error("invalid route template '{template}': {reason}")]
    InvalidPattern {
        /// The offending template.
        template: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The compiled pattern does not capture one group per parameter name.
    #[error(
        "route template '{template}' declares {names} parameter(s) but its pattern captures {groups} group(s)"
    )]
    CaptureMismatch {
        /// The offending template.
        template: String,
        /// Number of parameter names found in the template.
        names: usize,
        /// Number of capturing groups in the compiled pattern.
        groups: usize,
    },

    /// The regex engine rejected the generated pattern.
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    /// An HTTP method token was not recognised.
    #[error("unknown HTTP method: {0}")]
    UnknownMethod(String),

    /// A route table file could not be parsed.
    #[error("route table config error: {0}")]
    Config(#[from] serde_json::Error),

    /// A route table file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RouterError {
    pub(crate) fn invalid(template: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;
