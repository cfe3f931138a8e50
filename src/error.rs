//! Error types for the weather tools.
//!
//! None of these ever reach the transport as a protocol fault. `FetchError`
//! is turned into degraded text by the handlers, and the `Display` output of
//! `ToolError` is the text returned to the caller.

/// Failure of a single outbound request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The upstream answered with a non-2xx status.
    #[error("HTTP error occurred: {code}")]
    HttpStatus { code: u16 },

    /// Connection, timeout or send failure.
    #[error("Request error occurred: {0}")]
    Transport(String),

    /// Anything else, such as a body that is not JSON.
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::HttpStatus {
                code: status.as_u16(),
            }
        } else if err.is_connect() || err.is_timeout() || err.is_request() {
            FetchError::Transport(err.to_string())
        } else {
            FetchError::Unknown(err.to_string())
        }
    }
}

/// Failure at the tool-call boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolError {
    #[error("Error: unknown tool: {0}")]
    UnknownTool(String),

    #[error("Error: please supply {0}")]
    MissingArgument(&'static str),

    #[error("Error: {field} must be a {expected}")]
    InvalidArgument {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid latitude or longitude values")]
    InvalidCoordinates,

    #[error("Coordinates must be valid numbers")]
    NonNumericCoordinates,

    /// A handler failed for a reason other than bad input.
    #[error("Error: {0}")]
    Handler(String),
}

/// Invalid startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_errors_render_user_facing_text() {
        assert_eq!(
            ToolError::UnknownTool("get_tides".into()).to_string(),
            "Error: unknown tool: get_tides"
        );
        assert_eq!(
            ToolError::MissingArgument("state").to_string(),
            "Error: please supply state"
        );
        assert_eq!(
            ToolError::InvalidCoordinates.to_string(),
            "Invalid latitude or longitude values"
        );
        assert_eq!(
            ToolError::NonNumericCoordinates.to_string(),
            "Coordinates must be valid numbers"
        );
        assert_eq!(
            ToolError::Handler("boom".into()).to_string(),
            "Error: boom"
        );
    }

    #[test]
    fn fetch_error_display() {
        assert_eq!(
            FetchError::HttpStatus { code: 503 }.to_string(),
            "HTTP error occurred: 503"
        );
    }
}
