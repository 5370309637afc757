//! Error type for media session queries

use std::time::Duration;

/// Result type alias for media session queries
pub type Result<T> = std::result::Result<T, QueryError>;

/// Errors that can occur while querying the OS media session subsystem.
///
/// Having no active session is not an error; queries report it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The session manager could not be obtained from the OS
    #[error("media session manager unavailable: {0}")]
    ManagerUnavailable(String),

    /// A call on the session manager or a session failed
    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },

    /// The query did not complete in time
    #[error("media session query timed out after {0:?}")]
    Timeout(Duration),

    /// The host has no media session subsystem
    #[error("media session detection is not supported on this platform")]
    Unsupported,
}

impl QueryError {
    /// Build a [`QueryError::Api`] for a failed call
    pub fn api(operation: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Api {
            operation,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message() {
        let err = QueryError::api("GetPlaybackInfo", "access denied");
        assert_eq!(err.to_string(), "GetPlaybackInfo failed: access denied");
    }

    #[test]
    fn test_timeout_message() {
        let err = QueryError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "media session query timed out after 5s");
    }
}
