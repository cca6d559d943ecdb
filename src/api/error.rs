//! Error taxonomy for backend calls

/// Failures surfaced by the portal API client
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a usable response
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("server rejected the request (status {status})")]
    Rejected { status: u16, message: Option<String> },

    /// The response body did not match the expected shape
    #[error("invalid response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message to show the user: the server-provided one when present,
    /// otherwise the given fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 401 | 403, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_wins_over_fallback() {
        let err = ApiError::Rejected {
            status: 400,
            message: Some("Hall already booked".into()),
        };
        assert_eq!(err.user_message("generic"), "Hall already booked");
    }

    #[test]
    fn test_fallback_used_when_no_server_message() {
        let err = ApiError::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("generic"), "generic");

        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.user_message("generic"), "generic");
    }

    #[test]
    fn test_unauthorized_detection() {
        let unauthorized = ApiError::Rejected {
            status: 401,
            message: None,
        };
        assert!(unauthorized.is_unauthorized());
        let other = ApiError::Rejected {
            status: 404,
            message: None,
        };
        assert!(!other.is_unauthorized());
    }
}
