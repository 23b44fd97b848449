use thiserror::Error;

/// Errors that can occur while talking to the upstream provider.
///
/// The detail strings may carry provider internals; they are for server-side
/// logs only and never part of an HTTP response.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Provider answered 401/403
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Provider answered 429
    #[error("Rate limited: {0}")]
    RateLimited(String),
    /// Provider answered 5xx
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// Any other non-2xx provider answer
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Provider unreachable or timed out
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Request could not be sent or the body could not be read
    #[error("Transport error: {0}")]
    Transport(String),
    /// Success status but the body is not JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// No API credential configured for the provider
    #[error("Missing credential: {0}")]
    MissingCredential(String),
    /// Internal error in connector
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ConnectorError {
    /// True when the provider itself returned an error status; false for
    /// local faults (network, parsing, configuration).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_) | Self::RateLimited(_) | Self::ProviderError(_) | Self::HttpError(_)
        )
    }

    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        let detail = format!("{}: {}", status, body);
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized(detail)
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => Self::RateLimited(detail),
            status if status.is_server_error() => Self::ProviderError(detail),
            _ => Self::HttpError(detail),
        }
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::ServiceUnavailable(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            Self::ServiceUnavailable(format!("Connection failed: {}", err))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_maps_provider_answers() {
        assert!(matches!(
            ConnectorError::from_status(StatusCode::UNAUTHORIZED, "bad key".into()),
            ConnectorError::Unauthorized(_)
        ));
        assert!(matches!(
            ConnectorError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            ConnectorError::RateLimited(_)
        ));
        assert!(matches!(
            ConnectorError::from_status(StatusCode::from_u16(529).unwrap(), "overloaded".into()),
            ConnectorError::ProviderError(_)
        ));
        assert!(matches!(
            ConnectorError::from_status(StatusCode::BAD_REQUEST, String::new()),
            ConnectorError::HttpError(_)
        ));
    }

    #[test]
    fn test_upstream_vs_local_faults() {
        assert!(ConnectorError::ProviderError("x".into()).is_upstream());
        assert!(!ConnectorError::Transport("x".into()).is_upstream());
        assert!(!ConnectorError::InvalidResponse("x".into()).is_upstream());
        assert!(!ConnectorError::MissingCredential("x".into()).is_upstream());
    }
}
