use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("HTTP error: status {status} from {url}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Match {0} came back without participants")]
    EmptyParticipants(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("No matches found for this player")]
    NoMatches,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Giving up on {match_id} after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        match_id: String,
        attempts: u32,
        last_error: String,
    },
}

impl AppError {
    /// Transient failures from the match source. Everything else ends the run.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::HttpError(_)
                | AppError::HttpStatus { .. }
                | AppError::JsonError(_)
                | AppError::EmptyParticipants(_)
                | AppError::RateLimited
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_failures_are_retryable() {
        assert!(AppError::HttpError("503".to_string()).is_retryable());
        assert!(AppError::HttpStatus {
            status: 503,
            url: "https://europe.api.riotgames.com".to_string(),
            body: String::new(),
        }
        .is_retryable());
        assert!(AppError::JsonError("eof".to_string()).is_retryable());
        assert!(AppError::EmptyParticipants("EUW1_1".to_string()).is_retryable());
        assert!(AppError::RateLimited.is_retryable());
    }

    #[test]
    fn test_terminal_errors_are_not_retryable() {
        assert!(!AppError::PlayerNotFound("xico#000".to_string()).is_retryable());
        assert!(!AppError::ConfigError("missing key".to_string()).is_retryable());
        assert!(!AppError::RetriesExhausted {
            match_id: "EUW1_1".to_string(),
            attempts: 5,
            last_error: "HTTP error: 500".to_string(),
        }
        .is_retryable());
    }
}
