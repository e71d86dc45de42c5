use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;

#[derive(Debug)]
pub enum PokedexError {
    // I/O errors
    Io(std::io::Error),

    // Upstream (PokeAPI / speech service) errors
    Http(String),
    NotFound(String),
    Upstream(String),
    MissingDescription(String),

    // Request validation errors
    InvalidRequest(String),
    EmptyText,
    TextTooLong(usize),

    // Speech and playback errors
    SpeechUnavailable,
    AudioParsing(String),
    InvalidTransition { from: String, trigger: String },
    Cancelled,

    // Internal errors
    Unknown(String),
}

impl fmt::Display for PokedexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PokedexError::Io(e) => write!(f, "I/O error: {}", e),
            PokedexError::Http(msg) => write!(f, "HTTP error: {}", msg),
            PokedexError::NotFound(what) => write!(f, "Not found: {}", what),
            PokedexError::Upstream(msg) => write!(f, "Upstream error: {}", msg),
            PokedexError::MissingDescription(name) => {
                write!(f, "No English description available for {}", name)
            }
            PokedexError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            PokedexError::EmptyText => write!(f, "Text cannot be empty"),
            PokedexError::TextTooLong(len) => write!(
                f,
                "Text too long: {} characters (max {})",
                len,
                crate::config::constants::MAX_TEXT_LENGTH
            ),
            PokedexError::SpeechUnavailable => write!(f, "Speech service is not configured"),
            PokedexError::AudioParsing(msg) => write!(f, "Audio parsing error: {}", msg),
            PokedexError::InvalidTransition { from, trigger } => {
                write!(f, "Cannot apply '{}' while playback is {}", trigger, from)
            }
            PokedexError::Cancelled => write!(f, "Playback request was cancelled"),
            PokedexError::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl std::error::Error for PokedexError {}

// Conversions
impl From<std::io::Error> for PokedexError {
    fn from(err: std::io::Error) -> Self {
        PokedexError::Io(err)
    }
}

impl From<reqwest::Error> for PokedexError {
    fn from(err: reqwest::Error) -> Self {
        PokedexError::Http(err.to_string())
    }
}

impl From<hound::Error> for PokedexError {
    fn from(err: hound::Error) -> Self {
        PokedexError::AudioParsing(err.to_string())
    }
}

impl PokedexError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            PokedexError::EmptyText
            | PokedexError::TextTooLong(_)
            | PokedexError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PokedexError::NotFound(_) | PokedexError::MissingDescription(_) => {
                StatusCode::NOT_FOUND
            }
            PokedexError::SpeechUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            PokedexError::Http(_) | PokedexError::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Axum integration
impl IntoResponse for PokedexError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", self);
            "Internal server error".to_string()
        } else {
            if status == StatusCode::BAD_GATEWAY {
                tracing::warn!("Upstream failure: {}", self);
            }
            self.to_string()
        };

        (
            status,
            axum::Json(serde_json::json!({
                "status": "error",
                "error": message
            })),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, PokedexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_errors_map_to_bad_request() {
        assert_eq!(PokedexError::EmptyText.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            PokedexError::TextTooLong(20_000).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PokedexError::InvalidRequest("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_missing_records_map_to_not_found() {
        assert_eq!(
            PokedexError::NotFound("missingno".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PokedexError::MissingDescription("pikachu".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_speech_unavailable_maps_to_503() {
        let response = PokedexError::SpeechUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_upstream_maps_to_bad_gateway() {
        assert_eq!(
            PokedexError::Upstream("500".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let response = PokedexError::Unknown("secret detail".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(PokedexError::EmptyText.to_string(), "Text cannot be empty");
        assert_eq!(
            PokedexError::InvalidTransition {
                from: "idle".to_string(),
                trigger: "stop".to_string()
            }
            .to_string(),
            "Cannot apply 'stop' while playback is idle"
        );
        assert!(PokedexError::TextTooLong(10_001)
            .to_string()
            .contains("10001"));
    }
}
