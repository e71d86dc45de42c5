pub mod constants;

use std::env;
use std::time::Duration;

use crate::speech::Voice;
use constants::{
    DEFAULT_POKEAPI_BASE_URL, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECONDS,
    DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
};

/// Runtime configuration, read from the environment (and `.env` via dotenvy)
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the PokeAPI (`POKEAPI_BASE_URL`)
    pub pokeapi_base_url: String,

    /// Base URL of the speech service (`SPEECH_SERVICE_URL`); speech is disabled when unset
    pub speech_service_url: Option<String>,

    /// Voice used when a request does not pick one (`SPEECH_VOICE`)
    pub default_voice: Voice,

    /// Timeout for a whole inbound HTTP request (`REQUEST_TIMEOUT_SECONDS`)
    pub request_timeout: Duration,

    /// Timeout for each outbound call (`UPSTREAM_TIMEOUT_SECONDS`)
    pub upstream_timeout: Duration,

    /// Listening port in server mode (`PORT`)
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pokeapi_base_url: DEFAULT_POKEAPI_BASE_URL.to_string(),
            speech_service_url: None,
            default_voice: Voice::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECONDS),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("POKEAPI_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.pokeapi_base_url = url.trim().trim_end_matches('/').to_string();
        }

        config.speech_service_url = lookup("SPEECH_SERVICE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        if let Some(voice) = lookup("SPEECH_VOICE").and_then(|v| Voice::from_id(&v)) {
            config.default_voice = voice;
        }

        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECONDS").and_then(|v| v.parse::<u64>().ok()) {
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(secs) = lookup("UPSTREAM_TIMEOUT_SECONDS").and_then(|v| v.parse::<u64>().ok()) {
            config.upstream_timeout = Duration::from_secs(secs);
        }

        if let Some(port) = lookup("PORT").and_then(|v| v.parse::<u16>().ok()) {
            config.port = port;
        }

        config
    }
}
