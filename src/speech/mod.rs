pub mod duration;
pub mod playback;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{PokedexError, Result};

pub use playback::{PlaybackHandle, PlaybackState, PlaybackTrigger};

/// Narrator voice understood by the speech service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Voice {
    #[default]
    Male,
    Female,
}

impl Voice {
    /// Identifier sent on the wire
    pub const fn id(&self) -> &'static str {
        match self {
            Voice::Male => "MALE",
            Voice::Female => "FEMALE",
        }
    }

    /// Parse a voice identifier, ignoring case and surrounding whitespace
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::all()
            .into_iter()
            .find(|voice| voice.id().eq_ignore_ascii_case(id))
    }

    pub const fn all() -> [Voice; 2] {
        [Voice::Male, Voice::Female]
    }
}

/// Something that turns text into WAV audio
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice: Voice) -> Result<Bytes>;
}

/// Client for the external speech service
///
/// Calls `GET {base}/pokedex/?text=..&voice=..` and returns the response body.
#[derive(Debug, Clone)]
pub struct HttpSpeechClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpSpeechClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut endpoint = Url::parse(base_url).map_err(|e| {
            PokedexError::InvalidRequest(format!("Invalid speech service URL '{}': {}", base_url, e))
        })?;

        endpoint
            .path_segments_mut()
            .map_err(|_| {
                PokedexError::InvalidRequest(format!(
                    "Speech service URL cannot be a base: {}",
                    base_url
                ))
            })?
            .pop_if_empty()
            .push("pokedex")
            .push("");

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSpeechClient {
    async fn synthesize(&self, text: &str, voice: Voice) -> Result<Bytes> {
        tracing::debug!(
            "Speech request - text_len={}, voice={}",
            text.len(),
            voice.id()
        );

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("text", text), ("voice", voice.id())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PokedexError::NotFound(format!(
                "speech endpoint {}",
                self.endpoint
            )));
        }
        if !status.is_success() {
            return Err(PokedexError::Upstream(format!(
                "speech service returned status {}",
                status
            )));
        }

        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_ids() {
        assert_eq!(Voice::Male.id(), "MALE");
        assert_eq!(Voice::Female.id(), "FEMALE");
        assert_eq!(Voice::default(), Voice::Male);
    }

    #[test]
    fn test_voice_from_id_is_case_insensitive() {
        assert_eq!(Voice::from_id("female"), Some(Voice::Female));
        assert_eq!(Voice::from_id(" MALE "), Some(Voice::Male));
        assert_eq!(Voice::from_id("robot"), None);
        assert_eq!(Voice::from_id(""), None);
    }

    #[test]
    fn test_voice_serde() {
        assert_eq!(serde_json::to_string(&Voice::Female).unwrap(), "\"FEMALE\"");
        let voice: Voice = serde_json::from_str("\"MALE\"").unwrap();
        assert_eq!(voice, Voice::Male);
    }

    #[test]
    fn test_endpoint_gets_pokedex_path() {
        let client = HttpSpeechClient::new("http://localhost:5000", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:5000/pokedex/");

        let client =
            HttpSpeechClient::new("http://localhost:5000/tts/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:5000/tts/pokedex/");
    }

    #[test]
    fn test_invalid_speech_url() {
        let result = HttpSpeechClient::new("nope", Duration::from_secs(1));
        assert!(matches!(result, Err(PokedexError::InvalidRequest(_))));
    }
}
