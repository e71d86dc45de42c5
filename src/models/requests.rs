use serde::Deserialize;

use crate::config::constants::MAX_TEXT_LENGTH;
use crate::error::{PokedexError, Result};
use crate::text_processing::normalization::BoundaryPolicy;

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub text: String,
    #[serde(default)]
    pub policy: BoundaryPolicy,
}

/// Query string of `GET /pokedex/`
#[derive(Debug, Deserialize)]
pub struct SpeechQuery {
    #[serde(default)]
    pub text: String,
    pub voice: Option<String>,
}

/// Reject empty or oversized text inputs
pub fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(PokedexError::EmptyText);
    }

    let len = text.chars().count();
    if len > MAX_TEXT_LENGTH {
        return Err(PokedexError::TextTooLong(len));
    }

    Ok(())
}
