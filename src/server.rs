use axum::{
    extract::{Path, Query, State},
    http::header,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::error::{PokedexError, Result};
use crate::logging::{access_log_middleware, request_id_middleware, SlowRequestThreshold};
use crate::models::{
    validate_text, HealthResponse, NormalizeRequest, NormalizeResponse, PokemonCard, SpeechQuery,
    TypeColorResponse, TypesResponse,
};
use crate::pokemon::{type_color, PokemonType};
use crate::services::PokedexService;
use crate::speech::{SpeechSynthesizer, Voice};
use crate::text_processing::normalization::{get_normalization_info, TextNormalizer};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pokedex: Arc<PokedexService>,
    /// `None` when no speech service is configured
    pub speech: Option<Arc<dyn SpeechSynthesizer>>,
    pub default_voice: Voice,
    pub request_timeout: Duration,
    pub slow_request_threshold: Duration,
}

impl AppState {
    pub fn new(pokedex: Arc<PokedexService>) -> Self {
        Self {
            pokedex,
            speech: None,
            default_voice: Voice::default(),
            request_timeout: Duration::from_secs(crate::config::constants::DEFAULT_REQUEST_TIMEOUT_SECONDS),
            slow_request_threshold: Duration::from_secs(5),
        }
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechSynthesizer>, default_voice: Voice) -> Self {
        self.speech = Some(speech);
        self.default_voice = default_voice;
        self
    }
}

// HTTP Handlers

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Look up a creature by name or national number
async fn search_pokemon(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PokemonCard>> {
    Ok(Json(state.pokedex.search(&name).await?))
}

async fn random_pokemon(State(state): State<AppState>) -> Result<Json<PokemonCard>> {
    Ok(Json(state.pokedex.random().await?))
}

/// Normalize arbitrary text with the requested boundary policy
async fn normalize_text(Json(req): Json<NormalizeRequest>) -> Result<Json<NormalizeResponse>> {
    validate_text(&req.text)?;

    let result = TextNormalizer::new(req.policy).normalize_with_result(&req.text);
    let info = get_normalization_info(&result);

    tracing::debug!(
        "Normalized text - policy={:?}, original_len={}, normalized_len={}",
        req.policy,
        info.original_length,
        info.normalized_length
    );

    Ok(Json(NormalizeResponse {
        normalized: result.normalized,
        info,
    }))
}

async fn list_types() -> Json<TypesResponse> {
    let types = PokemonType::all()
        .iter()
        .map(|t| TypeColorResponse {
            name: t.name().to_string(),
            color: t.color().to_string(),
            known: true,
        })
        .collect();

    Json(TypesResponse { types })
}

async fn get_type_color(Path(name): Path<String>) -> Json<TypeColorResponse> {
    Json(TypeColorResponse {
        known: PokemonType::from_name(&name).is_some(),
        color: type_color(&name).to_string(),
        name,
    })
}

fn resolve_voice(requested: Option<&str>, default_voice: Voice) -> Result<Voice> {
    match requested.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default_voice),
        Some(id) => Voice::from_id(id)
            .ok_or_else(|| PokedexError::InvalidRequest(format!("Unknown voice '{}'", id))),
    }
}

/// Normalize the text and have the speech service read it out
async fn speak(State(state): State<AppState>, Query(query): Query<SpeechQuery>) -> Result<Response> {
    let speech = state.speech.as_ref().ok_or(PokedexError::SpeechUnavailable)?;

    validate_text(&query.text)?;
    let voice = resolve_voice(query.voice.as_deref(), state.default_voice)?;

    let spoken = state.pokedex.normalizer().normalize(&query.text);
    if spoken.trim().is_empty() {
        return Err(PokedexError::EmptyText);
    }

    tracing::debug!(
        "Speech request - text_len={}, voice={}",
        spoken.len(),
        voice.id()
    );

    let audio = speech.synthesize(&spoken, voice).await?;

    Ok(([(header::CONTENT_TYPE, "audio/wav")], audio).into_response())
}

/// Create and configure the HTTP server router
pub fn create_router(state: AppState) -> Router<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let request_timeout = state.request_timeout;
    let slow_threshold = SlowRequestThreshold(state.slow_request_threshold);

    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/pokemon/random", get(random_pokemon))
        .route("/pokemon/:name", get(search_pokemon))
        .route("/normalize", post(normalize_text))
        .route("/types", get(list_types))
        .route("/types/:name/color", get(get_type_color))
        .route("/pokedex", get(speak))
        .route("/pokedex/", get(speak))
        .with_state(state);

    // Zero disables the timeout
    if !request_timeout.is_zero() {
        router = router.layer(TimeoutLayer::new(request_timeout));
    }

    router
        .layer(middleware::from_fn_with_state(slow_threshold, access_log_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_voice_default() {
        assert_eq!(resolve_voice(None, Voice::Female).unwrap(), Voice::Female);
        assert_eq!(resolve_voice(Some("  "), Voice::Male).unwrap(), Voice::Male);
    }

    #[test]
    fn test_resolve_voice_explicit() {
        assert_eq!(resolve_voice(Some("female"), Voice::Male).unwrap(), Voice::Female);
        assert_eq!(resolve_voice(Some("MALE"), Voice::Female).unwrap(), Voice::Male);
    }

    #[test]
    fn test_resolve_voice_unknown() {
        let result = resolve_voice(Some("robot"), Voice::Male);
        assert!(matches!(result, Err(PokedexError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_list_types_has_all_colors() {
        let Json(response) = list_types().await;
        assert_eq!(response.types.len(), 18);
        assert!(response.types.iter().all(|t| t.known));
        assert!(response
            .types
            .iter()
            .any(|t| t.name == "fire" && t.color == "red"));
    }

    #[tokio::test]
    async fn test_type_color_unknown() {
        let Json(response) = get_type_color(Path("xyz".to_string())).await;
        assert_eq!(response.color, "black");
        assert!(!response.known);
    }

    #[tokio::test]
    async fn test_normalize_handler() {
        let req = NormalizeRequest {
            text: "a cat. a dog! a bird".to_string(),
            policy: Default::default(),
        };
        let Json(response) = normalize_text(Json(req)).await.unwrap();
        assert_eq!(response.normalized, "A cat. A dog a bird");
    }

    #[tokio::test]
    async fn test_normalize_handler_rejects_blank() {
        let req = NormalizeRequest {
            text: "   ".to_string(),
            policy: Default::default(),
        };
        assert!(matches!(
            normalize_text(Json(req)).await,
            Err(PokedexError::EmptyText)
        ));
    }
}
