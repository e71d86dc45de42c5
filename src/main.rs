mod cli;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use cli::Command;
use pokedex_server::config::AppConfig;
use pokedex_server::error::{self, PokedexError};
use pokedex_server::logging::{self, LogConfig};
use pokedex_server::pokeapi::{PokeApiClient, PokeDataSource};
use pokedex_server::server::{create_router, AppState};
use pokedex_server::services::{DisplayState, PokedexService};
use pokedex_server::speech::{duration, HttpSpeechClient, PlaybackHandle, SpeechSynthesizer};
use pokedex_server::text_processing::normalization::{get_normalization_info, TextNormalizer};

#[tokio::main]
async fn main() -> error::Result<()> {
    // Load .env file if it exists (silently ignore if it doesn't)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match cli::parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    match command {
        Command::Help => {
            cli::print_help();
            Ok(())
        }
        Command::Version => {
            cli::print_version();
            Ok(())
        }
        Command::Server { port } => run_server(port).await,
        other => {
            init_console_logging();
            run_command(other).await
        }
    }
}

/// One-shot commands only log to the console
fn init_console_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pokedex_server=warn")),
        )
        .with_target(false)
        .compact()
        .try_init();
}

fn build_pokedex(config: &AppConfig) -> error::Result<Arc<PokedexService>> {
    let client = PokeApiClient::new(&config.pokeapi_base_url, config.upstream_timeout)?;
    let source: Arc<dyn PokeDataSource> = Arc::new(client);
    Ok(Arc::new(PokedexService::new(source)))
}

fn build_speech(config: &AppConfig) -> error::Result<Option<Arc<dyn SpeechSynthesizer>>> {
    match &config.speech_service_url {
        Some(url) => {
            let client: Arc<dyn SpeechSynthesizer> =
                Arc::new(HttpSpeechClient::new(url, config.upstream_timeout)?);
            Ok(Some(client))
        }
        None => Ok(None),
    }
}

async fn run_server(port_override: Option<u16>) -> error::Result<()> {
    let log_config = LogConfig::from_env();
    let _log_guards = logging::init_logging(&log_config)
        .map_err(|e| PokedexError::Unknown(format!("Failed to initialize logging: {}", e)))?;
    logging::log_platform_info();

    let config = AppConfig::from_env();
    let port = port_override.unwrap_or(config.port);

    let mut state = AppState::new(build_pokedex(&config)?);
    state.request_timeout = config.request_timeout;
    state.slow_request_threshold =
        std::time::Duration::from_millis(log_config.slow_request_threshold_ms);
    if let Some(speech) = build_speech(&config)? {
        state = state.with_speech(speech, config.default_voice);
    }

    tracing::info!(pokeapi = %config.pokeapi_base_url, "Using PokeAPI");
    match &config.speech_service_url {
        Some(url) => tracing::info!(
            speech = %url,
            voice = config.default_voice.id(),
            "Narration enabled"
        ),
        None => tracing::warn!("SPEECH_SERVICE_URL not set, narration disabled"),
    }
    if config.request_timeout.is_zero() {
        tracing::info!("Request timeout disabled");
    } else {
        tracing::info!("Request timeout: {}s", config.request_timeout.as_secs());
    }

    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Pokedex server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn run_command(command: Command) -> error::Result<()> {
    let config = AppConfig::from_env();

    match command {
        Command::Search { name } => {
            let pokedex = build_pokedex(&config)?;
            let mut display = DisplayState::new();
            display.set_query(&name);
            let result = pokedex.search(&name).await;
            let failure = result.as_ref().err().map(|e| e.to_string());
            display.apply_search(result);
            cli::print_display(&display);
            if let Some(message) = failure {
                eprintln!("{}", message);
                std::process::exit(1);
            }
        }
        Command::Random => {
            let pokedex = build_pokedex(&config)?;
            let mut display = DisplayState::new();
            let result = pokedex.random().await;
            let failure = result.as_ref().err().map(|e| e.to_string());
            display.apply_random(result);
            cli::print_display(&display);
            if let Some(message) = failure {
                eprintln!("{}", message);
                std::process::exit(1);
            }
        }
        Command::Normalize { text, policy } => {
            let result = TextNormalizer::new(policy).normalize_with_result(&text);
            let info = get_normalization_info(&result);
            println!("{}", result.normalized);
            tracing::info!(
                "Removed {} characters, {} characters changed",
                info.removed_characters,
                info.changes_count
            );
        }
        Command::Speak { name, out } => {
            let speech = build_speech(&config)?.ok_or(PokedexError::SpeechUnavailable)?;
            let pokedex = build_pokedex(&config)?;

            let card = pokedex.search(&name).await?;
            println!("Narrating {}: \"{}\"", card.name, card.description);

            let playback = PlaybackHandle::new();
            let audio = playback
                .play(speech.as_ref(), &card.description, config.default_voice)
                .await?;

            tokio::fs::write(&out, &audio).await?;
            match duration::calculate(&audio) {
                Ok(ms) => println!("Saved {} ({:.2}s)", out.display(), ms / 1000.0),
                Err(e) => {
                    tracing::warn!("Could not read clip duration: {}", e);
                    println!("Saved {}", out.display());
                }
            }
            playback.finish()?;
        }
        Command::Help | Command::Version | Command::Server { .. } => {}
    }

    Ok(())
}
