//! CLI argument parsing and help text
use std::path::PathBuf;

use pokedex_server::error::{PokedexError, Result};
use pokedex_server::services::DisplayState;
use pokedex_server::text_processing::normalization::BoundaryPolicy;

pub const DEFAULT_SPEECH_OUTPUT: &str = "pokedex.wav";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Server { port: Option<u16> },
    Search { name: String },
    Random,
    Normalize { text: String, policy: BoundaryPolicy },
    Speak { name: String, out: PathBuf },
}

/// Parse arguments, excluding the program name
///
/// Global flags are only recognized ahead of a subcommand. Everything after
/// the subcommand belongs to it, so text like `normalize the -v flag` is
/// never read as a flag.
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "search" => Ok(Command::Search {
            name: words(rest, "search <name>")?,
        }),
        "random" => Ok(Command::Random),
        "normalize" => {
            let policy = if rest.iter().any(|a| a == "--source-boundaries") {
                BoundaryPolicy::SourceText
            } else {
                BoundaryPolicy::FilteredText
            };
            let text: Vec<String> = rest
                .iter()
                .filter(|a| *a != "--source-boundaries")
                .cloned()
                .collect();
            Ok(Command::Normalize {
                text: words(&text, "normalize <text...>")?,
                policy,
            })
        }
        "speak" => {
            let mut out = PathBuf::from(DEFAULT_SPEECH_OUTPUT);
            let mut name = Vec::new();
            let mut iter = rest.iter();
            while let Some(arg) = iter.next() {
                if arg == "--out" {
                    let path = iter.next().ok_or_else(|| {
                        PokedexError::InvalidRequest("--out expects a file path".to_string())
                    })?;
                    out = PathBuf::from(path);
                } else {
                    name.push(arg.clone());
                }
            }
            Ok(Command::Speak {
                name: words(&name, "speak <name> [--out FILE]")?,
                out,
            })
        }
        flag if flag.starts_with('-') => parse_global_flags(args),
        other => Err(PokedexError::InvalidRequest(format!(
            "Unknown command '{}'. Run with --help for usage.",
            other
        ))),
    }
}

fn parse_global_flags(args: &[String]) -> Result<Command> {
    if args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(Command::Help);
    }
    if args.iter().any(|a| a == "-v" || a == "--version") {
        return Ok(Command::Version);
    }

    let mut server = false;
    let mut port = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--server" => server = true,
            "--port" => {
                let value = iter
                    .next()
                    .and_then(|p| p.parse::<u16>().ok())
                    .ok_or_else(|| {
                        PokedexError::InvalidRequest("--port expects a number".to_string())
                    })?;
                port = Some(value);
            }
            other => {
                return Err(PokedexError::InvalidRequest(format!(
                    "Unknown option '{}'. Run with --help for usage.",
                    other
                )))
            }
        }
    }

    if server {
        Ok(Command::Server { port })
    } else {
        Err(PokedexError::InvalidRequest(
            "--port is only valid with --server".to_string(),
        ))
    }
}

/// Join the remaining words, so multi-word names like `mr mime` stay whole
fn words(rest: &[String], usage: &str) -> Result<String> {
    if rest.is_empty() {
        return Err(PokedexError::InvalidRequest(format!("usage: {}", usage)));
    }
    Ok(rest.join(" "))
}

/// Print the screen the way the Pokédex shows it
pub fn print_display(state: &DisplayState) {
    let Some(card) = state.card() else {
        println!("No Pokémon to show.");
        return;
    };

    println!("#{:03} {}", card.id, card.name);
    if let Some(url) = &card.sprite_url {
        println!("  sprite: {}", url);
    }
    let labels: Vec<String> = card
        .types
        .iter()
        .map(|t| format!("{} ({})", t.label, t.color))
        .collect();
    println!("  types:  {}", labels.join(", "));
    println!();
    println!("  {}", state.description());
}

pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!("Pokedex Server v{}", version);
    println!("Pokédex lookups, flavor-text normalization and narration");
    println!();
    println!("USAGE:");
    println!("    pokedex_server [OPTIONS]");
    println!("    pokedex_server <COMMAND> [ARGS]");
    println!();
    println!("OPTIONS:");
    println!("    --server              Start HTTP server mode");
    println!("    --port <PORT>         Server port (default: 3000)");
    println!("    -h, --help            Print this help message");
    println!("    -v, --version         Print version information");
    println!();
    println!("COMMANDS:");
    println!("    search <name...>                       Look up a Pokémon by name or number");
    println!("    random                                 Look up a random Pokémon");
    println!("    normalize <text...> [--source-boundaries]");
    println!("                                           Normalize text as descriptions are");
    println!("    speak <name> [--out FILE]              Narrate a description to a WAV file");
    println!();
    println!("SERVER ENDPOINTS:");
    println!("    GET    /health                 - Health check");
    println!("    GET    /pokemon/{{name}}         - Look up a Pokémon");
    println!("    GET    /pokemon/random         - Look up a random Pokémon");
    println!("    POST   /normalize              - Normalize text");
    println!("    GET    /types                  - List types and colors");
    println!("    GET    /types/{{name}}/color     - Color for one type");
    println!("    GET    /pokedex/?text=&voice=  - Narrate text (needs SPEECH_SERVICE_URL)");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    POKEAPI_BASE_URL                 - PokeAPI base URL (default: https://pokeapi.co/api/v2)");
    println!("    SPEECH_SERVICE_URL               - Speech service base URL (narration disabled if unset)");
    println!("    SPEECH_VOICE                     - Default voice, MALE or FEMALE (default: MALE)");
    println!("    PORT                             - Server port (default: 3000)");
    println!("    REQUEST_TIMEOUT_SECONDS          - Request timeout in seconds (default: 60, 0 disables)");
    println!("    UPSTREAM_TIMEOUT_SECONDS         - Outbound call timeout in seconds (default: 10)");
    println!("    POKEDEX_LOG_DIR                  - Log directory");
    println!("    RUST_LOG                         - Console log filter");
    println!();
    println!("CONFIGURATION:");
    println!("    Settings can also be placed in a .env file in the working directory.");
}

pub fn print_version() {
    println!("Pokedex Server v{}", env!("CARGO_PKG_VERSION"));
}
