/// Maximum allowed text length for normalization and speech requests (in characters)
///
/// Requests exceeding this limit are rejected before any work is done.
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Highest national Pokédex number picked by the random lookup
pub const MAX_POKEMON_ID: u32 = 898;

/// Public PokeAPI endpoint used when `POKEAPI_BASE_URL` is not set
pub const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Language code of the flavor text entry that is displayed
pub const DESCRIPTION_LANGUAGE: &str = "en";

pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 60;

pub const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_text_length_reasonable() {
        assert!(MAX_TEXT_LENGTH > 0);
        assert!(MAX_TEXT_LENGTH <= 100_000); // Sanity check
    }

    #[test]
    fn test_max_pokemon_id_positive() {
        assert!(MAX_POKEMON_ID >= 1);
    }

    #[test]
    fn test_default_base_url_has_no_trailing_slash() {
        assert!(!DEFAULT_POKEAPI_BASE_URL.ends_with('/'));
    }
}
