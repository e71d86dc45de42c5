use crate::error::Result;
use crate::models::PokemonCard;
use crate::text_processing::casing::title_case;

/// What the Pokédex screen currently shows
///
/// Owned by the caller and changed only through the methods below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    query: String,
    card: Option<PokemonCard>,
    description: String,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn card(&self) -> Option<&PokemonCard> {
        self.card.as_ref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Store the search box input, title-cased
    pub fn set_query(&mut self, input: &str) {
        self.query = title_case(input);
    }

    /// Show the result of a search; a failed search blanks the card
    pub fn apply_search(&mut self, result: Result<PokemonCard>) {
        match result {
            Ok(card) => self.show(card),
            Err(e) => {
                tracing::warn!(query = %self.query, "Search failed: {}", e);
                self.card = None;
                self.description.clear();
            }
        }
    }

    /// Show the result of a random pick; a failed pick leaves the screen as it was
    pub fn apply_random(&mut self, result: Result<PokemonCard>) {
        match result {
            Ok(card) => {
                self.query.clear();
                self.show(card);
            }
            Err(e) => tracing::warn!("Random lookup failed: {}", e),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn show(&mut self, card: PokemonCard) {
        self.description = card.description.clone();
        self.card = Some(card);
    }
}
