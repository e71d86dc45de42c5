use rand::Rng;
use std::sync::Arc;

use crate::config::constants::MAX_POKEMON_ID;
use crate::error::{PokedexError, Result};
use crate::models::{PokemonCard, TypeBadge};
use crate::pokeapi::{PokeDataSource, Pokemon, Species};
use crate::text_processing::casing::{canonical_query, title_case};
use crate::text_processing::normalization::TextNormalizer;

/// Pick a national number uniformly in `1..=MAX_POKEMON_ID`
pub fn random_pokemon_id() -> u32 {
    rand::thread_rng().gen_range(1..=MAX_POKEMON_ID)
}

/// Turns a search query or a random pick into a [`PokemonCard`]
pub struct PokedexService<D: ?Sized = dyn PokeDataSource> {
    source: Arc<D>,
    normalizer: TextNormalizer,
}

impl<D: PokeDataSource + ?Sized> PokedexService<D> {
    pub fn new(source: Arc<D>) -> Self {
        Self::with_normalizer(source, TextNormalizer::default())
    }

    pub fn with_normalizer(source: Arc<D>, normalizer: TextNormalizer) -> Self {
        Self { source, normalizer }
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Look up a creature by the text typed in the search box
    pub async fn search(&self, query: &str) -> Result<PokemonCard> {
        let identifier = canonical_query(query);
        if identifier.is_empty() {
            return Err(PokedexError::InvalidRequest(
                "Search query cannot be empty".to_string(),
            ));
        }

        tracing::info!(query = %identifier, "Searching pokedex");
        self.lookup(&identifier).await
    }

    /// Look up a random creature
    pub async fn random(&self) -> Result<PokemonCard> {
        let id = random_pokemon_id();
        tracing::info!(id, "Random pokedex lookup");
        self.lookup(&id.to_string()).await
    }

    /// Fetch the creature, then its species, and build the card
    pub async fn lookup(&self, identifier: &str) -> Result<PokemonCard> {
        let pokemon = self.source.fetch_pokemon(identifier).await?;
        let species = self.source.fetch_species(&pokemon.species.url).await?;
        self.card_from(&pokemon, &species)
    }

    pub fn card_from(&self, pokemon: &Pokemon, species: &Species) -> Result<PokemonCard> {
        let description = self.normalizer.normalize(species.english_flavor_text()?);

        let mut slots: Vec<_> = pokemon.types.iter().collect();
        slots.sort_by_key(|slot| slot.slot);

        Ok(PokemonCard {
            id: pokemon.id,
            name: title_case(&pokemon.name),
            sprite_url: pokemon.sprites.front_default.clone(),
            types: slots
                .into_iter()
                .map(|slot| TypeBadge::new(&slot.kind.name))
                .collect(),
            description,
            fetched_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
