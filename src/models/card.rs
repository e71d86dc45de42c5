use serde::{Deserialize, Serialize};

use crate::pokemon::type_color;

/// One type label on a card, with the color it is drawn in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBadge {
    /// PokeAPI label, e.g. `fire`
    pub name: String,
    /// Upper-cased label as displayed
    pub label: String,
    pub color: String,
}

impl TypeBadge {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            label: name.to_uppercase(),
            color: type_color(name).to_string(),
        }
    }
}

/// Everything the Pokédex screen shows for one creature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonCard {
    pub id: u32,
    /// Title-cased name
    pub name: String,
    pub sprite_url: Option<String>,
    /// Types in slot order
    pub types: Vec<TypeBadge>,
    /// Normalized English flavor text
    pub description: String,
    /// RFC 3339 timestamp of the lookup
    pub fetched_at: String,
}
