use serde::{Deserialize, Serialize};

use crate::config::constants::DESCRIPTION_LANGUAGE;
use crate::error::{PokedexError, Result};

/// A `{name, url}` reference as PokeAPI embeds them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// The subset of `GET /pokemon/{id or name}` this crate reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub species: NamedResource,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

/// The subset of `GET /pokemon-species/{id}` this crate reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

impl Species {
    /// First flavor text written in English
    pub fn english_flavor_text(&self) -> Result<&str> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == DESCRIPTION_LANGUAGE)
            .map(|entry| entry.flavor_text.as_str())
            .ok_or_else(|| PokedexError::MissingDescription(self.name.clone()))
    }
}
