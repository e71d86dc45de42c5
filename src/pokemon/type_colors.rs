/// Display color used for a type label that is not in the table
pub const DEFAULT_TYPE_COLOR: &str = "black";

/// Type configuration with display metadata
#[derive(Debug, Clone)]
pub struct TypeConfig {
    pub name: &'static str,
    pub color: &'static str,
}

impl TypeConfig {
    pub const fn new(name: &'static str, color: &'static str) -> Self {
        Self { name, color }
    }
}

/// The closed set of elemental types PokeAPI reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    /// Get the configuration for this type
    pub const fn config(&self) -> TypeConfig {
        match self {
            PokemonType::Normal => TypeConfig::new("normal", "gray"),
            PokemonType::Fire => TypeConfig::new("fire", "red"),
            PokemonType::Water => TypeConfig::new("water", "blue"),
            PokemonType::Electric => TypeConfig::new("electric", "goldenrod"),
            PokemonType::Grass => TypeConfig::new("grass", "green"),
            PokemonType::Ice => TypeConfig::new("ice", "steelblue"),
            PokemonType::Fighting => TypeConfig::new("fighting", "orange"),
            PokemonType::Poison => TypeConfig::new("poison", "purple"),
            PokemonType::Ground => TypeConfig::new("ground", "saddlebrown"),
            PokemonType::Flying => TypeConfig::new("flying", "teal"),
            PokemonType::Psychic => TypeConfig::new("psychic", "magenta"),
            PokemonType::Bug => TypeConfig::new("bug", "olive"),
            PokemonType::Rock => TypeConfig::new("rock", "brown"),
            PokemonType::Ghost => TypeConfig::new("ghost", "darkviolet"),
            PokemonType::Dragon => TypeConfig::new("dragon", "darkorange"),
            PokemonType::Dark => TypeConfig::new("dark", "dimgray"),
            PokemonType::Steel => TypeConfig::new("steel", "darkgray"),
            PokemonType::Fairy => TypeConfig::new("fairy", "fuchsia"),
        }
    }

    /// Lower-case label as sent by PokeAPI
    pub const fn name(&self) -> &'static str {
        self.config().name
    }

    pub const fn color(&self) -> &'static str {
        self.config().color
    }

    /// Look up a type by its exact PokeAPI label
    pub fn from_name(name: &str) -> Option<PokemonType> {
        Self::all().into_iter().find(|t| t.name() == name)
    }

    /// Get all types as an array
    pub const fn all() -> [PokemonType; 18] {
        [
            PokemonType::Normal,
            PokemonType::Fire,
            PokemonType::Water,
            PokemonType::Electric,
            PokemonType::Grass,
            PokemonType::Ice,
            PokemonType::Fighting,
            PokemonType::Poison,
            PokemonType::Ground,
            PokemonType::Flying,
            PokemonType::Psychic,
            PokemonType::Bug,
            PokemonType::Rock,
            PokemonType::Ghost,
            PokemonType::Dragon,
            PokemonType::Dark,
            PokemonType::Steel,
            PokemonType::Fairy,
        ]
    }
}

/// Display color for a type label, falling back to `DEFAULT_TYPE_COLOR`
pub fn type_color(name: &str) -> &'static str {
    PokemonType::from_name(name).map_or(DEFAULT_TYPE_COLOR, |t| t.color())
}
