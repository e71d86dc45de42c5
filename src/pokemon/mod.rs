pub mod type_colors;

pub use type_colors::{type_color, PokemonType, DEFAULT_TYPE_COLOR};
