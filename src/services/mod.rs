pub mod display_state;
pub mod lookup;

pub use display_state::DisplayState;
pub use lookup::{random_pokemon_id, PokedexService};
