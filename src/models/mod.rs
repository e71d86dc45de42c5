pub mod card;
pub mod requests;
pub mod responses;

pub use card::{PokemonCard, TypeBadge};
pub use requests::{validate_text, NormalizeRequest, SpeechQuery};
pub use responses::{HealthResponse, NormalizeResponse, TypeColorResponse, TypesResponse};
