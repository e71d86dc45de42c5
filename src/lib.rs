// Library modules for the binary and integration tests
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pokeapi;
pub mod pokemon;
pub mod server;
pub mod services;
pub mod speech;
pub mod text_processing;
pub mod utils;
