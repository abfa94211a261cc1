// Pokemon Gacha Schema - Shared data definitions
// This crate holds the plain data shapes that the static RON tables
// deserialize into, shared by the engine and anything that reads the data.

pub use context::*;
pub use gacha_data::*;
pub use pokemon_types::*;

pub mod context;
pub mod gacha_data;
pub mod pokemon_types;
