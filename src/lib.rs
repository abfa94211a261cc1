// In: src/lib.rs

//! Pokemon Gacha Engine
//!
//! Weighted two-step gacha rolls over the Generation 1 Pokedex and item list,
//! exact drop-rate statistics, and the player-side bookkeeping (gold, ledger,
//! collections, save file) around them.

// --- MODULE DECLARATIONS ---
pub mod catalog;
pub mod collection;
pub mod config;
pub mod data;
pub mod errors;
pub mod gacha;
pub mod ledger;
pub mod mcp_interface;
pub mod player;
pub mod rarity;
pub mod save;
pub mod session;
pub mod stats;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    Context, ContextWeights, EntityDef, EntityKind, MachineDef, PokemonType, RarityDef,
};

// --- From this crate's modules (`src/`) ---

// Tables and the roller.
pub use catalog::EntityCatalog;
pub use gacha::{GachaEngine, PullKind, PullRng, TEN_PULL};
pub use rarity::RarityTable;

// Analytics.
pub use stats::{RarityBreakdown, StatisticsEngine, StrategyPlan};

// Player state and persistence.
pub use collection::Collection;
pub use config::GameConfig;
pub use data::GameData;
pub use ledger::PullLedger;
pub use player::PlayerProfile;
pub use save::{SaveFile, SaveManager};
pub use session::{GachaSession, PullOutcome, PulledEntity};

// Crate-specific error and result types.
pub use errors::{
    CatalogError, CatalogResult, DataError, DataResult, GachaError, GachaResult, LedgerError,
    RollError, RollResult, SessionError,
};
