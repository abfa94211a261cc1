use crate::{Context, ContextWeights, PokemonType};
use serde::{Deserialize, Serialize};

/// A rarity tier as it appears in `rarities.ron`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityDef {
    pub name: String,
    pub weights: ContextWeights<u32>,
    /// Display colour, e.g. "#FF8000". Opaque to the engine.
    #[serde(default)]
    pub color: String,
}

impl RarityDef {
    pub fn new(name: &str, weights: ContextWeights<u32>) -> Self {
        Self {
            name: name.to_string(),
            weights,
            color: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Pokemon,
    Item,
}

/// A rollable Pokemon or item. The engine only reads `id`, `rarity`,
/// `weights` and `value`; the rest is for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDef {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    pub rarity: String,
    pub weights: ContextWeights<f64>,
    /// Pokedollar value, only used by expected-value statistics.
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub icon: String,
}

impl EntityDef {
    pub fn new(id: &str, name: &str, kind: EntityKind, rarity: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            rarity: rarity.to_string(),
            weights: ContextWeights::default(),
            value: 0.0,
            types: Vec::new(),
            category: String::new(),
            icon: String::new(),
        }
    }

    pub fn weight(&self, context: Context) -> f64 {
        self.weights.get(context)
    }
}

/// A purchasable machine bound to one context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDef {
    pub name: String,
    pub context: Context,
    pub cost_single: u64,
    pub cost_ten: u64,
    #[serde(default)]
    pub description: String,
}
