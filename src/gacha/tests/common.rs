use crate::catalog::EntityCatalog;
use crate::gacha::GachaEngine;
use crate::rarity::RarityTable;
use schema::{Context, ContextWeights, EntityDef, EntityKind, RarityDef};
use std::sync::Arc;

/// The live drop table: 42/36/15/6/1 out of 100 in every machine.
pub const STANDARD_TIERS: [(&str, u32); 5] = [
    ("Common", 42),
    ("Uncommon", 36),
    ("Rare", 15),
    ("Epic", 6),
    ("Legendary", 1),
];

/// A builder for small engines with hand-picked weights.
///
/// # Example
/// ```
/// let engine = TestCatalogBuilder::new()
///     .with_rarity("Common", ContextWeights::uniform(1))
///     .with_pokemon("016", "Common", ContextWeights::uniform(1.0))
///     .build();
/// ```
pub struct TestCatalogBuilder {
    rarities: Vec<RarityDef>,
    entities: Vec<EntityDef>,
}

impl TestCatalogBuilder {
    pub fn new() -> Self {
        Self {
            rarities: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// Starts from the standard tiers with the same weights in every context.
    pub fn standard() -> Self {
        let mut builder = Self::new();
        for (name, weight) in STANDARD_TIERS {
            builder = builder.with_rarity(name, ContextWeights::uniform(weight));
        }
        builder
    }

    pub fn with_rarity(mut self, name: &str, weights: ContextWeights<u32>) -> Self {
        self.rarities.push(RarityDef::new(name, weights));
        self
    }

    /// Overrides one rarity's weight in one context.
    pub fn with_rarity_weight(mut self, name: &str, context: Context, weight: u32) -> Self {
        let rarity = self
            .rarities
            .iter_mut()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("No rarity named {} in builder", name));
        *rarity.weights.get_mut(context) = weight;
        self
    }

    pub fn with_pokemon(self, id: &str, rarity: &str, weights: ContextWeights<f64>) -> Self {
        self.with_entity(id, EntityKind::Pokemon, rarity, weights, 0.0)
    }

    pub fn with_item(self, id: &str, rarity: &str, weight: f64, value: f64) -> Self {
        self.with_entity(
            id,
            EntityKind::Item,
            rarity,
            ContextWeights::only(Context::Items, weight),
            value,
        )
    }

    pub fn with_entity(
        mut self,
        id: &str,
        kind: EntityKind,
        rarity: &str,
        weights: ContextWeights<f64>,
        value: f64,
    ) -> Self {
        let mut def = EntityDef::new(id, &format!("Entity {}", id), kind, rarity);
        def.weights = weights;
        def.value = value;
        self.entities.push(def);
        self
    }

    /// One weight-1 entity in every tier except Legendary, then the given
    /// legendaries with their weights, all in every Pokemon context.
    pub fn with_filler_and_legendaries(mut self, legendary_weights: &[f64]) -> Self {
        for (i, (name, _)) in STANDARD_TIERS.iter().enumerate().take(4) {
            self = self.with_pokemon(&format!("f{}", i), name, pokemon_weights(1.0));
        }
        for (i, &weight) in legendary_weights.iter().enumerate() {
            self = self.with_pokemon(&format!("L{}", i), "Legendary", pokemon_weights(weight));
        }
        self
    }

    pub fn build(self) -> GachaEngine {
        let rarities = RarityTable::new(self.rarities).expect("test rarities should be valid");
        let catalog =
            EntityCatalog::new(self.entities, &rarities).expect("test catalog should be valid");
        GachaEngine::new(Arc::new(rarities), Arc::new(catalog)).expect("engine should build")
    }
}

/// `weight` in Red, Blue and Yellow; absent from the item machine.
pub fn pokemon_weights(weight: f64) -> ContextWeights<f64> {
    ContextWeights::new(weight, weight, weight, 0.0)
}

pub fn entity<'a>(engine: &'a GachaEngine, id: &str) -> &'a EntityDef {
    engine
        .catalog()
        .get(id)
        .unwrap_or_else(|| panic!("No entity {} in test catalog", id))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {}, got {}",
        expected,
        actual
    );
}
