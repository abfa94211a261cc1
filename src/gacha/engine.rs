use crate::catalog::EntityCatalog;
use crate::errors::{CatalogResult, RollError, RollResult};
use crate::gacha::rng::PullRng;
use crate::gacha::sampling::pick_weighted;
use crate::rarity::RarityTable;
use schema::{Context, EntityDef};
use std::sync::Arc;

/// Number of results in a multi-pull.
pub const TEN_PULL: usize = 10;

/// How many entities one purchase draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullKind {
    Single,
    Ten,
}

impl PullKind {
    pub fn count(self) -> usize {
        match self {
            PullKind::Single => 1,
            PullKind::Ten => TEN_PULL,
        }
    }
}

/// Two-step weighted roller: a rarity is drawn from the rarity weights of the
/// context, then an entity is drawn from that rarity's individual weights.
///
/// The engine never mutates its tables and holds no random state; the
/// `PullRng` is handed in per call, so one engine can be shared freely.
#[derive(Debug, Clone)]
pub struct GachaEngine {
    rarities: Arc<RarityTable>,
    catalog: Arc<EntityCatalog>,
}

impl GachaEngine {
    pub fn new(rarities: Arc<RarityTable>, catalog: Arc<EntityCatalog>) -> CatalogResult<Self> {
        catalog.check_rarities(&rarities)?;
        Ok(Self { rarities, catalog })
    }

    pub fn rarities(&self) -> &RarityTable {
        &self.rarities
    }

    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    /// Verifies a context can be rolled: some rarity has weight, and every
    /// rarity with weight has at least one entity with weight.
    pub fn check_context(&self, context: Context) -> RollResult<()> {
        if self.rarities.total_weight(context) == 0 {
            return Err(RollError::NoRarityWeight { context });
        }
        for rarity in self.rarities.iter() {
            if rarity.weights.get(context) > 0
                && self.catalog.tier_weight(&rarity.name, context) <= 0.0
            {
                return Err(RollError::NoEligibleEntity {
                    rarity: rarity.name.clone(),
                    context,
                });
            }
        }
        Ok(())
    }

    /// Draws one entity from `context`.
    pub fn roll(&self, context: Context, rng: &mut PullRng) -> RollResult<&EntityDef> {
        let rarity = self.roll_rarity(context, rng)?;
        self.roll_entity_in_rarity(rarity, context, rng)
    }

    /// `count` independent rolls, returned in draw order. Duplicates are expected.
    pub fn roll_batch(
        &self,
        context: Context,
        count: usize,
        rng: &mut PullRng,
    ) -> RollResult<Vec<&EntityDef>> {
        (0..count).map(|_| self.roll(context, rng)).collect()
    }

    fn roll_rarity(&self, context: Context, rng: &mut PullRng) -> RollResult<&str> {
        let candidates: Vec<(&str, f64)> = self
            .rarities
            .iter()
            .map(|def| (def.name.as_str(), f64::from(def.weights.get(context))))
            .filter(|(_, weight)| *weight > 0.0)
            .collect();

        let unit = rng.next_unit("Rarity Roll");
        pick_weighted(&candidates, unit)
            .copied()
            .ok_or(RollError::NoRarityWeight { context })
    }

    fn roll_entity_in_rarity(
        &self,
        rarity: &str,
        context: Context,
        rng: &mut PullRng,
    ) -> RollResult<&EntityDef> {
        let eligible = self.catalog.eligible(rarity, context);
        if eligible.is_empty() {
            return Err(RollError::NoEligibleEntity {
                rarity: rarity.to_string(),
                context,
            });
        }

        let unit = rng.next_unit("Entity Roll");
        pick_weighted(&eligible, unit)
            .copied()
            .ok_or_else(|| RollError::NoEligibleEntity {
                rarity: rarity.to_string(),
                context,
            })
    }

    /// Probability of drawing `rarity` in `context`. Zero when the context has
    /// no rarity weight at all.
    pub fn probability_of_rarity(&self, rarity: &str, context: Context) -> f64 {
        let total = self.rarities.total_weight(context);
        if total == 0 {
            return 0.0;
        }
        f64::from(self.rarities.weight(rarity, context)) / total as f64
    }

    /// Exact probability that one roll of `context` yields `entity`:
    /// P(rarity) x weight / tier weight.
    pub fn probability_of(&self, entity: &EntityDef, context: Context) -> f64 {
        let weight = entity.weight(context);
        if weight <= 0.0 {
            return 0.0;
        }
        let rarity_probability = self.probability_of_rarity(&entity.rarity, context);
        if rarity_probability <= 0.0 {
            return 0.0;
        }
        let tier_weight = self.catalog.tier_weight(&entity.rarity, context);
        if tier_weight <= 0.0 {
            return 0.0;
        }
        rarity_probability * (weight / tier_weight)
    }

    /// Every rarity in table order with its probability in `context`.
    pub fn rarity_probabilities(&self, context: Context) -> Vec<(&str, f64)> {
        self.rarities
            .iter()
            .map(|def| {
                (
                    def.name.as_str(),
                    self.probability_of_rarity(&def.name, context),
                )
            })
            .collect()
    }

    /// `probability_of` expressed as a percentage, as shown on the info popups.
    pub fn drop_rate_percent(&self, entity: &EntityDef, context: Context) -> f64 {
        self.probability_of(entity, context) * 100.0
    }

    /// Entities with a nonzero chance of being drawn in `context`.
    pub fn reachable(&self, context: Context) -> impl Iterator<Item = &EntityDef> + '_ {
        self.catalog
            .iter()
            .filter(move |entity| self.probability_of(entity, context) > 0.0)
    }
}
