use crate::collection::Collection;
use crate::errors::{GachaResult, SessionError};
use crate::gacha::{GachaEngine, TEN_PULL};
use ordered_float::OrderedFloat;
use schema::{Context, EntityDef, MachineDef};

/// Per-rarity summary for one context, as listed on the machine info popup.
#[derive(Debug, Clone, PartialEq)]
pub struct RarityBreakdown {
    pub rarity: String,
    pub rarity_probability: f64,
    pub entity_count: usize,
    pub tier_weight: f64,
    /// Chance of one specific weight-1 entity of this rarity.
    pub weight_one_probability: f64,
    /// Expected pulls for a weight-1 entity; 0 when the tier is unreachable.
    pub weight_one_pulls: f64,
}

/// Parameters of the "cheapest route" cost estimate: chase legendaries on the
/// machine with the best legendary rate, then farm each version's exclusives.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyPlan {
    pub legendary_rarity: String,
    pub legendary_context: Context,
    pub exclusive_contexts: Vec<Context>,
    /// Flat pull estimate per exclusive (most exclusives are Common/Uncommon).
    pub pulls_per_exclusive: f64,
}

impl Default for StrategyPlan {
    fn default() -> Self {
        Self {
            legendary_rarity: "Legendary".to_string(),
            legendary_context: Context::Yellow,
            exclusive_contexts: vec![Context::Red, Context::Blue],
            pulls_per_exclusive: 50.0,
        }
    }
}

/// Read-only analytics over one engine's tables. Nothing here mutates state,
/// and a context with no reachable weight answers 0 rather than erroring.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsEngine<'a> {
    engine: &'a GachaEngine,
}

impl<'a> StatisticsEngine<'a> {
    pub fn new(engine: &'a GachaEngine) -> Self {
        Self { engine }
    }

    pub fn probability_of(&self, entity: &EntityDef, context: Context) -> f64 {
        self.engine.probability_of(entity, context)
    }

    /// `1 / p`. An entity that can never be drawn needs `f64::INFINITY` pulls.
    pub fn expected_pulls_for(&self, entity: &EntityDef, context: Context) -> f64 {
        let probability = self.engine.probability_of(entity, context);
        if probability <= 0.0 {
            return f64::INFINITY;
        }
        1.0 / probability
    }

    /// Sum of `1 / p` over every reachable entity.
    ///
    /// This is an additive approximation, not the coupon-collector expectation
    /// (which would be the expected maximum of the waiting times). The game
    /// displays this figure, so it stays as is until the product changes it.
    pub fn expected_pulls_to_complete(&self, context: Context) -> f64 {
        self.engine
            .reachable(context)
            .map(|entity| self.expected_pulls_for(entity, context))
            .sum()
    }

    /// Expected pulls for the least likely reachable entity that `owned` does
    /// not yet hold. 0 when everything reachable is owned.
    pub fn expected_pulls_for_rarest_unowned(&self, context: Context, owned: &Collection) -> f64 {
        let rarest = self
            .engine
            .reachable(context)
            .filter(|entity| !owned.owns(&entity.id))
            .map(|entity| self.engine.probability_of(entity, context))
            .min_by_key(|probability| OrderedFloat(*probability));

        match rarest {
            Some(probability) => 1.0 / probability,
            None => 0.0,
        }
    }

    /// The context whose hardest remaining entity takes the most pulls, with
    /// that figure. Ties go to the earliest context in `contexts`.
    pub fn recommend_context(
        &self,
        contexts: &[Context],
        owned: &Collection,
    ) -> Option<(Context, f64)> {
        let mut best: Option<(Context, f64)> = None;
        for &context in contexts {
            let pulls = self.expected_pulls_for_rarest_unowned(context, owned);
            match best {
                Some((_, best_pulls)) if pulls <= best_pulls => {}
                _ => best = Some((context, pulls)),
            }
        }
        best
    }

    /// Pokedollar value one pull returns on average.
    pub fn expected_value_per_pull(&self, context: Context) -> f64 {
        self.engine
            .catalog()
            .iter()
            .map(|entity| entity.value * self.engine.probability_of(entity, context))
            .sum()
    }

    /// Percentage chance (0-100) that one pull yields something not in `owned`.
    pub fn new_entity_chance(&self, context: Context, owned: &Collection) -> f64 {
        self.engine
            .catalog()
            .iter()
            .filter(|entity| !owned.owns(&entity.id))
            .map(|entity| self.engine.probability_of(entity, context) * 100.0)
            .sum()
    }

    /// Rarest-entity expectation from an empty collection, summed over `contexts`.
    pub fn expected_pulls_from_scratch(&self, contexts: &[Context]) -> f64 {
        let nothing_owned = Collection::default();
        contexts
            .iter()
            .map(|&context| self.expected_pulls_for_rarest_unowned(context, &nothing_owned))
            .sum()
    }

    pub fn rarity_breakdown(&self, context: Context) -> Vec<RarityBreakdown> {
        let catalog = self.engine.catalog();
        self.engine
            .rarity_probabilities(context)
            .into_iter()
            .map(|(rarity, rarity_probability)| {
                let tier_weight = catalog.tier_weight(rarity, context);
                let entity_count = catalog.eligible(rarity, context).len();
                let weight_one_probability = if tier_weight > 0.0 {
                    rarity_probability / tier_weight
                } else {
                    0.0
                };
                let weight_one_pulls = if weight_one_probability > 0.0 {
                    1.0 / weight_one_probability
                } else {
                    0.0
                };
                RarityBreakdown {
                    rarity: rarity.to_string(),
                    rarity_probability,
                    entity_count,
                    tier_weight,
                    weight_one_probability,
                    weight_one_pulls,
                }
            })
            .collect()
    }

    /// Expected Pokedollar cost of completing the collection under `plan`,
    /// paying the ten-pull rate throughout. Truncated to whole Pokedollars.
    pub fn strategy_cost(&self, plan: &StrategyPlan, machines: &[MachineDef]) -> GachaResult<u64> {
        let legendary_pulls: f64 = self
            .engine
            .catalog()
            .iter()
            .filter(|entity| entity.rarity == plan.legendary_rarity)
            .map(|entity| self.engine.probability_of(entity, plan.legendary_context))
            .filter(|probability| *probability > 0.0)
            .map(|probability| 1.0 / probability)
            .sum();

        let mut total_cost =
            legendary_pulls * cost_per_pull(machines, plan.legendary_context)?;

        for &context in &plan.exclusive_contexts {
            let exclusives = self
                .engine
                .catalog()
                .iter()
                .filter(|entity| is_exclusive_to(entity, context))
                .count();
            total_cost +=
                exclusives as f64 * plan.pulls_per_exclusive * cost_per_pull(machines, context)?;
        }

        Ok(total_cost as u64)
    }
}

/// Nonzero weight in `context` and zero in every other Pokemon machine.
fn is_exclusive_to(entity: &EntityDef, context: Context) -> bool {
    entity.weight(context) > 0.0
        && Context::POKEMON
            .iter()
            .filter(|&&other| other != context)
            .all(|&other| entity.weight(other) <= 0.0)
}

fn cost_per_pull(machines: &[MachineDef], context: Context) -> GachaResult<f64> {
    machines
        .iter()
        .find(|machine| machine.context == context)
        .map(|machine| machine.cost_ten as f64 / TEN_PULL as f64)
        .ok_or_else(|| SessionError::UnknownMachine(context).into())
}
