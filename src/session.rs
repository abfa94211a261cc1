use crate::data::GameData;
use crate::errors::{GachaResult, SessionError};
use crate::gacha::{GachaEngine, PullKind, PullRng};
use crate::player::PlayerProfile;
use crate::stats::StatisticsEngine;
use schema::{Context, EntityKind, MachineDef};

/// One result of a purchase, with whether it was the first copy.
#[derive(Debug, Clone, PartialEq)]
pub struct PulledEntity {
    pub id: String,
    pub name: String,
    pub kind: EntityKind,
    pub rarity: String,
    pub is_new: bool,
}

/// What a purchase cost and produced, results in draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct PullOutcome {
    pub context: Context,
    pub kind: PullKind,
    pub cost: u64,
    pub results: Vec<PulledEntity>,
}

impl PullOutcome {
    pub fn new_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_new).count()
    }
}

/// A player at the machines: static data, one engine per catalog, and the
/// mutable profile that purchases update.
#[derive(Debug, Clone)]
pub struct GachaSession {
    data: GameData,
    pokemon_engine: GachaEngine,
    item_engine: GachaEngine,
    profile: PlayerProfile,
}

impl GachaSession {
    pub fn new(data: GameData, profile: PlayerProfile) -> GachaResult<Self> {
        let pokemon_engine = data.pokemon_engine()?;
        let item_engine = data.item_engine()?;
        Ok(Self {
            data,
            pokemon_engine,
            item_engine,
            profile,
        })
    }

    pub fn data(&self) -> &GameData {
        &self.data
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut PlayerProfile {
        &mut self.profile
    }

    pub fn machine(&self, context: Context) -> GachaResult<&MachineDef> {
        self.data
            .machine(context)
            .ok_or_else(|| SessionError::UnknownMachine(context).into())
    }

    /// The engine that rolls `context`: items for the item machine, Pokemon otherwise.
    pub fn engine_for(&self, context: Context) -> &GachaEngine {
        if context.is_pokemon() {
            &self.pokemon_engine
        } else {
            &self.item_engine
        }
    }

    pub fn statistics_for(&self, context: Context) -> StatisticsEngine<'_> {
        StatisticsEngine::new(self.engine_for(context))
    }

    /// Statistics over the Pokemon catalog, for analysis across all three versions.
    pub fn pokemon_statistics(&self) -> StatisticsEngine<'_> {
        StatisticsEngine::new(&self.pokemon_engine)
    }

    pub fn item_statistics(&self) -> StatisticsEngine<'_> {
        StatisticsEngine::new(&self.item_engine)
    }

    pub fn cost_of(&self, context: Context, kind: PullKind) -> GachaResult<u64> {
        let machine = self.machine(context)?;
        Ok(match kind {
            PullKind::Single => machine.cost_single,
            PullKind::Ten => machine.cost_ten,
        })
    }

    /// Buys one or ten pulls from the machine for `context`.
    ///
    /// The rolls happen before any gold moves, so a machine with broken data
    /// fails without charging the player.
    pub fn pull(
        &mut self,
        context: Context,
        kind: PullKind,
        rng: &mut PullRng,
    ) -> GachaResult<PullOutcome> {
        let cost = self.cost_of(context, kind)?;
        if !self.profile.can_afford(cost) {
            return Err(SessionError::InsufficientGold {
                needed: cost,
                available: self.profile.gold,
            }
            .into());
        }

        let engine = if context.is_pokemon() {
            &self.pokemon_engine
        } else {
            &self.item_engine
        };
        let rolled = engine.roll_batch(context, kind.count(), rng)?;

        self.profile.spend_gold(cost);
        self.profile
            .ledger
            .record(context, kind.count() as u64)?;

        let collection = self.profile.collection_for_mut(context);
        let results: Vec<PulledEntity> = rolled
            .into_iter()
            .map(|entity| PulledEntity {
                id: entity.id.clone(),
                name: entity.name.clone(),
                kind: entity.kind,
                rarity: entity.rarity.clone(),
                is_new: collection.add(&entity.id),
            })
            .collect();

        let outcome = PullOutcome {
            context,
            kind,
            cost,
            results,
        };
        log::info!(
            "{} machine: {} pull(s) for {} Pokedollars, {} new",
            context,
            kind.count(),
            cost,
            outcome.new_count()
        );
        for result in &outcome.results {
            log::debug!("  {} {} ({})", result.id, result.name, result.rarity);
        }
        Ok(outcome)
    }

    pub fn reset_collection(&mut self) {
        self.profile.reset_collection();
    }
}
