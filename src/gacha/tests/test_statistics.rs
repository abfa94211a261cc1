use crate::collection::Collection;
use crate::errors::{GachaError, SessionError};
use crate::gacha::tests::common::{assert_close, entity, pokemon_weights, TestCatalogBuilder};
use crate::gacha::GachaEngine;
use crate::stats::{StatisticsEngine, StrategyPlan};
use pretty_assertions::assert_eq;
use schema::{Context, ContextWeights, MachineDef};

/// Red: Common 3/4 split 2:1 between Pidgey and Rattata, Rare 1/4 all Pikachu.
fn small_red_engine() -> GachaEngine {
    TestCatalogBuilder::new()
        .with_rarity("Common", ContextWeights::new(3, 3, 3, 0))
        .with_rarity("Rare", ContextWeights::new(1, 1, 1, 0))
        .with_pokemon("016", "Common", pokemon_weights(2.0))
        .with_pokemon("019", "Common", pokemon_weights(1.0))
        .with_pokemon("025", "Rare", pokemon_weights(1.0))
        .build()
}

/// Items: Common 3/4 split evenly, Rare 1/4.
fn item_engine() -> GachaEngine {
    TestCatalogBuilder::new()
        .with_rarity("Common", ContextWeights::only(Context::Items, 3))
        .with_rarity("Rare", ContextWeights::only(Context::Items, 1))
        .with_item("001", "Common", 1.0, 100.0)
        .with_item("002", "Common", 1.0, 300.0)
        .with_item("003", "Rare", 1.0, 1000.0)
        .build()
}

/// Legendary is a quarter of every machine and holds two weight-1 birds.
/// Red has one exclusive, Blue has two, and one Common is everywhere.
fn version_engine() -> GachaEngine {
    TestCatalogBuilder::new()
        .with_rarity("Common", ContextWeights::new(3, 3, 3, 0))
        .with_rarity("Legendary", ContextWeights::new(1, 1, 1, 0))
        .with_pokemon("023", "Common", ContextWeights::new(1.0, 0.0, 0.0, 0.0))
        .with_pokemon("027", "Common", ContextWeights::new(0.0, 1.0, 0.0, 0.0))
        .with_pokemon("037", "Common", ContextWeights::new(0.0, 1.0, 0.0, 0.0))
        .with_pokemon("016", "Common", pokemon_weights(1.0))
        .with_pokemon("144", "Legendary", pokemon_weights(1.0))
        .with_pokemon("145", "Legendary", pokemon_weights(1.0))
        .build()
}

fn machine(context: Context, cost_ten: u64) -> MachineDef {
    MachineDef {
        name: format!("{} Machine", context),
        context,
        cost_single: cost_ten / 9,
        cost_ten,
        description: String::new(),
    }
}

fn owning(ids: &[&str]) -> Collection {
    let mut collection = Collection::new();
    for id in ids {
        collection.add(id);
    }
    collection
}

#[test]
fn test_expected_pulls_is_reciprocal_of_probability() {
    let engine = TestCatalogBuilder::standard()
        .with_filler_and_legendaries(&[3.0, 1.0, 0.25])
        .build();
    let stats = StatisticsEngine::new(&engine);

    for entity in engine.catalog().iter() {
        for context in Context::POKEMON {
            let probability = stats.probability_of(entity, context);
            assert_eq!(stats.expected_pulls_for(entity, context), 1.0 / probability);
        }
    }
}

#[test]
fn test_unreachable_entity_needs_infinite_pulls() {
    let engine = version_engine();
    let stats = StatisticsEngine::new(&engine);

    let ekans = entity(&engine, "023");
    assert_eq!(stats.expected_pulls_for(ekans, Context::Blue), f64::INFINITY);
    assert_eq!(stats.expected_pulls_for(ekans, Context::Items), f64::INFINITY);
    assert_eq!(stats.expected_pulls_for(ekans, Context::Red), 1.0 / 0.375);
}

#[test]
fn test_expected_pulls_to_complete_sums_reachable() {
    let engine = small_red_engine();
    let stats = StatisticsEngine::new(&engine);

    // 1/0.5 + 1/0.25 + 1/0.25
    assert_eq!(stats.expected_pulls_to_complete(Context::Red), 10.0);
    assert_eq!(stats.expected_pulls_to_complete(Context::Items), 0.0);
}

#[test]
fn test_rarest_unowned_tracks_collection() {
    let engine = small_red_engine();
    let stats = StatisticsEngine::new(&engine);

    assert_eq!(
        stats.expected_pulls_for_rarest_unowned(Context::Red, &Collection::new()),
        4.0
    );
    assert_eq!(
        stats.expected_pulls_for_rarest_unowned(Context::Red, &owning(&["025"])),
        4.0
    );
    assert_eq!(
        stats.expected_pulls_for_rarest_unowned(Context::Red, &owning(&["019", "025"])),
        2.0
    );
    assert_eq!(
        stats.expected_pulls_for_rarest_unowned(Context::Red, &owning(&["016", "019", "025"])),
        0.0
    );
}

#[test]
fn test_rarest_unowned_ignores_unreachable() {
    let engine = version_engine();
    let stats = StatisticsEngine::new(&engine);

    // Both legendaries owned; the Blue exclusives cannot drop on Red.
    let owned = owning(&["144", "145"]);
    assert_eq!(
        stats.expected_pulls_for_rarest_unowned(Context::Red, &owned),
        1.0 / 0.375
    );
}

#[test]
fn test_recommend_context_ties_and_empty_list() {
    let engine = small_red_engine();
    let stats = StatisticsEngine::new(&engine);
    let owned = Collection::new();

    assert_eq!(stats.recommend_context(&[], &owned), None);
    assert_eq!(
        stats.recommend_context(&[Context::Blue, Context::Red, Context::Yellow], &owned),
        Some((Context::Blue, 4.0))
    );
    assert_eq!(
        stats.recommend_context(&[Context::Yellow, Context::Blue], &owned),
        Some((Context::Yellow, 4.0))
    );
}

#[test]
fn test_expected_value_per_pull() {
    let engine = item_engine();
    let stats = StatisticsEngine::new(&engine);

    // 0.375 x 100 + 0.375 x 300 + 0.25 x 1000
    assert_eq!(stats.expected_value_per_pull(Context::Items), 400.0);
    assert_eq!(stats.expected_value_per_pull(Context::Red), 0.0);
}

#[test]
fn test_new_entity_chance_counts_unowned_only() {
    let engine = item_engine();
    let stats = StatisticsEngine::new(&engine);

    assert_eq!(stats.new_entity_chance(Context::Items, &Collection::new()), 100.0);
    assert_eq!(stats.new_entity_chance(Context::Items, &owning(&["001"])), 62.5);
    assert_eq!(
        stats.new_entity_chance(Context::Items, &owning(&["001", "002", "003"])),
        0.0
    );
    assert_eq!(stats.new_entity_chance(Context::Red, &Collection::new()), 0.0);
}

#[test]
fn test_rarity_breakdown_rows() {
    let engine = TestCatalogBuilder::standard()
        .with_filler_and_legendaries(&[1.0, 1.0, 1.0, 1.0, 1.0])
        .build();
    let stats = StatisticsEngine::new(&engine);

    let rows = stats.rarity_breakdown(Context::Red);
    assert_eq!(rows.len(), 5);

    let legendary = &rows[4];
    assert_eq!(legendary.rarity, "Legendary");
    assert_eq!(legendary.entity_count, 5);
    assert_eq!(legendary.tier_weight, 5.0);
    assert_close(legendary.rarity_probability, 0.01);
    assert_close(legendary.weight_one_probability, 0.002);
    assert!((legendary.weight_one_pulls - 500.0).abs() < 1e-9);

    let items = stats.rarity_breakdown(Context::Items);
    assert!(items.iter().all(|row| row.entity_count == 0));
    assert!(items.iter().all(|row| row.weight_one_pulls == 0.0));
}

#[test]
fn test_strategy_cost() {
    let engine = version_engine();
    let stats = StatisticsEngine::new(&engine);
    let machines = vec![
        machine(Context::Red, 900),
        machine(Context::Blue, 900),
        machine(Context::Yellow, 900),
    ];

    // Two legendaries at 1/0.125 pulls on Yellow, then 1 Red and 2 Blue
    // exclusives at 50 pulls each, all at 90 per pull.
    let cost = stats.strategy_cost(&StrategyPlan::default(), &machines).unwrap();
    assert_eq!(cost, (16 + 50 + 100) * 90);
}

#[test]
fn test_strategy_cost_needs_every_machine() {
    let engine = version_engine();
    let stats = StatisticsEngine::new(&engine);
    let machines = vec![machine(Context::Red, 900), machine(Context::Yellow, 900)];

    assert_eq!(
        stats.strategy_cost(&StrategyPlan::default(), &machines),
        Err(GachaError::Session(SessionError::UnknownMachine(Context::Blue)))
    );
}

#[test]
fn test_expected_pulls_from_scratch_sums_versions() {
    let engine = version_engine();
    let stats = StatisticsEngine::new(&engine);

    // A legendary at 0.125 is the rarest everywhere.
    assert_eq!(stats.expected_pulls_from_scratch(&Context::POKEMON), 24.0);
    assert_eq!(stats.expected_pulls_from_scratch(&[]), 0.0);
}
