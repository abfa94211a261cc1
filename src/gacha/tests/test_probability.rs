use crate::gacha::tests::common::{assert_close, entity, pokemon_weights, TestCatalogBuilder};
use rstest::rstest;
use schema::{Context, ContextWeights};

#[rstest]
#[case(Context::Red)]
#[case(Context::Blue)]
#[case(Context::Yellow)]
fn test_probabilities_sum_to_one(#[case] context: Context) {
    let engine = TestCatalogBuilder::standard()
        .with_rarity_weight("Legendary", Context::Yellow, 2)
        .with_filler_and_legendaries(&[1.0, 3.0, 0.5, 2.0, 1.0])
        .with_pokemon("extra", "Common", ContextWeights::new(4.0, 0.0, 1.5, 0.0))
        .build();

    let total: f64 = engine
        .catalog()
        .iter()
        .filter(|e| e.weight(context) > 0.0)
        .map(|e| engine.probability_of(e, context))
        .sum();

    assert!((total - 1.0).abs() < 1e-9, "total was {}", total);
}

#[test]
fn test_heavier_entity_is_more_likely() {
    let engine = TestCatalogBuilder::standard()
        .with_filler_and_legendaries(&[3.0, 2.0, 1.0])
        .build();

    let heavy = engine.probability_of(entity(&engine, "L0"), Context::Red);
    let middle = engine.probability_of(entity(&engine, "L1"), Context::Red);
    let light = engine.probability_of(entity(&engine, "L2"), Context::Red);

    assert!(heavy > middle);
    assert!(middle > light);
}

#[test]
fn test_scaling_a_tier_leaves_probabilities_unchanged() {
    let base = TestCatalogBuilder::standard()
        .with_filler_and_legendaries(&[1.0, 2.0, 5.0])
        .build();
    let doubled = TestCatalogBuilder::standard()
        .with_filler_and_legendaries(&[2.0, 4.0, 10.0])
        .build();

    for id in ["L0", "L1", "L2"] {
        assert_close(
            base.probability_of(entity(&base, id), Context::Blue),
            doubled.probability_of(entity(&doubled, id), Context::Blue),
        );
    }
}

#[test]
fn test_zero_weight_has_zero_probability() {
    let engine = TestCatalogBuilder::standard()
        .with_filler_and_legendaries(&[1.0])
        .with_pokemon("026", "Rare", ContextWeights::new(1.0, 0.0, 1.0, 0.0))
        .build();

    let raichu = entity(&engine, "026");
    assert_eq!(engine.probability_of(raichu, Context::Blue), 0.0);
    assert!(engine.probability_of(raichu, Context::Red) > 0.0);
    assert!(engine.reachable(Context::Blue).all(|e| e.id != "026"));
}

#[test]
fn test_zero_weight_rarity_has_zero_probability() {
    let engine = TestCatalogBuilder::standard()
        .with_filler_and_legendaries(&[1.0])
        .with_rarity_weight("Epic", Context::Yellow, 0)
        .build();

    assert_eq!(engine.probability_of_rarity("Epic", Context::Yellow), 0.0);
    assert_eq!(
        engine.probability_of(entity(&engine, "f3"), Context::Yellow),
        0.0
    );
}

#[test]
fn test_unknown_rarity_has_zero_probability() {
    let engine = TestCatalogBuilder::standard()
        .with_filler_and_legendaries(&[1.0])
        .build();
    assert_eq!(engine.probability_of_rarity("Mythical", Context::Red), 0.0);
}

#[test]
fn test_empty_context_answers_zero() {
    let engine = TestCatalogBuilder::new()
        .with_rarity("Common", ContextWeights::new(1, 1, 1, 0))
        .with_pokemon("016", "Common", pokemon_weights(1.0))
        .build();

    assert_eq!(engine.probability_of_rarity("Common", Context::Items), 0.0);
    assert_eq!(
        engine.probability_of(entity(&engine, "016"), Context::Items),
        0.0
    );
    assert_eq!(engine.reachable(Context::Items).count(), 0);
}

#[test]
fn test_rarity_probabilities_in_table_order() {
    let engine = TestCatalogBuilder::standard()
        .with_filler_and_legendaries(&[1.0])
        .build();

    let probabilities = engine.rarity_probabilities(Context::Red);
    let names: Vec<&str> = probabilities.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["Common", "Uncommon", "Rare", "Epic", "Legendary"]);
    assert_close(probabilities[0].1, 0.42);
    assert_close(probabilities[4].1, 0.01);
}

#[test]
fn test_drop_rate_is_percentage() {
    let engine = TestCatalogBuilder::standard()
        .with_filler_and_legendaries(&[1.0, 1.0, 1.0, 1.0, 1.0])
        .build();
    assert_close(
        engine.drop_rate_percent(entity(&engine, "L0"), Context::Red),
        0.2,
    );
}
