//! Text-rendering command functions behind the MCP server tools.
//!
//! Every function takes the session it reads or mutates and returns the text
//! shown to the caller. Errors come back as `Err(String)` ready for display.

use crate::catalog::EntityCatalog;
use crate::gacha::{PullKind, PullRng, TEN_PULL};
use crate::session::{GachaSession, PullOutcome};
use crate::stats::StrategyPlan;
use schema::{Context, EntityDef};

/// Parses a machine name such as "red" or "Items".
pub fn parse_context(machine: &str) -> Result<Context, String> {
    machine.trim().parse::<Context>().map_err(|_| {
        format!(
            "Unknown machine '{}'. Use 'red', 'blue', 'yellow', or 'items'.",
            machine.trim()
        )
    })
}

/// Maps a pull count onto a purchase: 1 or 10.
pub fn parse_pull_kind(count: u8) -> Result<PullKind, String> {
    match count as usize {
        1 => Ok(PullKind::Single),
        TEN_PULL => Ok(PullKind::Ten),
        _ => Err(format!("Invalid pull count {}. Use 1 or {}.", count, TEN_PULL)),
    }
}

/// Lists every machine with its prices and per-rarity drop rates
pub fn display_machines(session: &GachaSession) -> String {
    let mut output = format!(
        "--- Gacha Machines ---\nGold: {} Pokedollars\n\n",
        session.profile().gold
    );

    for machine in &session.data().machines {
        output.push_str(&format!(
            "{} [{}]\n  1 pull: {}  |  {} pulls: {}\n",
            machine.name,
            machine.context.to_string().to_lowercase(),
            machine.cost_single,
            TEN_PULL,
            machine.cost_ten
        ));
        if !machine.description.is_empty() {
            output.push_str(&format!("  {}\n", machine.description));
        }

        let engine = session.engine_for(machine.context);
        let rates: Vec<String> = engine
            .rarity_probabilities(machine.context)
            .into_iter()
            .filter(|(_, probability)| *probability > 0.0)
            .map(|(rarity, probability)| format!("{} {:.1}%", rarity, probability * 100.0))
            .collect();
        output.push_str(&format!("  Rates: {}\n", rates.join(", ")));

        if !machine.context.is_pokemon() {
            let value = session
                .statistics_for(machine.context)
                .expected_value_per_pull(machine.context);
            output.push_str(&format!("  Expected value per pull: {:.0}\n", value));
        }
        output.push('\n');
    }
    output
}

/// Buys pulls from a machine and formats the results in draw order
pub fn execute_pull(
    session: &mut GachaSession,
    context: Context,
    kind: PullKind,
    rng: &mut PullRng,
) -> Result<String, String> {
    let outcome = session
        .pull(context, kind, rng)
        .map_err(|e| format!("Pull failed: {}", e))?;
    Ok(format_outcome(&outcome, session.profile().gold))
}

fn format_outcome(outcome: &PullOutcome, gold_left: u64) -> String {
    let mut output = format!(
        "--- {} Machine: {} pull(s) for {} Pokedollars ---\n",
        outcome.context,
        outcome.kind.count(),
        outcome.cost
    );
    for (i, result) in outcome.results.iter().enumerate() {
        let new_marker = if result.is_new { " NEW!" } else { "" };
        output.push_str(&format!(
            " {:>2}. #{} {} ({}){}\n",
            i + 1,
            result.id,
            result.name,
            result.rarity,
            new_marker
        ));
    }
    output.push_str(&format!(
        "\n{} new, {} Pokedollars left.\n",
        outcome.new_count(),
        gold_left
    ));
    output
}

/// Shows completion and owned entries for the Pokedex or the item bag.
///
/// Viewing the collection acknowledges everything marked new.
pub fn display_collection(session: &mut GachaSession, items: bool) -> String {
    let (title, catalog, collection) = if items {
        ("Item Bag", session.data().items.clone(), &session.profile().items)
    } else {
        ("Pokedex", session.data().pokemon.clone(), &session.profile().pokemon)
    };
    let (owned, total) = collection.completion(&catalog);
    let percent = if total > 0 {
        owned as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    let mut output = format!(
        "--- {} ---\nCompletion: {}/{} ({:.1}%)\n\n",
        title, owned, total, percent
    );
    for entity in catalog.iter().filter(|e| collection.owns(&e.id)) {
        let new_marker = if collection.is_newly_acquired(&entity.id) {
            " NEW!"
        } else {
            ""
        };
        output.push_str(&format!(
            "  #{} {} ({}) x{}{}\n",
            entity.id,
            entity.name,
            entity.rarity,
            collection.count(&entity.id),
            new_marker
        ));
    }
    if owned == 0 {
        output.push_str("  Nothing collected yet.\n");
    }

    let profile = session.profile_mut();
    let collection = if items {
        &mut profile.items
    } else {
        &mut profile.pokemon
    };
    collection.clear_newly_acquired();
    output
}

/// Drop-rate analysis for one machine plus the cross-machine recommendation
pub fn display_statistics(session: &GachaSession, context: Context) -> Result<String, String> {
    session.machine(context).map_err(|e| e.to_string())?;
    let stats = session.statistics_for(context);
    let owned = session.profile().collection_for(context);

    let mut output = format!("--- {} Machine Statistics ---\n", context);
    for row in stats.rarity_breakdown(context) {
        if row.rarity_probability <= 0.0 {
            continue;
        }
        output.push_str(&format!(
            "  {:<10} {:>5.1}%  {} entries, ~{:.0} pulls each\n",
            row.rarity,
            row.rarity_probability * 100.0,
            row.entity_count,
            row.weight_one_pulls
        ));
    }

    output.push_str(&format!(
        "\nPulls to complete (sum of expectations): {:.0}\n",
        stats.expected_pulls_to_complete(context)
    ));
    output.push_str(&format!(
        "Pulls for rarest missing entry: {:.0}\n",
        stats.expected_pulls_for_rarest_unowned(context, owned)
    ));
    output.push_str(&format!(
        "Chance of something new: {:.1}%\n",
        stats.new_entity_chance(context, owned)
    ));
    output.push_str(&format!(
        "Lifetime pulls here: {}\n",
        session.profile().ledger.by_context(context)
    ));

    if context.is_pokemon() {
        let pokemon_stats = session.pokemon_statistics();
        let pokedex = &session.profile().pokemon;
        if let Some((best, pulls)) = pokemon_stats.recommend_context(&Context::POKEMON, pokedex) {
            output.push_str(&format!(
                "\nRecommended machine: {} (~{:.0} pulls for its rarest missing Pokemon)\n",
                best, pulls
            ));
        }
        output.push_str(&format!(
            "Pulls from scratch across all versions: {:.0}\n",
            pokemon_stats.expected_pulls_from_scratch(&Context::POKEMON)
        ));
        match pokemon_stats.strategy_cost(&StrategyPlan::default(), &session.data().machines) {
            Ok(cost) => output.push_str(&format!(
                "Estimated cost to complete the Pokedex: {} Pokedollars\n",
                cost
            )),
            Err(e) => log::warn!("Strategy cost unavailable: {}", e),
        }
    } else {
        output.push_str(&format!(
            "Expected value per pull: {:.0} Pokedollars\n",
            stats.expected_value_per_pull(context)
        ));
    }
    Ok(output)
}

fn find_entity<'a>(
    catalog: &'a EntityCatalog,
    query: &str,
) -> Option<&'a EntityDef> {
    let query = query.trim().trim_start_matches('#');
    catalog
        .get(query)
        .or_else(|| catalog.find_by_name(query))
        .or_else(|| {
            query
                .parse::<u32>()
                .ok()
                .and_then(|number| catalog.get(&format!("{:03}", number)))
        })
}

fn drop_rate_lines(session: &GachaSession, entity: &EntityDef, contexts: &[Context]) -> String {
    let mut output = String::new();
    for &context in contexts {
        let stats = session.statistics_for(context);
        let probability = stats.probability_of(entity, context);
        if probability > 0.0 {
            output.push_str(&format!(
                "  {:<7} {:.4}%  (~{:.0} pulls)\n",
                context.to_string(),
                probability * 100.0,
                stats.expected_pulls_for(entity, context)
            ));
        } else {
            output.push_str(&format!("  {:<7} not available\n", context.to_string()));
        }
    }
    output
}

/// Handles the "lookup pokemon" command by name or Pokedex number
pub fn handle_lookup_pokemon_command(session: &GachaSession, query: &str) -> String {
    if query.trim().is_empty() {
        return "What Pokemon do you want to look up? (e.g., 'Pikachu' or '25')".to_string();
    }
    let Some(pokemon) = find_entity(&session.data().pokemon, query) else {
        return format!("The Pokemon '{}' was not found.", query.trim());
    };

    let types: Vec<String> = pokemon.types.iter().map(|t| t.to_string()).collect();
    let mut output = format!(
        "--- Pokemon Details ---\n#{} {}\nRarity: {}\n",
        pokemon.id, pokemon.name, pokemon.rarity
    );
    if !types.is_empty() {
        output.push_str(&format!("Type: {}\n", types.join("/")));
    }
    output.push_str(&format!(
        "Owned: {}\nDrop rates:\n",
        session.profile().pokemon.count(&pokemon.id)
    ));
    output.push_str(&drop_rate_lines(session, pokemon, &Context::POKEMON));
    output
}

/// Handles the "lookup item" command by name or item number
pub fn handle_lookup_item_command(session: &GachaSession, query: &str) -> String {
    if query.trim().is_empty() {
        return "What item do you want to look up? (e.g., 'Rare Candy')".to_string();
    }
    let Some(item) = find_entity(&session.data().items, query) else {
        return format!("The item '{}' was not found.", query.trim());
    };

    let mut output = format!(
        "--- Item Details ---\n#{} {}\nRarity: {}\nValue: {:.0} Pokedollars\n",
        item.id, item.name, item.rarity, item.value
    );
    if !item.category.is_empty() {
        output.push_str(&format!("Category: {}\n", item.category));
    }
    output.push_str(&format!(
        "Owned: {}\nDrop rate:\n",
        session.profile().items.count(&item.id)
    ));
    output.push_str(&drop_rate_lines(session, item, &[Context::Items]));
    output
}

pub fn execute_add_gold(session: &mut GachaSession, amount: u64) -> String {
    session.profile_mut().add_gold(amount);
    format!(
        "Added {} Pokedollars. Balance: {} Pokedollars.",
        amount,
        session.profile().gold
    )
}

pub fn execute_reset_collection(session: &mut GachaSession) -> String {
    session.reset_collection();
    format!(
        "Collection and pull history cleared. Gold kept: {} Pokedollars.",
        session.profile().gold
    )
}
