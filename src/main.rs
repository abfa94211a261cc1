use pokemon_gacha::mcp_interface::{display_collection, display_machines, display_statistics, execute_pull};
use pokemon_gacha::{
    Context, GachaResult, GachaSession, GameConfig, GameData, PullKind, PullRng, SaveManager,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // An optional seed makes the whole run reproducible.
    let rng = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => PullRng::from_seed(seed),
            Err(_) => {
                println!("Usage: pokemon-gacha [seed]");
                return ExitCode::FAILURE;
            }
        },
        None => PullRng::new_random(),
    };

    match run(rng) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(mut rng: PullRng) -> GachaResult<()> {
    let config = GameConfig::from_env()?;
    let data = GameData::load(&config.data_dir)?;
    let saves = SaveManager::new(config.save_path.clone());
    let mut session = GachaSession::new(data, saves.load(config.starting_gold))?;

    println!("{}", display_machines(&session));

    // Example 1: a ten-pull from every machine, topping up gold as needed
    for machine in session.data().machines.clone() {
        if !session.profile().can_afford(machine.cost_ten) {
            session.profile_mut().add_gold(config.gold_cheat_amount);
            println!("Added {} Pokedollars.\n", config.gold_cheat_amount);
        }
        match execute_pull(&mut session, machine.context, PullKind::Ten, &mut rng) {
            Ok(text) => println!("{}", text),
            Err(e) => println!("{}\n", e),
        }
    }

    // Example 2: what the collection looks like now
    println!("{}", display_collection(&mut session, false));
    println!("{}", display_collection(&mut session, true));

    // Example 3: statistics for each Pokemon machine
    for context in Context::POKEMON {
        match display_statistics(&session, context) {
            Ok(text) => println!("{}", text),
            Err(e) => println!("{}\n", e),
        }
    }

    saves.save(session.profile())?;
    println!("Progress saved to {}", saves.path().display());
    Ok(())
}
