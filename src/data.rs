use crate::catalog::EntityCatalog;
use crate::errors::{
    CatalogError, CatalogResult, DataError, DataResult, GachaError, GachaResult,
};
use crate::gacha::GachaEngine;
use crate::rarity::RarityTable;
use schema::{Context, EntityDef, MachineDef, RarityDef};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub const RARITIES_FILE: &str = "rarities.ron";
pub const POKEMON_FILE: &str = "pokemon.ron";
pub const ITEMS_FILE: &str = "items.ron";
pub const MACHINES_FILE: &str = "machines.ron";

/// The static game tables, loaded once and shared read-only.
///
/// Pokemon and items live in separate catalogs because their ids overlap
/// (Pokemon "001" is Bulbasaur, item "001" is the Master Ball).
#[derive(Debug, Clone)]
pub struct GameData {
    pub rarities: Arc<RarityTable>,
    pub pokemon: Arc<EntityCatalog>,
    pub items: Arc<EntityCatalog>,
    pub machines: Vec<MachineDef>,
}

impl GameData {
    /// Reads and validates every table under `data_path`.
    pub fn load(data_path: &Path) -> GachaResult<Self> {
        let rarity_defs: Vec<RarityDef> = read_ron(&data_path.join(RARITIES_FILE))?;
        let pokemon_defs: Vec<EntityDef> = read_ron(&data_path.join(POKEMON_FILE))?;
        let item_defs: Vec<EntityDef> = read_ron(&data_path.join(ITEMS_FILE))?;
        let machines: Vec<MachineDef> = read_ron(&data_path.join(MACHINES_FILE))?;

        let data = Self::from_defs(rarity_defs, pokemon_defs, item_defs, machines)?;
        log::info!(
            "Loaded {} rarities, {} Pokemon, {} items, {} machines from {}",
            data.rarities.len(),
            data.pokemon.len(),
            data.items.len(),
            data.machines.len(),
            data_path.display()
        );
        Ok(data)
    }

    pub fn from_defs(
        rarity_defs: Vec<RarityDef>,
        pokemon_defs: Vec<EntityDef>,
        item_defs: Vec<EntityDef>,
        machines: Vec<MachineDef>,
    ) -> GachaResult<Self> {
        let rarities = RarityTable::new(rarity_defs)?;
        let pokemon = EntityCatalog::new(pokemon_defs, &rarities)?;
        let items = EntityCatalog::new(item_defs, &rarities)?;
        check_machines(&machines)?;
        Ok(Self {
            rarities: Arc::new(rarities),
            pokemon: Arc::new(pokemon),
            items: Arc::new(items),
            machines,
        })
    }

    pub fn machine(&self, context: Context) -> Option<&MachineDef> {
        self.machines.iter().find(|machine| machine.context == context)
    }

    pub fn pokemon_engine(&self) -> GachaResult<GachaEngine> {
        GachaEngine::new(self.rarities.clone(), self.pokemon.clone()).map_err(GachaError::from)
    }

    pub fn item_engine(&self) -> GachaResult<GachaEngine> {
        GachaEngine::new(self.rarities.clone(), self.items.clone()).map_err(GachaError::from)
    }
}

/// At least one machine, and at most one per context.
fn check_machines(machines: &[MachineDef]) -> CatalogResult<()> {
    if machines.is_empty() {
        return Err(CatalogError::EmptyTable("machines"));
    }
    let mut seen = HashSet::with_capacity(machines.len());
    for machine in machines {
        if !seen.insert(machine.context) {
            return Err(CatalogError::DuplicateMachine(machine.context));
        }
    }
    Ok(())
}

fn read_ron<T: DeserializeOwned>(path: &Path) -> DataResult<T> {
    let content = fs::read_to_string(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    ron::from_str(&content).map_err(|e| DataError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
