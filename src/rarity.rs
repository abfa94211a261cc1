use crate::errors::{CatalogError, CatalogResult};
use schema::{Context, RarityDef};
use std::collections::HashMap;

/// The rarity tiers in definition order (Common first, Legendary last in the
/// bundled data), each with a drop weight per context.
#[derive(Debug, Clone)]
pub struct RarityTable {
    tiers: Vec<RarityDef>,
    index: HashMap<String, usize>,
}

impl RarityTable {
    pub fn new(defs: Vec<RarityDef>) -> CatalogResult<Self> {
        if defs.is_empty() {
            return Err(CatalogError::EmptyTable("rarities"));
        }

        let mut index = HashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            if index.insert(def.name.clone(), i).is_some() {
                return Err(CatalogError::DuplicateRarity(def.name.clone()));
            }
        }

        Ok(Self { tiers: defs, index })
    }

    pub fn get(&self, name: &str) -> Option<&RarityDef> {
        self.index.get(name).map(|&i| &self.tiers[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Weight of a rarity in a context; unknown rarities weigh nothing.
    pub fn weight(&self, name: &str, context: Context) -> u32 {
        self.get(name).map_or(0, |def| def.weights.get(context))
    }

    pub fn total_weight(&self, context: Context) -> u64 {
        self.tiers
            .iter()
            .map(|def| u64::from(def.weights.get(context)))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RarityDef> {
        self.tiers.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tiers.iter().map(|def| def.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
