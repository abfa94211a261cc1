use crate::errors::{CatalogError, CatalogResult};
use crate::rarity::RarityTable;
use schema::{Context, EntityDef};
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// Every rollable Pokemon (or item) for one machine family, validated against
/// the rarity table it will be rolled with.
#[derive(Debug, Clone)]
pub struct EntityCatalog {
    entities: Vec<EntityDef>,
    index: HashMap<String, usize>,
}

impl EntityCatalog {
    /// Builds a catalog, rejecting duplicate ids, rarities missing from
    /// `rarities`, and weights or values that are negative or not finite.
    pub fn new(defs: Vec<EntityDef>, rarities: &RarityTable) -> CatalogResult<Self> {
        if defs.is_empty() {
            return Err(CatalogError::EmptyTable("entities"));
        }

        let mut index = HashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            validate_entity(def)?;
            if index.insert(def.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateEntity(def.id.clone()));
            }
        }

        let catalog = Self {
            entities: defs,
            index,
        };
        catalog.check_rarities(rarities)?;
        Ok(catalog)
    }

    /// Confirms every entity's rarity exists in `rarities`.
    pub fn check_rarities(&self, rarities: &RarityTable) -> CatalogResult<()> {
        match self.entities.iter().find(|e| !rarities.contains(&e.rarity)) {
            Some(entity) => Err(CatalogError::UnknownRarity {
                entity: entity.id.clone(),
                rarity: entity.rarity.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn get(&self, id: &str) -> Option<&EntityDef> {
        self.index.get(id).map(|&i| &self.entities[i])
    }

    /// Case-insensitive lookup by display name.
    pub fn find_by_name(&self, name: &str) -> Option<&EntityDef> {
        let name = name.trim();
        self.entities
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityDef> {
        self.entities.iter()
    }

    pub fn in_rarity<'a>(&'a self, rarity: &'a str) -> impl Iterator<Item = &'a EntityDef> {
        self.entities.iter().filter(move |e| e.rarity == rarity)
    }

    /// Entities of `rarity` that can appear in `context`, paired with their weight.
    pub fn eligible(&self, rarity: &str, context: Context) -> Vec<(&EntityDef, f64)> {
        self.entities
            .iter()
            .filter(|e| e.rarity == rarity)
            .map(|e| (e, e.weight(context)))
            .filter(|(_, weight)| *weight > 0.0)
            .collect()
    }

    /// Sum of individual weights of a rarity tier in a context.
    pub fn tier_weight(&self, rarity: &str, context: Context) -> f64 {
        self.entities
            .iter()
            .filter(|e| e.rarity == rarity)
            .map(|e| e.weight(context))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

fn validate_entity(def: &EntityDef) -> CatalogResult<()> {
    for context in Context::iter() {
        let weight = def.weight(context);
        if !weight.is_finite() || weight < 0.0 {
            return Err(CatalogError::InvalidWeight {
                entity: def.id.clone(),
                context,
                weight,
            });
        }
    }
    if !def.value.is_finite() || def.value < 0.0 {
        return Err(CatalogError::InvalidValue {
            entity: def.id.clone(),
            value: def.value,
        });
    }
    Ok(())
}
