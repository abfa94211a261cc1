use crate::collection::Collection;
use crate::ledger::PullLedger;
use schema::Context;
use serde::{Deserialize, Serialize};

/// Everything the game remembers about the player between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub gold: u64,
    pub total_spent: u64,
    pub pokemon: Collection,
    pub items: Collection,
    pub ledger: PullLedger,
}

impl PlayerProfile {
    pub fn new(starting_gold: u64) -> Self {
        Self {
            gold: starting_gold,
            ..Self::default()
        }
    }

    pub fn add_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.gold >= amount
    }

    /// Deducts `amount` if the balance covers it. Returns false otherwise.
    pub fn spend_gold(&mut self, amount: u64) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.gold -= amount;
        self.total_spent += amount;
        true
    }

    /// The collection a machine's results land in.
    pub fn collection_for(&self, context: Context) -> &Collection {
        if context.is_pokemon() {
            &self.pokemon
        } else {
            &self.items
        }
    }

    pub fn collection_for_mut(&mut self, context: Context) -> &mut Collection {
        if context.is_pokemon() {
            &mut self.pokemon
        } else {
            &mut self.items
        }
    }

    pub fn clear_newly_acquired(&mut self) {
        self.pokemon.clear_newly_acquired();
        self.items.clear_newly_acquired();
    }

    /// Forgets every owned Pokemon and item and the pull counters.
    /// Gold and lifetime spending are kept.
    pub fn reset_collection(&mut self) {
        self.pokemon.reset();
        self.items.reset();
        self.ledger.reset();
        log::info!("Inventory and pull statistics reset");
    }
}
