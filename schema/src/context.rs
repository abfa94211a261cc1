use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// A roll configuration: one of the three Pokemon machines or the item machine.
/// Selects which weight column applies to rarities and entities.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Context {
    Red,
    Blue,
    Yellow,
    Items,
}

impl Context {
    /// The contexts that roll Pokemon, in machine order.
    pub const POKEMON: [Context; 3] = [Context::Red, Context::Blue, Context::Yellow];

    pub fn is_pokemon(self) -> bool {
        !matches!(self, Context::Items)
    }
}

/// One weight per context. Fields absent from a data file read as zero, so an
/// exclusion is always an explicit 0 rather than a missing key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextWeights<W> {
    #[serde(default)]
    pub red: W,
    #[serde(default)]
    pub blue: W,
    #[serde(default)]
    pub yellow: W,
    #[serde(default)]
    pub items: W,
}

impl<W: Copy> ContextWeights<W> {
    pub fn new(red: W, blue: W, yellow: W, items: W) -> Self {
        Self {
            red,
            blue,
            yellow,
            items,
        }
    }

    /// The same weight in every context.
    pub fn uniform(weight: W) -> Self {
        Self::new(weight, weight, weight, weight)
    }

    pub fn get(&self, context: Context) -> W {
        match context {
            Context::Red => self.red,
            Context::Blue => self.blue,
            Context::Yellow => self.yellow,
            Context::Items => self.items,
        }
    }

    pub fn get_mut(&mut self, context: Context) -> &mut W {
        match context {
            Context::Red => &mut self.red,
            Context::Blue => &mut self.blue,
            Context::Yellow => &mut self.yellow,
            Context::Items => &mut self.items,
        }
    }

    pub fn with(mut self, context: Context, weight: W) -> Self {
        *self.get_mut(context) = weight;
        self
    }
}

impl<W: Copy + Default> ContextWeights<W> {
    /// Zero everywhere except `context`.
    pub fn only(context: Context, weight: W) -> Self {
        Self::default().with(context, weight)
    }
}
