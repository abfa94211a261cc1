pub mod engine;
pub mod rng;
pub mod sampling;

#[cfg(test)]
mod tests;

pub use engine::{GachaEngine, PullKind, TEN_PULL};
pub use rng::PullRng;
