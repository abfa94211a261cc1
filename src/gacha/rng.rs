use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The random source every roll draws from. Callers own it and pass it in, so
/// a fixed seed (or a scripted sequence in tests) reproduces a pull exactly.
#[derive(Debug, Clone)]
pub struct PullRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<f64>, index: usize },
}

impl PullRng {
    /// Seeded from the thread-local entropy source.
    pub fn new_random() -> Self {
        let mut thread_rng = rand::rng();
        Self {
            source: RngSource::Seeded(StdRng::from_rng(&mut thread_rng)),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    /// Replays `outcomes` in order. Each value must lie in `[0, 1)`.
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    /// Next uniform draw in `[0, 1)`.
    pub fn next_unit(&mut self, reason: &str) -> f64 {
        let outcome = match &mut self.source {
            RngSource::Seeded(rng) => rng.random::<f64>(),
            RngSource::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    panic!(
                        "PullRng exhausted! Tried to get a value for: '{}'. Need more scripted values.",
                        reason
                    );
                }
                let outcome = outcomes[*index];
                *index += 1;
                outcome
            }
        };

        log::trace!("[RNG] Consumed {:.6} for: {}", outcome, reason);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PullRng::from_seed(151);
        let mut b = PullRng::from_seed(151);
        for _ in 0..50 {
            assert_eq!(a.next_unit("a"), b.next_unit("b"));
        }
    }

    #[test]
    fn test_seeded_draws_stay_in_unit_interval() {
        let mut rng = PullRng::from_seed(7);
        for _ in 0..10_000 {
            let value = rng.next_unit("range check");
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_scripted_replays_in_order() {
        let mut rng = PullRng::new_for_test(vec![0.25, 0.75]);
        assert_eq!(rng.next_unit("first"), 0.25);
        assert_eq!(rng.next_unit("second"), 0.75);
    }

    #[test]
    #[should_panic(expected = "PullRng exhausted")]
    fn test_scripted_panics_when_exhausted() {
        let mut rng = PullRng::new_for_test(vec![0.5]);
        rng.next_unit("first");
        rng.next_unit("second");
    }
}
