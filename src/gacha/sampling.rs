/// Categorical draw: scales a uniform `unit` in `[0, 1)` to the total weight
/// and walks the cumulative sums. Zero-weight candidates can never be chosen.
/// Returns `None` when the total weight is zero.
pub fn pick_weighted<T>(candidates: &[(T, f64)], unit: f64) -> Option<&T> {
    let total: f64 = candidates.iter().map(|(_, weight)| *weight).sum();
    if total <= 0.0 {
        return None;
    }

    let target = unit * total;
    let mut cumulative = 0.0;
    for (candidate, weight) in candidates {
        if *weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        if target < cumulative {
            return Some(candidate);
        }
    }

    // Rounding can leave `target` a hair past the final sum.
    candidates
        .iter()
        .rev()
        .find(|(_, weight)| *weight > 0.0)
        .map(|(candidate, _)| candidate)
}
