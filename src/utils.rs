//! Small helpers shared across agents and pipelines

use rand::{SeedableRng, rngs::StdRng};

/// Build a generator from an explicit seed, or from OS entropy when `None`.
pub fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// `count / total`, or 0.0 when `total` is zero.
///
/// # Examples
///
/// ```
/// use tictactoe_rl::utils::rate;
///
/// assert_eq!(rate(1, 4), 0.25);
/// assert_eq!(rate(3, 0), 0.0);
/// ```
pub fn rate(count: usize, total: usize) -> f64 {
    if total > 0 {
        count as f64 / total as f64
    } else {
        0.0
    }
}
