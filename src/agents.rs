//! Non-learning decision makers
//!
//! - [`MinimaxAgent`]: full-depth alpha-beta search, used as an opponent and
//!   as a benchmark
//! - [`RandomAgent`]: uniform baseline

pub mod minimax;
pub mod random;

pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
