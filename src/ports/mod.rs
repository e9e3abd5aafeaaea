//! Ports (trait boundaries) between the learning core and its callers.
//!
//! Evaluation, play and training code talk to decision makers and progress
//! sinks only through these traits.

pub mod agent;
pub mod observer;

pub use agent::Agent;
pub use observer::Observer;
