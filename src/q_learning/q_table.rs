//! Value table for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{tictactoe::Action, types::StateKey};

/// Step size and discount for a TD(0) update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdParams {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
}

impl TdParams {
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
        }
    }
}

/// Q-table mapping encoded states to per-action value estimates
///
/// Missing states and missing actions read as 0.0. Entries are created on
/// first write and never removed.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    values: HashMap<StateKey, HashMap<Action, f64>>,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the estimate for a state-action pair
    pub fn get(&self, state: &StateKey, action: Action) -> f64 {
        self.values
            .get(state)
            .and_then(|actions| actions.get(&action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Recorded estimates for a state, if any
    pub fn state_values(&self, state: &StateKey) -> Option<&HashMap<Action, f64>> {
        self.values.get(state)
    }

    /// Maximum recorded estimate in a state (0.0 for unseen states)
    pub fn max_value(&self, state: &StateKey) -> f64 {
        match self.values.get(state) {
            Some(actions) if !actions.is_empty() => {
                actions.values().copied().fold(f64::NEG_INFINITY, f64::max)
            }
            _ => 0.0,
        }
    }

    /// TD(0) update for one transition; returns the new estimate.
    ///
    /// With a successor state:
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// At episode end (`next_state == None`) there is nothing to bootstrap
    /// from and the estimate blends directly toward the terminal reward:
    /// Q(s,a) ← Q(s,a) + α[r - Q(s,a)]
    pub fn update(
        &mut self,
        state: &StateKey,
        action: Action,
        reward: f64,
        next_state: Option<&StateKey>,
        params: TdParams,
    ) -> f64 {
        let current = self.get(state, action);
        let target = match next_state {
            Some(next) => reward + params.discount_factor * self.max_value(next),
            None => reward,
        };
        let updated = current + params.learning_rate * (target - current);

        self.values
            .entry(state.clone())
            .or_default()
            .insert(action, updated);
        updated
    }

    /// Actions from `available` that are currently preferred in `state`.
    ///
    /// Only actions with a recorded estimate compete; the result holds every
    /// one tied at the maximum (exact equality). When none of the available
    /// actions has a record, all of them are returned. Order follows
    /// `available`.
    pub fn best_actions(&self, state: &StateKey, available: &[Action]) -> Vec<Action> {
        let Some(values) = self.values.get(state) else {
            return available.to_vec();
        };

        let recorded: Vec<(Action, f64)> = available
            .iter()
            .filter_map(|action| values.get(action).map(|&value| (*action, value)))
            .collect();
        if recorded.is_empty() {
            return available.to_vec();
        }

        let best = recorded
            .iter()
            .map(|&(_, value)| value)
            .fold(f64::NEG_INFINITY, f64::max);
        recorded
            .into_iter()
            .filter(|&(_, value)| value == best)
            .map(|(action, _)| action)
            .collect()
    }

    /// Number of states with at least one recorded action
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total number of recorded state-action pairs
    pub fn entry_count(&self) -> usize {
        self.values.values().map(HashMap::len).sum()
    }

    /// States sorted by encoding, each with its actions in row-major order
    pub fn sorted_entries(&self) -> Vec<(&StateKey, Vec<(Action, f64)>)> {
        let mut entries: Vec<_> = self
            .values
            .iter()
            .map(|(state, actions)| {
                let mut actions: Vec<(Action, f64)> =
                    actions.iter().map(|(&a, &v)| (a, v)).collect();
                actions.sort_by_key(|&(action, _)| action);
                (state, actions)
            })
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }
}
