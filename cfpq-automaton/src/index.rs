//! The state ↔ position bijection.

use std::collections::HashMap;

use cfpq_symbol::State;

/// A bijection between states and positions in `[0, n)`.
///
/// Both directions are explicit: an array for position → state and a
/// map for state → position. States never hold their position.
#[derive(Clone, Debug, Default)]
pub struct StateIndex {
    states: Vec<State>,
    positions: HashMap<State, usize>,
}

impl StateIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a state, returning its position. Inserting a known
    /// state returns the existing position.
    pub fn insert(&mut self, state: State) -> usize {
        match self.positions.get(&state) {
            Some(&position) => position,
            None => {
                let position = self.states.len();
                self.states.push(state.clone());
                self.positions.insert(state, position);
                position
            }
        }
    }

    /// Looks up the position of a state.
    pub fn position(&self, state: &State) -> Option<usize> {
        self.positions.get(state).copied()
    }

    /// Returns the state at a position.
    ///
    /// # Panics
    ///
    /// Panics if the position was never handed out.
    pub fn state(&self, position: usize) -> &State {
        &self.states[position]
    }

    /// Returns the number of indexed states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Checks whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterates over states in position order.
    pub fn iter(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::StateIndex;
    use cfpq_symbol::State;

    #[test]
    fn positions_are_dense_and_stable() {
        let mut index = StateIndex::new();
        assert_eq!(index.insert(State::Node(7)), 0);
        assert_eq!(index.insert(State::Node(3)), 1);
        assert_eq!(index.insert(State::Node(7)), 0);
        assert_eq!(index.len(), 2);
        assert_eq!(index.position(&State::Node(3)), Some(1));
        assert_eq!(index.state(1), &State::Node(3));
    }
}
