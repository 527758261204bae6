//! Random move selectors.
//!
//! A selector draws one candidate move at a time from the current working
//! solution. Local search asks for as many samples per step as its
//! sample size allows.

use std::fmt::{self, Debug};

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use planwright_core::PlanningSolution;

use super::moves::{ChangeMove, Move, SwapMove};

/// Draws candidate moves for a step.
pub trait MoveSelector<S: PlanningSolution>: Send + Debug {
    /// Returns a random candidate, or `None` when the selector cannot build
    /// any move for this solution.
    fn sample(&self, solution: &S, rng: &mut StdRng) -> Option<Box<dyn Move<S>>>;
}

/// Selects a random entity and assigns it a random value from the range.
pub struct ChangeMoveSelector<S, V> {
    entity_count: fn(&S) -> usize,
    values: fn(&S) -> Vec<V>,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
}

impl<S, V> ChangeMoveSelector<S, V> {
    pub fn new(
        entity_count: fn(&S) -> usize,
        values: fn(&S) -> Vec<V>,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
    ) -> Self {
        Self {
            entity_count,
            values,
            getter,
            setter,
            variable_name,
        }
    }
}

impl<S, V> Debug for ChangeMoveSelector<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeMoveSelector")
            .field("variable_name", &self.variable_name)
            .finish()
    }
}

impl<S, V> MoveSelector<S> for ChangeMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn sample(&self, solution: &S, rng: &mut StdRng) -> Option<Box<dyn Move<S>>> {
        let count = (self.entity_count)(solution);
        if count == 0 {
            return None;
        }
        let values = (self.values)(solution);
        let value = values.choose(rng)?.clone();
        let entity_index = rng.random_range(0..count);

        Some(Box::new(ChangeMove::new(
            entity_index,
            Some(value),
            self.getter,
            self.setter,
            self.variable_name,
        )))
    }
}

/// Selects two distinct random entities and swaps their values.
pub struct SwapMoveSelector<S, V> {
    entity_count: fn(&S) -> usize,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
}

impl<S, V> SwapMoveSelector<S, V> {
    pub fn new(
        entity_count: fn(&S) -> usize,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
    ) -> Self {
        Self {
            entity_count,
            getter,
            setter,
            variable_name,
        }
    }
}

impl<S, V> Debug for SwapMoveSelector<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwapMoveSelector")
            .field("variable_name", &self.variable_name)
            .finish()
    }
}

impl<S, V> MoveSelector<S> for SwapMoveSelector<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn sample(&self, solution: &S, rng: &mut StdRng) -> Option<Box<dyn Move<S>>> {
        let count = (self.entity_count)(solution);
        if count < 2 {
            return None;
        }
        let left = rng.random_range(0..count);
        // Draw from the remaining count - 1 slots and skip over `left`.
        let mut right = rng.random_range(0..count - 1);
        if right >= left {
            right += 1;
        }

        Some(Box::new(SwapMove::new(
            left,
            right,
            self.getter,
            self.setter,
            self.variable_name,
        )))
    }
}

/// Combines several selectors; each sample comes from a randomly chosen
/// child that can produce one.
pub struct UnionMoveSelector<S: PlanningSolution> {
    children: Vec<Box<dyn MoveSelector<S>>>,
}

impl<S: PlanningSolution> Debug for UnionMoveSelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionMoveSelector")
            .field("children", &self.children)
            .finish()
    }
}

impl<S: PlanningSolution> UnionMoveSelector<S> {
    pub fn new(children: Vec<Box<dyn MoveSelector<S>>>) -> Self {
        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<S: PlanningSolution> MoveSelector<S> for UnionMoveSelector<S> {
    fn sample(&self, solution: &S, rng: &mut StdRng) -> Option<Box<dyn Move<S>>> {
        let mut order: Vec<usize> = (0..self.children.len()).collect();
        order.shuffle(rng);
        order
            .into_iter()
            .find_map(|i| self.children[i].sample(solution, rng))
    }
}
