//! Generic breadth-first search over puzzle state spaces.
//!
//! The solver knows nothing about dials, dice or boards: it explores the
//! implicit graph a [`Configuration`] describes through its neighbors, level
//! by level, and reconstructs the first -- hence shortest -- path to a
//! solution.

use std::collections::VecDeque;
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// One immutable snapshot of puzzle state, the unit of BFS exploration.
///
/// Equality and hashing must be consistent with each other and cover the
/// full semantically relevant state: the solver deduplicates visited states
/// through the predecessor-map key, so two logically equal states that
/// compare unequal would be expanded twice, and on a cyclic space (the clock
/// is one by construction) the search would never terminate. Auxiliary
/// bookkeeping, such as a cached piece position or the shared goal value,
/// must stay out of both.
pub trait Configuration: Clone + Eq + Hash {
    /// Whether this state satisfies the puzzle's terminal condition.
    fn is_solution(&self) -> bool;

    /// Every state reachable from this one by a single legal move.
    ///
    /// Computed fresh on each call, never cached, and never includes `self`.
    fn neighbors(&self) -> Vec<Self>;
}

/// Breadth-first shortest-path solver.
///
/// A `solve` call runs to completion on the calling thread; the frontier and
/// predecessor map are private to that invocation. The counters describe the
/// most recent run and exist for diagnostics only.
#[derive(Debug, Default)]
pub struct Solver {
    total_configs: usize,
    unique_configs: usize,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a shortest path from `initial` to any configuration satisfying
    /// [`Configuration::is_solution`].
    ///
    /// Returns the ordered start-to-solution sequence, `vec![initial]` when
    /// the start is already solved, or an empty vector when the reachable
    /// space is exhausted without a solution -- exhaustion is a normal,
    /// reportable outcome, not an error.
    ///
    /// When several shortest paths exist the one returned follows neighbor
    /// emission order; any shortest path is a correct answer.
    pub fn solve<C: Configuration>(&mut self, initial: C) -> Vec<C> {
        self.total_configs = 1;
        self.unique_configs = 1;

        // Once inserted, a key's predecessor is never updated: BFS discovers
        // every state first along some shortest path.
        let mut predecessors: FxHashMap<C, Option<C>> = FxHashMap::default();
        let mut frontier = VecDeque::new();
        predecessors.insert(initial.clone(), None);
        frontier.push_back(initial);

        while let Some(current) = frontier.pop_front() {
            if current.is_solution() {
                return construct_path(&predecessors, &current);
            }
            for neighbor in current.neighbors() {
                self.total_configs += 1;
                if !predecessors.contains_key(&neighbor) {
                    self.unique_configs += 1;
                    predecessors.insert(neighbor.clone(), Some(current.clone()));
                    frontier.push_back(neighbor);
                }
            }
        }

        Vec::new()
    }

    /// Configurations generated during the last run, duplicates included.
    pub fn total_configs(&self) -> usize {
        self.total_configs
    }

    /// Distinct configurations discovered during the last run.
    pub fn unique_configs(&self) -> usize {
        self.unique_configs
    }
}

/// Walks predecessor links backward from `end` to the start, then reverses.
///
/// Every dequeued configuration has an unbroken predecessor chain, so this
/// cannot fail; the result's length is the BFS depth of `end` plus one.
fn construct_path<C: Configuration>(predecessors: &FxHashMap<C, Option<C>>, end: &C) -> Vec<C> {
    let mut path = vec![end.clone()];
    let mut current = end;
    while let Some(Some(previous)) = predecessors.get(current) {
        path.push(previous.clone());
        current = previous;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A corridor of `len` numbered cells; from `at` one step left or right
    /// stays in bounds. Solved on reaching `target` (`target` out of range
    /// makes the puzzle unsolvable).
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Corridor {
        len: i32,
        at: i32,
        target: i32,
    }

    impl Corridor {
        fn new(len: i32, at: i32, target: i32) -> Self {
            Self { len, at, target }
        }
    }

    impl Configuration for Corridor {
        fn is_solution(&self) -> bool {
            self.at == self.target
        }

        fn neighbors(&self) -> Vec<Self> {
            let mut next = Vec::new();
            if self.at > 0 {
                next.push(Self {
                    at: self.at - 1,
                    ..*self
                });
            }
            if self.at + 1 < self.len {
                next.push(Self {
                    at: self.at + 1,
                    ..*self
                });
            }
            next
        }
    }

    #[test]
    fn test_shortest_path_length() {
        let mut solver = Solver::new();
        let path = solver.solve(Corridor::new(10, 2, 7));
        assert_eq!(path.len(), 6);
        assert_eq!(path[0], Corridor::new(10, 2, 7));
        assert!(path[5].is_solution());
        // Consecutive elements are one step apart.
        for pair in path.windows(2) {
            assert_eq!((pair[0].at - pair[1].at).abs(), 1);
        }
    }

    #[test]
    fn test_already_solved_returns_singleton() {
        let mut solver = Solver::new();
        let start = Corridor::new(5, 3, 3);
        let path = solver.solve(start.clone());
        assert_eq!(path, vec![start]);
        assert_eq!(solver.total_configs(), 1);
        assert_eq!(solver.unique_configs(), 1);
    }

    #[test]
    fn test_exhaustion_returns_empty() {
        let mut solver = Solver::new();
        let path = solver.solve(Corridor::new(4, 0, -1));
        assert!(path.is_empty());
        // All four cells were discovered before the frontier emptied.
        assert_eq!(solver.unique_configs(), 4);
    }

    #[test]
    fn test_config_counters() {
        let mut solver = Solver::new();
        solver.solve(Corridor::new(3, 0, -1));
        // start, then 0 -> [1], 1 -> [0, 2], 2 -> [1]: five generated.
        assert_eq!(solver.total_configs(), 5);
        assert_eq!(solver.unique_configs(), 3);
    }

    #[test]
    fn test_counters_reset_between_runs() {
        let mut solver = Solver::new();
        solver.solve(Corridor::new(10, 0, -1));
        let first_total = solver.total_configs();
        solver.solve(Corridor::new(10, 0, -1));
        assert_eq!(solver.total_configs(), first_total);
    }

    #[test]
    fn test_neighbors_idempotent() {
        let config = Corridor::new(6, 3, 5);
        assert_eq!(config.neighbors(), config.neighbors());
    }
}
