//! Shortest-path solvers for a family of small state puzzles.
//!
//! Four puzzles -- clock, dice, astro and hoppers -- share one breadth-first
//! search engine. Each puzzle implements [`Configuration`] with its own
//! state representation and move rule; [`Solver`] explores the resulting
//! state space level by level and returns a shortest start-to-solution
//! sequence without knowing anything about dials, dice or boards.

pub mod astro;
pub mod board;
pub mod clock;
pub mod dice;
pub mod error;
pub mod hoppers;
pub mod solver;

// Re-export main types
pub use astro::{AstroConfig, AstroModel};
pub use board::{Coordinates, Direction};
pub use clock::ClockConfig;
pub use dice::{Die, DiceConfig};
pub use error::PuzzleError;
pub use hoppers::{GameStatus, HoppersConfig, HoppersModel};
pub use solver::{Configuration, Solver};
