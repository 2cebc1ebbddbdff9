//! Shared vocabulary for the 2-D grid puzzles.
//!
//! Both board games store their grid as a flat row-major vector and carry
//! their own dimensions; nothing here is global. Coordinates are signed so
//! move arithmetic can step off the board -- anything that actually indexes
//! a grid goes through [`cell_index`] first.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell position, row-major from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    pub row: i32,
    pub col: i32,
}

impl Coordinates {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The coordinate one step away in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// The coordinate offset by `(d_row, d_col)`.
    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four cardinal directions pieces move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Fixed scan order; neighbor emission follows it, keeping searches
    /// deterministic.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The `(row, col)` step this direction takes.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// Parses the single-letter (or full-word) form the play commands use.
    pub fn parse(text: &str) -> Option<Direction> {
        match text.to_ascii_lowercase().as_str() {
            "n" | "north" => Some(Direction::North),
            "s" | "south" => Some(Direction::South),
            "e" | "east" => Some(Direction::East),
            "w" | "west" => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        };
        write!(f, "{name}")
    }
}

/// Row-major index of `coord` on a `rows x cols` grid, or `None` when the
/// coordinate lies outside it.
pub fn cell_index(rows: i32, cols: i32, coord: Coordinates) -> Option<usize> {
    if coord.row < 0 || coord.row >= rows || coord.col < 0 || coord.col >= cols {
        None
    } else {
        Some((coord.row * cols + coord.col) as usize)
    }
}
