//! Hoppers puzzle: frogs capture each other by jumping, and the board is
//! solved when no green frog remains.
//!
//! Any frog may jump diagonally over a green frog on the adjacent diagonal
//! cell. A frog sitting on an even-even cell may additionally make the long
//! orthogonal jump over the green frog two cells away. The jumped frog is
//! removed; the red frog can never be jumped over.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::board::{cell_index, Coordinates};
use crate::error::PuzzleError;
use crate::solver::{Configuration, Solver};

const EMPTY: u8 = b'.';
const INVALID: u8 = b'*';
const GREEN: u8 = b'G';
const RED: u8 = b'R';

/// `(landing offset, captured offset)` pairs for the short diagonal jumps,
/// in the scan order neighbors are emitted.
const DIAGONAL_JUMPS: [((i32, i32), (i32, i32)); 4] = [
    ((-2, -2), (-1, -1)),
    ((-2, 2), (-1, 1)),
    ((2, -2), (1, -1)),
    ((2, 2), (1, 1)),
];

/// Same, for the orthogonal long jumps available from even-even cells.
const LONG_JUMPS: [((i32, i32), (i32, i32)); 4] = [
    ((-4, 0), (-2, 0)),
    ((4, 0), (2, 0)),
    ((0, -4), (0, -2)),
    ((0, 4), (0, 2)),
];

/// A board file as written on disk: one character per cell.
#[derive(Debug, Deserialize)]
struct HoppersSpec {
    rows: i32,
    cols: i32,
    board: Vec<String>,
}

/// One arrangement of frogs on the lily-pad board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HoppersConfig {
    rows: i32,
    cols: i32,
    grid: Vec<u8>,
}

impl HoppersConfig {
    /// Loads and validates a board file.
    pub fn from_file(path: &Path) -> Result<Self, PuzzleError> {
        let text = fs::read_to_string(path).map_err(|source| PuzzleError::Io {
            path: path.to_owned(),
            source,
        })?;
        let name = path.display().to_string();
        let spec: HoppersSpec = serde_json::from_str(&text).map_err(|source| PuzzleError::Parse {
            path: path.to_owned(),
            source,
        })?;
        Self::from_spec(spec, &name)
    }

    fn from_spec(spec: HoppersSpec, name: &str) -> Result<Self, PuzzleError> {
        if spec.rows <= 0 || spec.cols <= 0 {
            return Err(PuzzleError::invalid(
                name,
                format!("board is {}x{}", spec.rows, spec.cols),
            ));
        }
        if spec.board.len() != spec.rows as usize {
            return Err(PuzzleError::invalid(
                name,
                format!(
                    "board declares {} rows but lists {}",
                    spec.rows,
                    spec.board.len()
                ),
            ));
        }
        let mut grid = Vec::with_capacity((spec.rows * spec.cols) as usize);
        for (row, line) in spec.board.iter().enumerate() {
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != spec.cols as usize {
                return Err(PuzzleError::invalid(
                    name,
                    format!("row {row} has {} cells, expected {}", cells.len(), spec.cols),
                ));
            }
            for cell in cells {
                match cell {
                    '.' | '*' | 'G' | 'R' => grid.push(cell as u8),
                    other => {
                        return Err(PuzzleError::invalid(
                            name,
                            format!("unknown cell symbol {other:?} in row {row}"),
                        ))
                    }
                }
            }
        }
        let reds = grid.iter().filter(|&&cell| cell == RED).count();
        if reds != 1 {
            return Err(PuzzleError::invalid(
                name,
                format!("board has {reds} red frogs, expected exactly one"),
            ));
        }
        Ok(Self {
            rows: spec.rows,
            cols: spec.cols,
            grid,
        })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// The frog at `coord`, if the cell is in bounds and holds one.
    pub fn frog_at(&self, coord: Coordinates) -> Option<char> {
        match self.cell(coord) {
            Some(GREEN) => Some('G'),
            Some(RED) => Some('R'),
            _ => None,
        }
    }

    fn cell(&self, coord: Coordinates) -> Option<u8> {
        cell_index(self.rows, self.cols, coord).map(|index| self.grid[index])
    }

    /// A jump lands on an empty pad and captures the green frog in between.
    fn jump_valid(&self, to: Coordinates, over: Coordinates) -> bool {
        self.cell(to) == Some(EMPTY) && self.cell(over) == Some(GREEN)
    }

    /// The configuration after the frog at `from` jumps to `to`, removing
    /// the frog at `over`. All three cells must be in bounds.
    fn jump(&self, from: Coordinates, to: Coordinates, over: Coordinates) -> Self {
        let from_index = cell_index(self.rows, self.cols, from).expect("jump source in bounds");
        let to_index = cell_index(self.rows, self.cols, to).expect("jump target in bounds");
        let over_index = cell_index(self.rows, self.cols, over).expect("captured cell in bounds");
        let mut next = self.clone();
        next.grid[to_index] = next.grid[from_index];
        next.grid[from_index] = EMPTY;
        next.grid[over_index] = EMPTY;
        next
    }

    /// Attempts the jump `from -> to` for the play mode, deriving the
    /// captured cell from the geometry. `None` when the shape or the board
    /// state rules it out.
    pub(crate) fn try_jump(&self, from: Coordinates, to: Coordinates) -> Option<Self> {
        if self.frog_at(from).is_none() {
            return None;
        }
        let shape = (to.row - from.row, to.col - from.col);
        let diagonal = DIAGONAL_JUMPS.iter().any(|&(land, _)| land == shape);
        let long = LONG_JUMPS.iter().any(|&(land, _)| land == shape);
        if !diagonal && !(long && from.row % 2 == 0 && from.col % 2 == 0) {
            return None;
        }
        let over = from.offset(shape.0 / 2, shape.1 / 2);
        self.jump_valid(to, over).then(|| self.jump(from, to, over))
    }
}

impl Configuration for HoppersConfig {
    /// Solved when only the red frog is left.
    fn is_solution(&self) -> bool {
        !self.grid.contains(&GREEN)
    }

    /// Every legal jump of every frog, scanned row-major; diagonal shapes
    /// first, then the long jumps where the cell allows them.
    fn neighbors(&self) -> Vec<Self> {
        let mut neighbors = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let from = Coordinates::new(row, col);
                if self.frog_at(from).is_none() {
                    continue;
                }
                for &(land, capture) in &DIAGONAL_JUMPS {
                    let to = from.offset(land.0, land.1);
                    let over = from.offset(capture.0, capture.1);
                    if self.jump_valid(to, over) {
                        neighbors.push(self.jump(from, to, over));
                    }
                }
                if row % 2 == 0 && col % 2 == 0 {
                    for &(land, capture) in &LONG_JUMPS {
                        let to = from.offset(land.0, land.1);
                        let over = from.offset(capture.0, capture.1);
                        if self.jump_valid(to, over) {
                            neighbors.push(self.jump(from, to, over));
                        }
                    }
                }
            }
        }
        neighbors
    }
}

impl fmt::Display for HoppersConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                let cell = self.cell(Coordinates::new(row, col)).unwrap_or(INVALID);
                write!(f, "{}", cell as char)?;
            }
        }
        Ok(())
    }
}

/// How far along a play-mode game is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ready,
    Ongoing,
    Won,
    /// Green frogs remain but no jump is possible.
    Stuck,
}

/// Interactive wrapper for the play mode: select a frog, select its landing
/// pad, ask for a hint.
///
/// Mutating verbs return the status line the text UI prints.
#[derive(Debug)]
pub struct HoppersModel {
    file: PathBuf,
    current: HoppersConfig,
    selected: Option<Coordinates>,
    status: GameStatus,
}

impl HoppersModel {
    pub fn from_file(path: &Path) -> Result<Self, PuzzleError> {
        let current = HoppersConfig::from_file(path)?;
        Ok(Self {
            file: path.to_owned(),
            current,
            selected: None,
            status: GameStatus::Ready,
        })
    }

    pub fn board(&self) -> &HoppersConfig {
        &self.current
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// First select picks a frog, second select attempts the jump.
    pub fn select(&mut self, coord: Coordinates) -> String {
        match self.selected.take() {
            None => match self.current.frog_at(coord) {
                Some(frog) => {
                    self.selected = Some(coord);
                    format!("Selected {frog} at {coord}")
                }
                None => format!("No frog at {coord}"),
            },
            Some(from) => match self.current.try_jump(from, coord) {
                Some(next) => {
                    self.current = next;
                    self.update_status();
                    match self.status {
                        GameStatus::Won => "You won!".to_owned(),
                        GameStatus::Stuck => "No jumps left!".to_owned(),
                        _ => format!("Jumped from {from} to {coord}"),
                    }
                }
                None => format!("Can't jump from {from} to {coord}"),
            },
        }
    }

    /// Advances the board one step along a shortest solution.
    pub fn hint(&mut self) -> String {
        if self.current.is_solution() {
            return "Already solved!".to_owned();
        }
        let mut solver = Solver::new();
        let path = solver.solve(self.current.clone());
        if path.is_empty() {
            "No solution!".to_owned()
        } else {
            self.current = path[1].clone();
            self.update_status();
            if self.status == GameStatus::Won {
                "You won!".to_owned()
            } else {
                "Next step!".to_owned()
            }
        }
    }

    /// Reloads the board from `path` and makes it the current puzzle.
    pub fn load(&mut self, path: &Path) -> String {
        match HoppersConfig::from_file(path) {
            Ok(config) => {
                self.file = path.to_owned();
                self.current = config;
                self.selected = None;
                self.status = GameStatus::Ready;
                format!("Loaded: {}", path.display())
            }
            Err(error) => format!("Failed to load puzzle: {error}"),
        }
    }

    /// Restores the initial configuration of the current file.
    pub fn reset(&mut self) -> String {
        let file = self.file.clone();
        self.load(&file);
        "Puzzle reset!".to_owned()
    }

    fn update_status(&mut self) {
        self.status = if self.current.is_solution() {
            GameStatus::Won
        } else if self.current.neighbors().is_empty() {
            GameStatus::Stuck
        } else {
            GameStatus::Ongoing
        };
    }
}

// Board with row and column headers, the way the original text UI drew it.
impl fmt::Display for HoppersModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.current.cols() {
            write!(f, "{col} ")?;
        }
        write!(f, "\n  ")?;
        for _ in 0..self.current.cols() {
            write!(f, "--")?;
        }
        writeln!(f)?;
        for (row, line) in self.current.to_string().lines().enumerate() {
            writeln!(f, "{row}| {line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: i32, cols: i32, lines: &[&str]) -> HoppersConfig {
        HoppersConfig::from_spec(
            HoppersSpec {
                rows,
                cols,
                board: lines.iter().map(|line| (*line).to_owned()).collect(),
            },
            "test",
        )
        .unwrap()
    }

    #[test]
    fn test_long_jump_captures_and_solves() {
        // Red on an even-even cell, green two pads east, empty landing pad.
        let config = board(1, 5, &["R.G.."]);
        let mut solver = Solver::new();
        let path = solver.solve(config);
        assert_eq!(path.len(), 2);
        assert!(path[1].is_solution());
        assert_eq!(path[1].frog_at(Coordinates::new(0, 4)), Some('R'));
        assert_eq!(path[1].frog_at(Coordinates::new(0, 2)), None);
    }

    #[test]
    fn test_diagonal_jump() {
        let config = board(3, 3, &["..G", ".G.", "R.."]);
        // Red at (2,0) jumps over the green at (1,1) to (0,2)? That pad
        // holds the other green, so the only capture is green-over-green:
        // (0,2) over (1,1) is blocked the same way. Green at (0,2) jumps
        // over (1,1) to (2,0)? Occupied by red. No diagonal moves at all.
        assert!(config.neighbors().is_empty());

        let config = board(3, 3, &["...", ".G.", "R.."]);
        let neighbors = config.neighbors();
        // Red (2,0) over green (1,1) to (0,2) is the single legal jump.
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].frog_at(Coordinates::new(0, 2)), Some('R'));
        assert!(neighbors[0].is_solution());
    }

    #[test]
    fn test_red_frog_cannot_be_captured() {
        // Green could jump the red orthogonally if reds were fair game.
        let config = board(1, 5, &["G.R.."]);
        assert!(config.neighbors().is_empty());
    }

    #[test]
    fn test_long_jump_needs_even_even_cell() {
        // Same shape as the solvable strip, shifted to an odd row.
        let config = board(2, 5, &["*.*.*", "R.G.."]);
        assert!(config.neighbors().is_empty());
    }

    #[test]
    fn test_landing_pad_must_be_empty() {
        let config = board(1, 5, &["R.G.G"]);
        assert!(config.neighbors().is_empty());
    }

    #[test]
    fn test_all_jumps_emitted() {
        // Red in the middle with greens on both diagonals: both jumps show
        // up, not just the first one found.
        let config = board(5, 5, &[".....", ".G.G.", "..R..", ".....", "....."]);
        let neighbors = config.neighbors();
        let red_cells: Vec<Coordinates> = neighbors
            .iter()
            .map(|n| {
                (0..5)
                    .flat_map(|row| (0..5).map(move |col| Coordinates::new(row, col)))
                    .find(|&c| n.frog_at(c) == Some('R'))
                    .unwrap()
            })
            .collect();
        assert!(red_cells.contains(&Coordinates::new(0, 0)));
        assert!(red_cells.contains(&Coordinates::new(0, 4)));
        assert_eq!(neighbors.len(), 2);
    }

    #[test]
    fn test_stuck_board_exhausts() {
        // A lone green with nothing to jump: unsolvable, search exhausts.
        let config = board(1, 5, &["G...R"]);
        let mut solver = Solver::new();
        assert!(solver.solve(config).is_empty());
    }

    #[test]
    fn test_two_capture_solve() {
        // Red clears both greens: diagonal to (0,0), then long jump east.
        let config = board(5, 5, &[".*G*.", "*G*.*", ".*R*.", "*.*.*", ".*.*."]);
        let mut solver = Solver::new();
        let path = solver.solve(config);
        assert_eq!(path.len(), 3);
        assert!(path[2].is_solution());
    }

    #[test]
    fn test_rejects_malformed_boards() {
        let bad_row = HoppersConfig::from_spec(
            HoppersSpec {
                rows: 2,
                cols: 3,
                board: vec!["...".to_owned(), "..".to_owned()],
            },
            "test",
        );
        assert!(bad_row.is_err());

        let bad_symbol = HoppersConfig::from_spec(
            HoppersSpec {
                rows: 1,
                cols: 3,
                board: vec!["R.x".to_owned()],
            },
            "test",
        );
        assert!(bad_symbol.is_err());

        let no_red = HoppersConfig::from_spec(
            HoppersSpec {
                rows: 1,
                cols: 3,
                board: vec!["G..".to_owned()],
            },
            "test",
        );
        assert!(no_red.is_err());
    }

    #[test]
    fn test_model_two_select_jump() {
        let mut model = HoppersModel {
            file: PathBuf::from("test"),
            current: board(1, 5, &["R.G.."]),
            selected: None,
            status: GameStatus::Ready,
        };

        assert!(model.select(Coordinates::new(0, 1)).starts_with("No frog"));
        assert!(model.select(Coordinates::new(0, 0)).starts_with("Selected R"));
        assert_eq!(model.select(Coordinates::new(0, 4)), "You won!");
        assert_eq!(model.status(), GameStatus::Won);
    }

    #[test]
    fn test_model_jump_into_stuck_position() {
        // After the first capture the remaining green has no legal jump.
        let mut model = HoppersModel {
            file: PathBuf::from("test"),
            current: board(1, 8, &["R.G...G."]),
            selected: None,
            status: GameStatus::Ready,
        };

        model.select(Coordinates::new(0, 0));
        assert_eq!(model.select(Coordinates::new(0, 4)), "No jumps left!");
        assert_eq!(model.status(), GameStatus::Stuck);
        assert_eq!(model.hint(), "No solution!");
    }

    #[test]
    fn test_model_hint_advances_board() {
        let mut model = HoppersModel {
            file: PathBuf::from("test"),
            current: board(1, 5, &["R.G.."]),
            selected: None,
            status: GameStatus::Ready,
        };

        assert_eq!(model.hint(), "You won!");
        assert_eq!(model.status(), GameStatus::Won);
        assert_eq!(model.hint(), "Already solved!");
    }

    #[test]
    fn test_model_rejects_bad_jump() {
        let mut model = HoppersModel {
            file: PathBuf::from("test"),
            current: board(1, 5, &["R.G.."]),
            selected: None,
            status: GameStatus::Ready,
        };

        model.select(Coordinates::new(0, 0));
        assert!(model
            .select(Coordinates::new(0, 3))
            .starts_with("Can't jump"));
    }
}
