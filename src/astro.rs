//! Astro puzzle: the astronaut and a set of robots slide until something
//! stops them; the astronaut must come to rest on the goal cell.
//!
//! A slide keeps going until the cell before the first occupied cell, or
//! ends on the goal itself when the way there is clear. With no piece (and
//! no goal) in the line of travel the mover would drift off the board, so
//! that slide is not a move at all.

use std::fmt;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::board::{cell_index, Coordinates, Direction};
use crate::error::PuzzleError;
use crate::solver::{Configuration, Solver};

/// Symbol of the piece that has to reach the goal.
pub const ASTRONAUT: char = 'A';

const EMPTY: u8 = b'.';
const GOAL_MARK: char = '*';

/// A board file as written on disk.
#[derive(Debug, Deserialize)]
struct AstroSpec {
    rows: i32,
    cols: i32,
    goal: Coordinates,
    astronaut: Coordinates,
    #[serde(default)]
    robots: Vec<RobotSpec>,
}

#[derive(Debug, Deserialize)]
struct RobotSpec {
    symbol: char,
    row: i32,
    col: i32,
}

/// One arrangement of the astronaut and robots.
///
/// The grid stores piece symbols only. The goal is a coordinate of its own,
/// not a grid occupant, so a robot resting on it never erases it. `astro`
/// caches the astronaut's cell; it is derivable from the grid and stays out
/// of equality and hashing.
#[derive(Debug, Clone)]
pub struct AstroConfig {
    rows: i32,
    cols: i32,
    grid: Vec<u8>,
    goal: Coordinates,
    astro: Coordinates,
}

impl AstroConfig {
    /// Loads and validates a board file.
    pub fn from_file(path: &Path) -> Result<Self, PuzzleError> {
        let text = fs::read_to_string(path).map_err(|source| PuzzleError::Io {
            path: path.to_owned(),
            source,
        })?;
        let name = path.display().to_string();
        let spec: AstroSpec = serde_json::from_str(&text).map_err(|source| PuzzleError::Parse {
            path: path.to_owned(),
            source,
        })?;
        Self::from_spec(spec, &name)
    }

    fn from_spec(spec: AstroSpec, name: &str) -> Result<Self, PuzzleError> {
        if spec.rows <= 0 || spec.cols <= 0 {
            return Err(PuzzleError::invalid(
                name,
                format!("board is {}x{}", spec.rows, spec.cols),
            ));
        }
        let mut config = Self {
            rows: spec.rows,
            cols: spec.cols,
            grid: vec![EMPTY; (spec.rows * spec.cols) as usize],
            goal: spec.goal,
            astro: spec.astronaut,
        };
        if cell_index(spec.rows, spec.cols, spec.goal).is_none() {
            return Err(PuzzleError::invalid(
                name,
                format!("goal {} is off the board", spec.goal),
            ));
        }
        config.place(name, ASTRONAUT, spec.astronaut)?;
        for robot in &spec.robots {
            if !robot.symbol.is_ascii_uppercase() || robot.symbol == ASTRONAUT {
                return Err(PuzzleError::invalid(
                    name,
                    format!("robot symbol {:?} is not an uppercase letter", robot.symbol),
                ));
            }
            config.place(name, robot.symbol, Coordinates::new(robot.row, robot.col))?;
        }
        Ok(config)
    }

    fn place(&mut self, name: &str, symbol: char, at: Coordinates) -> Result<(), PuzzleError> {
        let Some(index) = cell_index(self.rows, self.cols, at) else {
            return Err(PuzzleError::invalid(
                name,
                format!("piece {symbol} at {at} is off the board"),
            ));
        };
        if self.grid[index] != EMPTY {
            return Err(PuzzleError::invalid(
                name,
                format!("two pieces share cell {at}"),
            ));
        }
        self.grid[index] = symbol as u8;
        Ok(())
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn goal(&self) -> Coordinates {
        self.goal
    }

    pub fn astronaut(&self) -> Coordinates {
        self.astro
    }

    /// The piece symbol at `coord`, if the cell is in bounds and occupied.
    pub fn piece_at(&self, coord: Coordinates) -> Option<char> {
        match self.cell(coord) {
            Some(EMPTY) | None => None,
            Some(symbol) => Some(symbol as char),
        }
    }

    fn cell(&self, coord: Coordinates) -> Option<u8> {
        cell_index(self.rows, self.cols, coord).map(|index| self.grid[index])
    }

    /// Where the piece at `from` comes to rest sliding toward `direction`,
    /// or `None` when nothing stops it before the edge.
    pub(crate) fn slide_target(&self, from: Coordinates, direction: Direction) -> Option<Coordinates> {
        let mut scan = from.step(direction);
        loop {
            match self.cell(scan) {
                // Ran off the board without a stop: not a move.
                None => return None,
                Some(EMPTY) => {
                    if scan == self.goal {
                        return Some(scan);
                    }
                    scan = scan.step(direction);
                }
                // Occupied: rest one cell short of it.
                Some(_) => {
                    let (d_row, d_col) = direction.delta();
                    let stop = scan.offset(-d_row, -d_col);
                    return (stop != from).then_some(stop);
                }
            }
        }
    }

    /// The configuration after moving the piece at `from` to `to`.
    ///
    /// Both coordinates must be in bounds, `from` occupied and `to` empty.
    pub(crate) fn moved(&self, from: Coordinates, to: Coordinates) -> Self {
        let from_index = cell_index(self.rows, self.cols, from).expect("move source in bounds");
        let to_index = cell_index(self.rows, self.cols, to).expect("move target in bounds");
        let mut next = self.clone();
        next.grid[to_index] = next.grid[from_index];
        next.grid[from_index] = EMPTY;
        if from == self.astro {
            next.astro = to;
        }
        next
    }
}

impl Configuration for AstroConfig {
    fn is_solution(&self) -> bool {
        self.astro == self.goal
    }

    /// Every legal slide of every piece, scanned row-major, directions in
    /// [`Direction::ALL`] order.
    fn neighbors(&self) -> Vec<Self> {
        let mut neighbors = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let from = Coordinates::new(row, col);
                if self.piece_at(from).is_none() {
                    continue;
                }
                for direction in Direction::ALL {
                    if let Some(to) = self.slide_target(from, direction) {
                        neighbors.push(self.moved(from, to));
                    }
                }
            }
        }
        neighbors
    }
}

// The goal never changes within a search; the full grid is what identifies
// a state. The cached astronaut cell is derived from the grid and excluded.
impl PartialEq for AstroConfig {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.grid == other.grid
    }
}

impl Eq for AstroConfig {}

impl Hash for AstroConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows.hash(state);
        self.cols.hash(state);
        self.grid.hash(state);
    }
}

impl fmt::Display for AstroConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                let coord = Coordinates::new(row, col);
                match self.piece_at(coord) {
                    Some(symbol) => write!(f, "{symbol}")?,
                    None if coord == self.goal => write!(f, "{GOAL_MARK}")?,
                    None => write!(f, ".")?,
                }
            }
        }
        Ok(())
    }
}

/// Interactive wrapper for the play mode: select a piece, slide it in a
/// direction, ask for a hint.
///
/// Mutating verbs return the status line the text UI prints -- the
/// original's observer wiring, folded into return values.
#[derive(Debug)]
pub struct AstroModel {
    file: PathBuf,
    current: AstroConfig,
    selected: Option<Coordinates>,
}

impl AstroModel {
    pub fn from_file(path: &Path) -> Result<Self, PuzzleError> {
        Ok(Self {
            file: path.to_owned(),
            current: AstroConfig::from_file(path)?,
            selected: None,
        })
    }

    pub fn board(&self) -> &AstroConfig {
        &self.current
    }

    /// Marks the piece at `coord` for the next move.
    pub fn select(&mut self, coord: Coordinates) -> String {
        match self.current.piece_at(coord) {
            Some(symbol) => {
                self.selected = Some(coord);
                format!("Selected {symbol} at {coord}")
            }
            None => {
                self.selected = None;
                format!("No piece at {coord}")
            }
        }
    }

    /// Slides the selected piece toward `direction`.
    pub fn move_selected(&mut self, direction: Direction) -> String {
        let Some(from) = self.selected.take() else {
            return "Select a piece before moving".to_owned();
        };
        match self.current.slide_target(from, direction) {
            Some(to) => {
                self.current = self.current.moved(from, to);
                if self.current.is_solution() {
                    "You won!".to_owned()
                } else {
                    format!("Moved {from} {direction}")
                }
            }
            None => format!("Can't move piece at {from} {direction}"),
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
            if self.current.is_solution() {
                "You won!".to_owned()
            } else {
                "Next step!".to_owned()
            }
        }
    }

    /// Reloads the board from `path` and makes it the current puzzle.
    pub fn load(&mut self, path: &Path) -> String {
        match AstroConfig::from_file(path) {
            Ok(config) => {
                self.file = path.to_owned();
                self.current = config;
                self.selected = None;
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
}

// Board with row and column headers, the way the original text UI drew it.
impl fmt::Display for AstroModel {
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

    fn spec_json(text: &str) -> AstroConfig {
        let spec: AstroSpec = serde_json::from_str(text).unwrap();
        AstroConfig::from_spec(spec, "test").unwrap()
    }

    /// 1x3 strip: astronaut on the left, goal on the right, nothing between.
    fn strip() -> AstroConfig {
        spec_json(
            r#"{
                "rows": 1, "cols": 3,
                "goal": {"row": 0, "col": 2},
                "astronaut": {"row": 0, "col": 0}
            }"#,
        )
    }

    /// 4x4 board solvable in two moves: slide east to the robot, then north
    /// onto the goal.
    fn two_mover() -> AstroConfig {
        spec_json(
            r#"{
                "rows": 4, "cols": 4,
                "goal": {"row": 1, "col": 2},
                "astronaut": {"row": 3, "col": 0},
                "robots": [
                    {"symbol": "B", "row": 0, "col": 2},
                    {"symbol": "C", "row": 3, "col": 3}
                ]
            }"#,
        )
    }

    #[test]
    fn test_slides_onto_goal_in_one_move() {
        let mut solver = Solver::new();
        let path = solver.solve(strip());
        assert_eq!(path.len(), 2);
        assert!(path[1].is_solution());
        assert_eq!(path[1].astronaut(), Coordinates::new(0, 2));
        assert_eq!(path[1].piece_at(Coordinates::new(0, 2)), Some(ASTRONAUT));
        assert_eq!(path[1].piece_at(Coordinates::new(0, 0)), None);
    }

    #[test]
    fn test_no_blocker_means_no_move() {
        let config = strip();
        // West, north and south all run off the board; east reaches the
        // goal. Exactly one neighbor.
        assert_eq!(config.neighbors().len(), 1);
    }

    #[test]
    fn test_slide_stops_before_piece() {
        let config = two_mover();
        let stop = config.slide_target(Coordinates::new(3, 0), Direction::East);
        assert_eq!(stop, Some(Coordinates::new(3, 2)));
    }

    #[test]
    fn test_adjacent_blocker_is_not_a_move() {
        let config = spec_json(
            r#"{
                "rows": 1, "cols": 4,
                "goal": {"row": 0, "col": 3},
                "astronaut": {"row": 0, "col": 0},
                "robots": [{"symbol": "B", "row": 0, "col": 1}]
            }"#,
        );
        // The robot is directly adjacent: sliding east moves nowhere.
        assert_eq!(config.slide_target(Coordinates::new(0, 0), Direction::East), None);
    }

    #[test]
    fn test_two_move_solution() {
        let mut solver = Solver::new();
        let path = solver.solve(two_mover());
        assert_eq!(path.len(), 3);
        assert!(path[2].is_solution());
    }

    #[test]
    fn test_robot_resting_on_goal_keeps_marker() {
        let config = spec_json(
            r#"{
                "rows": 2, "cols": 3,
                "goal": {"row": 0, "col": 1},
                "astronaut": {"row": 1, "col": 0},
                "robots": [{"symbol": "B", "row": 0, "col": 0}]
            }"#,
        );
        // The robot can slide east onto the goal and away again; the goal
        // coordinate survives both.
        let parked = config.moved(Coordinates::new(0, 0), Coordinates::new(0, 1));
        assert_eq!(parked.goal(), Coordinates::new(0, 1));
        assert!(!parked.is_solution());
    }

    #[test]
    fn test_equality_covers_whole_grid() {
        // Same astronaut cell, different robot cell: distinct states.
        let a = spec_json(
            r#"{
                "rows": 2, "cols": 4,
                "goal": {"row": 0, "col": 3},
                "astronaut": {"row": 0, "col": 0},
                "robots": [{"symbol": "B", "row": 1, "col": 1}]
            }"#,
        );
        let b = spec_json(
            r#"{
                "rows": 2, "cols": 4,
                "goal": {"row": 0, "col": 3},
                "astronaut": {"row": 0, "col": 0},
                "robots": [{"symbol": "B", "row": 1, "col": 2}]
            }"#,
        );
        assert_ne!(a, b);
    }

    fn try_spec(text: &str) -> Result<AstroConfig, PuzzleError> {
        let spec: AstroSpec = serde_json::from_str(text).unwrap();
        AstroConfig::from_spec(spec, "test")
    }

    #[test]
    fn test_rejects_malformed_boards() {
        // Two pieces on one cell.
        assert!(try_spec(
            r#"{
                "rows": 2, "cols": 2,
                "goal": {"row": 0, "col": 1},
                "astronaut": {"row": 0, "col": 0},
                "robots": [{"symbol": "B", "row": 0, "col": 0}]
            }"#
        )
        .is_err());
        // Goal off the board.
        assert!(try_spec(
            r#"{
                "rows": 2, "cols": 2,
                "goal": {"row": 5, "col": 0},
                "astronaut": {"row": 0, "col": 0}
            }"#
        )
        .is_err());
        // Lowercase robot symbol.
        assert!(try_spec(
            r#"{
                "rows": 2, "cols": 2,
                "goal": {"row": 0, "col": 1},
                "astronaut": {"row": 0, "col": 0},
                "robots": [{"symbol": "b", "row": 1, "col": 0}]
            }"#
        )
        .is_err());
    }

    #[test]
    fn test_display_marks_goal() {
        assert_eq!(strip().to_string(), "A . *");
    }

    #[test]
    fn test_model_select_and_move() {
        let spec: AstroSpec = serde_json::from_str(
            r#"{
                "rows": 1, "cols": 3,
                "goal": {"row": 0, "col": 2},
                "astronaut": {"row": 0, "col": 0}
            }"#,
        )
        .unwrap();
        let mut model = AstroModel {
            file: PathBuf::from("test"),
            current: AstroConfig::from_spec(spec, "test").unwrap(),
            selected: None,
        };

        assert!(model.select(Coordinates::new(0, 1)).starts_with("No piece"));
        assert!(model.move_selected(Direction::East).starts_with("Select a piece"));

        assert!(model.select(Coordinates::new(0, 0)).starts_with("Selected A"));
        assert_eq!(model.move_selected(Direction::East), "You won!");
        assert!(model.board().is_solution());
    }

    #[test]
    fn test_model_hint_advances_board() {
        let mut model = AstroModel {
            file: PathBuf::from("test"),
            current: two_mover(),
            selected: None,
        };

        assert_eq!(model.hint(), "Next step!");
        assert_eq!(model.hint(), "You won!");
        assert_eq!(model.hint(), "Already solved!");
    }
}
