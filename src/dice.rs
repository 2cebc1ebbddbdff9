//! Dice puzzle: roll each die through its face-adjacency graph until the
//! whole hand reads the target string.
//!
//! Adjacency tables live in per-die JSON files, are validated once at load
//! time, and are shared immutably by every configuration in a search.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use smallvec::SmallVec;

use crate::error::PuzzleError;
use crate::solver::Configuration;

/// A die file as written on disk.
#[derive(Debug, Deserialize)]
struct DieSpec {
    faces: usize,
    adjacent: BTreeMap<char, Vec<char>>,
}

/// One die's face-adjacency table.
///
/// Loaded once, then shared read-only across a whole search; no
/// configuration ever mutates it.
#[derive(Debug)]
pub struct Die {
    file_name: String,
    faces: usize,
    adjacent: BTreeMap<char, SmallVec<[char; 8]>>,
}

impl Die {
    /// Loads and validates a die file.
    pub fn from_file(path: &Path) -> Result<Self, PuzzleError> {
        let text = fs::read_to_string(path).map_err(|source| PuzzleError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&path.display().to_string(), &text)
    }

    fn from_json(name: &str, text: &str) -> Result<Self, PuzzleError> {
        let spec: DieSpec = serde_json::from_str(text).map_err(|source| PuzzleError::Parse {
            path: name.into(),
            source,
        })?;

        if spec.faces == 0 {
            return Err(PuzzleError::invalid(name, "a die needs at least one face"));
        }
        if spec.adjacent.len() != spec.faces {
            return Err(PuzzleError::invalid(
                name,
                format!(
                    "die declares {} faces but lists {}",
                    spec.faces,
                    spec.adjacent.len()
                ),
            ));
        }
        for (face, neighbors) in &spec.adjacent {
            for neighbor in neighbors {
                if neighbor == face {
                    return Err(PuzzleError::invalid(
                        name,
                        format!("face {face} is adjacent to itself"),
                    ));
                }
                if !spec.adjacent.contains_key(neighbor) {
                    return Err(PuzzleError::invalid(
                        name,
                        format!("face {face} lists unknown neighbor {neighbor}"),
                    ));
                }
            }
        }

        Ok(Self {
            file_name: name.to_owned(),
            faces: spec.faces,
            adjacent: spec
                .adjacent
                .into_iter()
                .map(|(face, neighbors)| (face, neighbors.into_iter().collect()))
                .collect(),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn faces(&self) -> usize {
        self.faces
    }

    /// Whether `face` exists on this die.
    pub fn has_face(&self, face: char) -> bool {
        self.adjacent.contains_key(&face)
    }

    /// Faces reachable from `face` in one roll (empty for an unknown face).
    pub fn adjacent(&self, face: char) -> &[char] {
        self.adjacent.get(&face).map_or(&[], |list| list.as_slice())
    }

    /// Every face paired with its adjacency list, in face order.
    pub fn faces_and_adjacent(&self) -> impl Iterator<Item = (char, &[char])> + '_ {
        self.adjacent
            .iter()
            .map(|(face, list)| (*face, list.as_slice()))
    }
}

/// One roll state across every die in the hand.
#[derive(Debug, Clone)]
pub struct DiceConfig {
    dice: Arc<[Die]>,
    current: String,
    end: String,
}

impl DiceConfig {
    /// Builds the starting configuration, checking both roll strings against
    /// the dice.
    pub fn new(dice: Arc<[Die]>, start: &str, end: &str) -> Result<Self, PuzzleError> {
        for (name, roll) in [("start", start), ("end", end)] {
            let faces: Vec<char> = roll.chars().collect();
            if faces.len() != dice.len() {
                return Err(PuzzleError::invalid(
                    "dice",
                    format!(
                        "{name} roll {roll:?} names {} faces for {} dice",
                        faces.len(),
                        dice.len()
                    ),
                ));
            }
            for (index, &face) in faces.iter().enumerate() {
                if !dice[index].has_face(face) {
                    return Err(PuzzleError::invalid(
                        "dice",
                        format!("die #{index} has no face {face} ({name} roll {roll:?})"),
                    ));
                }
            }
        }
        Ok(Self {
            dice,
            current: start.to_owned(),
            end: end.to_owned(),
        })
    }

    /// The current roll, one face character per die.
    pub fn current(&self) -> &str {
        &self.current
    }
}

impl Configuration for DiceConfig {
    fn is_solution(&self) -> bool {
        self.current == self.end
    }

    /// Every roll that changes exactly one die to an adjacent face.
    fn neighbors(&self) -> Vec<Self> {
        let faces: Vec<char> = self.current.chars().collect();
        let mut neighbors = Vec::new();
        for (index, &face) in faces.iter().enumerate() {
            for &next in self.dice[index].adjacent(face) {
                let mut roll = faces.clone();
                roll[index] = next;
                neighbors.push(Self {
                    dice: Arc::clone(&self.dice),
                    current: roll.iter().collect(),
                    end: self.end.clone(),
                });
            }
        }
        neighbors
    }
}

// Two rolls are the same state only when they come from the same shared
// table set; the target roll stays out, like the clock's end hour.
impl PartialEq for DiceConfig {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.dice, &other.dice) && self.current == other.current
    }
}

impl Eq for DiceConfig {}

impl Hash for DiceConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.current.hash(state);
    }
}

impl fmt::Display for DiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current)
    }
}
