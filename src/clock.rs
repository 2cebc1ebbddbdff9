//! Clock puzzle: turn a dial one hour at a time, wrapping at the top, until
//! it reads the target hour.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::PuzzleError;
use crate::solver::Configuration;

/// One dial position on an `hours`-hour clock, searching for `end`.
#[derive(Debug, Clone)]
pub struct ClockConfig {
    hours: u32,
    current: u32,
    end: u32,
}

impl ClockConfig {
    /// Builds the starting configuration, validating the dial parameters.
    pub fn new(hours: u32, start: u32, end: u32) -> Result<Self, PuzzleError> {
        if hours == 0 {
            return Err(PuzzleError::invalid("clock", "a clock needs at least one hour"));
        }
        for (name, value) in [("start", start), ("end", end)] {
            if value < 1 || value > hours {
                return Err(PuzzleError::invalid(
                    "clock",
                    format!("{name} hour {value} is outside 1..={hours}"),
                ));
            }
        }
        Ok(Self {
            hours,
            current: start,
            end,
        })
    }

    /// The hour the dial currently shows.
    pub fn current(&self) -> u32 {
        self.current
    }

    fn at(&self, hour: u32) -> Self {
        Self {
            hours: self.hours,
            current: hour,
            end: self.end,
        }
    }
}

impl Configuration for ClockConfig {
    fn is_solution(&self) -> bool {
        self.current == self.end
    }

    /// One tick forward and one tick backward, both wrapping.
    fn neighbors(&self) -> Vec<Self> {
        let next = self.current % self.hours + 1;
        let previous = if self.current == 1 {
            self.hours
        } else {
            self.current - 1
        };
        vec![self.at(next), self.at(previous)]
    }
}

// The target hour is shared by every configuration in a search, so only the
// dial state takes part in equality and hashing.
impl PartialEq for ClockConfig {
    fn eq(&self, other: &Self) -> bool {
        self.hours == other.hours && self.current == other.current
    }
}

impl Eq for ClockConfig {}

impl Hash for ClockConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hours.hash(state);
        self.current.hash(state);
    }
}

impl fmt::Display for ClockConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current)
    }
}
