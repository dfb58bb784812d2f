//! Core types for the road puzzle simulation
//!
//! These are standalone types shared by the grid, pathfinding and episode
//! modules. None of them depend on any front end.

use serde::{Deserialize, Serialize};

/// A unique identifier for a car
///
/// Ids are assigned densely in row-major scan order when a level is loaded
/// and double as the movement priority: the lower id moves first each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CarId(pub usize);

/// A color group shared by a car and its destination (0-9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u8);

/// A cell coordinate on the level grid
///
/// `x` grows rightward, `y` grows downward; (0, 0) is the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether `other` is exactly one cell away along one axis
    pub fn is_adjacent(&self, other: &GridCoord) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// What occupies a grid cell
///
/// Only `Empty` and `Road` are player-editable; obstacles and destinations
/// are fixed by the level. Cars are not cells - they sit on top of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Road,
    Obstacle,
    /// A destination cell, traversable and tied to a color group
    Destination { group: GroupId },
}

impl CellKind {
    /// Whether a car may drive through this cell
    pub fn is_traversable(&self) -> bool {
        matches!(self, CellKind::Road | CellKind::Destination { .. })
    }
}

/// The phase of the current episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The player is placing and removing road tiles
    Editing,
    /// Cars are moving; one tick per external time step
    Simulating,
    /// A terminal outcome has been reached
    Resolved,
}

/// Why an episode failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailReason {
    /// The turn budget ran out before every car arrived
    TurnsExhausted,
    /// This car had no route to its destination when it was due to move
    NoRoute(CarId),
}

/// The episode outcome
///
/// `Success` and `Fail` are terminal: once either is reached no further
/// ticks are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Success,
    Fail(FailReason),
}

impl Outcome {
    /// Whether the episode can still change state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}
