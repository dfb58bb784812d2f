//! Error types for the simulation boundary
//!
//! Every fallible operation on the core returns one of these explicitly;
//! nothing panics across the API.

use thiserror::Error;

use super::level::LevelError;
use super::types::{GridCoord, Phase};

/// Errors surfaced by episode and game commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    /// The coordinate lies outside the level grid. Rejected before any
    /// model state is touched.
    #[error("coordinate ({}, {}) is outside the {width}x{height} grid", .coord.x, .coord.y)]
    InvalidCoordinate {
        coord: GridCoord,
        width: u32,
        height: u32,
    },

    /// The command is not valid in the current phase (for example ticking
    /// while still editing, or starting a simulation twice).
    #[error("command is not valid during the {phase:?} phase")]
    WrongPhase { phase: Phase },

    /// No level exists at the requested index.
    #[error("no level at index {index} (have {count})")]
    UnknownLevel { index: usize, count: usize },

    /// The requested level has not been unlocked yet.
    #[error("level {index} is still locked")]
    LevelLocked { index: usize },

    /// `advance_level` was called without a succeeded episode or without a
    /// next level to advance to.
    #[error("cannot advance: current level is not resolved as a success")]
    AdvanceWithoutSuccess,
    #[error("cannot advance: there is no next level")]
    NoNextLevel,

    /// A level definition failed to decode while (re)loading.
    #[error(transparent)]
    Level(#[from] LevelError),
}
