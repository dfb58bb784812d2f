//! Standalone road-puzzle simulation
//!
//! This module contains the full game core - grid editing, route planning,
//! the turn-based movement simulation and level progression - with no
//! dependency on any rendering or windowing stack. It can be driven from a
//! terminal, a test, or a graphical front end alike: mutate state through
//! [`Game`]/[`Episode`] commands, render from [`Episode::snapshot`].

mod car;
mod episode;
mod error;
mod game;
mod grid;
mod level;
mod pathfinder;
mod types;

pub use car::{Car, RoutePlan};
pub use episode::{CarView, Episode, Snapshot};
pub use error::SimError;
pub use game::{Command, Event, Game};
pub use grid::{GridModel, ToggleOutcome};
pub use level::{
    builtin_levels, DecodedLevel, LevelDefinition, LevelError, CODE_DEST_BASE, CODE_EMPTY,
    CODE_OBSTACLE, CODE_ROAD, CODE_SPAWN_BASE,
};
pub use pathfinder::{find_path, EXPANSION_ORDER};
pub use types::{CarId, CellKind, FailReason, GridCoord, GroupId, Outcome, Phase};
