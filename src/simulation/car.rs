//! Car entities for the road puzzle
//!
//! A car occupies one grid cell, belongs to a color group and is bound to a
//! single destination cell at load time. Its route is planned once when the
//! simulation starts and then consumed one step per tick.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::types::{CarId, GridCoord, GroupId};

/// A car on the grid
#[derive(Debug, Clone)]
pub struct Car {
    pub id: CarId,
    pub group: GroupId,
    pub position: GridCoord,
    /// The destination cell this car was bound to at load time
    pub destination: GridCoord,
    /// Remaining route; the front element is the next cell to move into.
    /// Empty either because no route was found or because it was consumed.
    pub path: VecDeque<GridCoord>,
    /// One-way flag: set when the car arrives, never cleared. Reached cars
    /// stop moving and stop blocking other cars.
    pub reached: bool,
}

impl Car {
    pub fn new(id: CarId, group: GroupId, position: GridCoord, destination: GridCoord) -> Self {
        Self {
            id,
            group,
            position,
            destination,
            path: VecDeque::new(),
            reached: false,
        }
    }

    /// Installs a freshly planned route
    pub(crate) fn set_path(&mut self, path: Vec<GridCoord>) {
        self.path = path.into();
    }
}

/// One car's planned route, reported when the simulation starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub car: CarId,
    pub group: GroupId,
    /// The planned cells from first step to destination; empty when the car
    /// has no route, which will fail the episode on the car's first turn
    pub path: Vec<GridCoord>,
}

impl RoutePlan {
    /// Whether a route to the destination was found at all
    pub fn is_routable(&self) -> bool {
        !self.path.is_empty()
    }
}
