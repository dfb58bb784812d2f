//! The editable level grid
//!
//! A fixed-size rectangular array of cells plus the shared road-tile
//! counter. The player may only flip cells between `Empty` and `Road`, and
//! only while the tile counter stays within the level's budget; obstacles,
//! destinations and the cells under car spawns are never editable.

use log::debug;

use super::types::{CellKind, GridCoord};

/// Result of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A road tile was placed; carries the updated tile count
    Placed { tiles_used: u32 },
    /// A road tile was removed; carries the updated tile count
    Removed { tiles_used: u32 },
    /// The cell is not editable or the budget is exhausted; nothing changed
    Rejected,
}

/// The mutable cell grid for one episode
#[derive(Debug, Clone)]
pub struct GridModel {
    width: u32,
    height: u32,
    /// Row-major cell storage, `y * width + x`
    cells: Vec<CellKind>,
    tiles_used: u32,
    max_tiles: u32,
}

impl GridModel {
    /// Builds a grid from already-decoded cells.
    ///
    /// `tiles_used` must equal the number of `Road` cells in `cells`.
    pub(crate) fn from_cells(
        width: u32,
        height: u32,
        cells: Vec<CellKind>,
        tiles_used: u32,
        max_tiles: u32,
    ) -> Self {
        debug_assert_eq!(cells.len(), (width * height) as usize);
        Self {
            width,
            height,
            cells,
            tiles_used,
            max_tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Road tiles currently placed (including any pre-placed by the level)
    pub fn tiles_used(&self) -> u32 {
        self.tiles_used
    }

    /// The level's road-tile budget
    pub fn max_tiles(&self) -> u32 {
        self.max_tiles
    }

    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
    }

    fn index(&self, coord: GridCoord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some((coord.y as u32 * self.width + coord.x as u32) as usize)
        } else {
            None
        }
    }

    /// The kind of the cell at `coord`, or `None` when out of bounds
    pub fn kind(&self, coord: GridCoord) -> Option<CellKind> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Whether a car may drive through the cell at `coord`
    pub fn is_traversable(&self, coord: GridCoord) -> bool {
        self.kind(coord).is_some_and(|kind| kind.is_traversable())
    }

    /// Flips the cell at `coord` between `Empty` and `Road`.
    ///
    /// Placing a road requires the tile counter to be below the budget;
    /// removal is always allowed. Requests on obstacle or destination cells
    /// are rejected without side effects. The coordinate must already be
    /// bounds-checked by the caller.
    pub fn toggle(&mut self, coord: GridCoord) -> ToggleOutcome {
        let Some(index) = self.index(coord) else {
            return ToggleOutcome::Rejected;
        };

        match self.cells[index] {
            CellKind::Empty if self.tiles_used < self.max_tiles => {
                self.cells[index] = CellKind::Road;
                self.tiles_used += 1;
                ToggleOutcome::Placed {
                    tiles_used: self.tiles_used,
                }
            }
            CellKind::Road => {
                self.cells[index] = CellKind::Empty;
                self.tiles_used -= 1;
                ToggleOutcome::Removed {
                    tiles_used: self.tiles_used,
                }
            }
            kind => {
                debug!(
                    "toggle at ({}, {}) rejected: kind {:?}, {}/{} tiles used",
                    coord.x, coord.y, kind, self.tiles_used, self.max_tiles
                );
                ToggleOutcome::Rejected
            }
        }
    }

    /// Read-only view of all cells in row-major order
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }
}
