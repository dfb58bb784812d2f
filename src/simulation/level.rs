//! Level definitions and decoding
//!
//! A level is an immutable template: a rectangular grid of integer cell
//! codes plus a tile budget and a turn budget. The core consumes this
//! format, it does not author it; front ends may ship levels as data files
//! (the definition is serde-serializable) or use the built-in campaign.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::car::Car;
use super::grid::GridModel;
use super::types::{CarId, CellKind, GridCoord, GroupId};

/// Cell code for an empty cell
pub const CODE_EMPTY: u8 = 0;
/// Cell code for a pre-placed road tile (counts against the tile budget)
pub const CODE_ROAD: u8 = 1;
/// Cell code for an obstacle
pub const CODE_OBSTACLE: u8 = 4;
/// Cell codes 80-89 spawn a car with group id `code - 80`
pub const CODE_SPAWN_BASE: u8 = 80;
/// Cell codes 90-99 place a destination with group id `code - 90`
pub const CODE_DEST_BASE: u8 = 90;

/// An immutable level template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    /// Row-major grid of cell codes; every row must have the same length
    pub layout: Vec<Vec<u8>>,
    /// Maximum number of road tiles the player may have placed at once
    pub max_tiles: u32,
    /// Maximum number of ticks before the episode fails
    pub max_turns: u32,
}

/// Errors raised while decoding a level definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level layout has no cells")]
    EmptyLayout,
    #[error("layout row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell code {code} at ({x}, {y})")]
    UnknownCellCode { code: u8, x: usize, y: usize },
    #[error("car group {} has no destination in the layout", .group.0)]
    UnboundCar { group: GroupId },
    #[error("level starts with {roads} road tiles but allows only {max_tiles}")]
    RoadsOverBudget { roads: u32, max_tiles: u32 },
}

/// The result of decoding a level: a mutable grid and the cars placed on it
#[derive(Debug, Clone)]
pub struct DecodedLevel {
    pub grid: GridModel,
    /// Cars in ascending id order (row-major scan order of their spawns)
    pub cars: Vec<Car>,
}

impl LevelDefinition {
    /// Decodes the layout into a grid model and the ordered car list.
    ///
    /// Car ids are assigned in row-major scan order of the spawn markers,
    /// which fixes the movement priority for the whole episode. Each car
    /// binds to the first destination in scan order sharing its group id;
    /// a group without any destination is a decoding error.
    pub fn decode(&self) -> Result<DecodedLevel, LevelError> {
        let height = self.layout.len();
        let width = self.layout.first().map(Vec::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(LevelError::EmptyLayout);
        }

        let mut cells = Vec::with_capacity(width * height);
        let mut spawns: Vec<(GridCoord, GroupId)> = Vec::new();
        let mut destinations: Vec<(GridCoord, GroupId)> = Vec::new();
        let mut initial_roads = 0u32;

        for (y, row) in self.layout.iter().enumerate() {
            if row.len() != width {
                return Err(LevelError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }

            for (x, &code) in row.iter().enumerate() {
                let coord = GridCoord::new(x as i32, y as i32);
                let kind = match code {
                    CODE_EMPTY => CellKind::Empty,
                    CODE_ROAD => {
                        initial_roads += 1;
                        CellKind::Road
                    }
                    CODE_OBSTACLE => CellKind::Obstacle,
                    // A spawn marker is neither pavable nor traversable, so
                    // the cell beneath the car is an obstacle; the car itself
                    // is tracked separately.
                    c if (CODE_SPAWN_BASE..=CODE_SPAWN_BASE + 9).contains(&c) => {
                        spawns.push((coord, GroupId(c - CODE_SPAWN_BASE)));
                        CellKind::Obstacle
                    }
                    c if (CODE_DEST_BASE..=CODE_DEST_BASE + 9).contains(&c) => {
                        let group = GroupId(c - CODE_DEST_BASE);
                        destinations.push((coord, group));
                        CellKind::Destination { group }
                    }
                    other => {
                        return Err(LevelError::UnknownCellCode { code: other, x, y });
                    }
                };
                cells.push(kind);
            }
        }

        if initial_roads > self.max_tiles {
            return Err(LevelError::RoadsOverBudget {
                roads: initial_roads,
                max_tiles: self.max_tiles,
            });
        }

        let mut cars = Vec::with_capacity(spawns.len());
        for (index, (position, group)) in spawns.into_iter().enumerate() {
            let destination = destinations
                .iter()
                .find(|(_, dest_group)| *dest_group == group)
                .map(|(coord, _)| *coord)
                .ok_or(LevelError::UnboundCar { group })?;
            cars.push(Car::new(CarId(index), group, position, destination));
        }

        let grid = GridModel::from_cells(
            width as u32,
            height as u32,
            cells,
            initial_roads,
            self.max_tiles,
        );

        Ok(DecodedLevel { grid, cars })
    }
}

/// The built-in campaign: four hand-made 16x12 levels of rising difficulty
pub fn builtin_levels() -> Vec<LevelDefinition> {
    vec![
        LevelDefinition {
            name: "Level 1".to_string(),
            layout: vec![
                vec![0, 0, 84, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 94, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 86, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 96, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            ],
            max_tiles: 30,
            max_turns: 20,
        },
        LevelDefinition {
            name: "Level 2".to_string(),
            layout: vec![
                vec![0, 0, 84, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 94, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 86, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 96, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0],
                vec![4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4],
            ],
            max_tiles: 20,
            max_turns: 16,
        },
        LevelDefinition {
            name: "Level 3".to_string(),
            layout: vec![
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0],
                vec![0, 0, 0, 86, 0, 0, 0, 0, 0, 0, 0, 94, 0, 0, 0, 0],
                vec![0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 84, 0, 0, 0, 0, 0, 0, 0, 96, 0, 0, 4, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            ],
            max_tiles: 21,
            max_turns: 16,
        },
        LevelDefinition {
            name: "Level 4".to_string(),
            layout: vec![
                vec![0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 86, 0, 0, 0, 4, 0, 0, 0, 94, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 84, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 96, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0],
            ],
            max_tiles: 24,
            max_turns: 18,
        },
    ]
}
