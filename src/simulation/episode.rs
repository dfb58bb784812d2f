//! One playthrough of one level
//!
//! `Episode` is the aggregate owning all mutable simulation state: the grid,
//! the cars, the budgets, the phase and the outcome. There is no process-wide
//! state anywhere in the crate; drop the episode and the playthrough is gone.
//!
//! The tick engine lives here too. Each tick spends one turn, then visits the
//! not-yet-reached cars in ascending id order. A car whose next cell is taken
//! waits and retries next tick; a car with no route at all fails the episode
//! on the spot.

use std::collections::HashSet;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::car::{Car, RoutePlan};
use super::error::SimError;
use super::grid::{GridModel, ToggleOutcome};
use super::level::{LevelDefinition, LevelError};
use super::pathfinder::find_path;
use super::types::{CarId, CellKind, FailReason, GridCoord, GroupId, Outcome, Phase};

/// All state for one playthrough of one level
#[derive(Debug, Clone)]
pub struct Episode {
    name: String,
    grid: GridModel,
    /// Ascending id order; ids are dense so the index equals the id
    cars: Vec<Car>,
    max_turns: u32,
    turns_left: u32,
    phase: Phase,
    outcome: Outcome,
}

/// Read-only copy of a car for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarView {
    pub id: CarId,
    pub group: GroupId,
    pub position: GridCoord,
    pub destination: GridCoord,
    pub reached: bool,
    pub steps_remaining: usize,
}

/// Read-only copy of the full episode state for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub level_name: String,
    pub phase: Phase,
    pub outcome: Outcome,
    pub width: u32,
    pub height: u32,
    /// Row-major cell kinds
    pub cells: Vec<CellKind>,
    pub cars: Vec<CarView>,
    pub tiles_used: u32,
    pub max_tiles: u32,
    pub turns_left: u32,
    pub max_turns: u32,
}

impl Episode {
    /// Loads a fresh episode from a level definition.
    ///
    /// Decodes the layout, places the cars in id order and starts in the
    /// `Editing` phase with the full turn budget.
    pub fn load(definition: &LevelDefinition) -> Result<Self, LevelError> {
        let decoded = definition.decode()?;
        info!(
            "loaded {:?}: {}x{} grid, {} cars, {} tile budget, {} turn budget",
            definition.name,
            decoded.grid.width(),
            decoded.grid.height(),
            decoded.cars.len(),
            definition.max_tiles,
            definition.max_turns
        );
        Ok(Self {
            name: definition.name.clone(),
            grid: decoded.grid,
            cars: decoded.cars,
            max_turns: definition.max_turns,
            turns_left: definition.max_turns,
            phase: Phase::Editing,
            outcome: Outcome::InProgress,
        })
    }

    pub fn level_name(&self) -> &str {
        &self.name
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn turns_left(&self) -> u32 {
        self.turns_left
    }

    pub fn max_turns(&self) -> u32 {
        self.max_turns
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Cars in ascending id order
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Flips a cell between empty and road during the editing phase.
    ///
    /// Out-of-bounds coordinates are rejected before the grid is touched.
    /// Requests on fixed cells or beyond the tile budget come back as
    /// `ToggleOutcome::Rejected` and change nothing.
    pub fn toggle_tile(&mut self, coord: GridCoord) -> Result<ToggleOutcome, SimError> {
        if self.phase != Phase::Editing {
            return Err(SimError::WrongPhase { phase: self.phase });
        }
        if !self.grid.in_bounds(coord) {
            return Err(SimError::InvalidCoordinate {
                coord,
                width: self.grid.width(),
                height: self.grid.height(),
            });
        }
        Ok(self.grid.toggle(coord))
    }

    /// Plans every car's route and enters the simulating phase.
    ///
    /// Routes are computed exactly once, here, from each car's current
    /// position over the grid as edited; they are never recomputed while the
    /// simulation runs. A car without a route is reported (and logged) but
    /// does not abort the launch - it fails the episode on its first turn,
    /// after lower-id cars have been visited.
    pub fn start_simulation(&mut self) -> Result<Vec<RoutePlan>, SimError> {
        if self.phase != Phase::Editing {
            return Err(SimError::WrongPhase { phase: self.phase });
        }

        let mut plans = Vec::with_capacity(self.cars.len());
        for car in &mut self.cars {
            let path = find_path(&self.grid, car.position, car.destination);
            if path.is_empty() {
                warn!(
                    "car {} (group {}) has no route to ({}, {})",
                    car.id.0, car.group.0, car.destination.x, car.destination.y
                );
            }
            plans.push(RoutePlan {
                car: car.id,
                group: car.group,
                path: path.clone(),
            });
            car.set_path(path);
        }

        self.phase = Phase::Simulating;
        info!("simulation started with {} cars", self.cars.len());
        Ok(plans)
    }

    /// Advances the simulation by exactly one tick.
    ///
    /// Outside the simulating phase this is a no-op that just reports the
    /// current state. One tick spends one turn, then visits every
    /// not-yet-reached car in ascending id order: the car moves into the next
    /// cell of its route unless that cell was claimed by an earlier mover
    /// this tick or is still held by a car that has not moved away, in which
    /// case it waits and retries next tick. A car with an empty route fails
    /// the episode immediately.
    pub fn tick(&mut self) -> (Phase, Outcome) {
        if self.phase != Phase::Simulating {
            return (self.phase, self.outcome);
        }

        if self.turns_left == 0 {
            return self.fail(FailReason::TurnsExhausted);
        }
        self.turns_left -= 1;

        // Cells blocked for this tick: `held` starts as every unreached
        // car's pre-move position and shrinks as cars move away; `claimed`
        // collects the cells moved into. Reached cars appear in neither.
        let mut held: HashSet<GridCoord> = self
            .cars
            .iter()
            .filter(|car| !car.reached)
            .map(|car| car.position)
            .collect();
        let mut claimed: HashSet<GridCoord> = HashSet::new();

        for index in 0..self.cars.len() {
            if self.cars[index].reached {
                continue;
            }

            let Some(&next) = self.cars[index].path.front() else {
                let id = self.cars[index].id;
                return self.fail(FailReason::NoRoute(id));
            };

            if claimed.contains(&next) || held.contains(&next) {
                debug!(
                    "car {} waiting: ({}, {}) is occupied",
                    self.cars[index].id.0, next.x, next.y
                );
                continue;
            }

            let car = &mut self.cars[index];
            held.remove(&car.position);
            car.path.pop_front();
            car.position = next;
            claimed.insert(next);

            if car.position == car.destination {
                car.reached = true;
                debug!("car {} reached its destination", car.id.0);
            }
        }

        if self.cars.iter().all(|car| car.reached) {
            self.outcome = Outcome::Success;
            self.phase = Phase::Resolved;
            info!(
                "{:?} solved with {} turns to spare",
                self.name, self.turns_left
            );
        }

        (self.phase, self.outcome)
    }

    fn fail(&mut self, reason: FailReason) -> (Phase, Outcome) {
        match reason {
            FailReason::TurnsExhausted => info!("{:?} failed: turn budget exhausted", self.name),
            FailReason::NoRoute(id) => info!("{:?} failed: car {} had no route", self.name, id.0),
        }
        self.outcome = Outcome::Fail(reason);
        self.phase = Phase::Resolved;
        (self.phase, self.outcome)
    }

    /// Read-only copy of the full state for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            level_name: self.name.clone(),
            phase: self.phase,
            outcome: self.outcome,
            width: self.grid.width(),
            height: self.grid.height(),
            cells: self.grid.cells().to_vec(),
            cars: self
                .cars
                .iter()
                .map(|car| CarView {
                    id: car.id,
                    group: car.group,
                    position: car.position,
                    destination: car.destination,
                    reached: car.reached,
                    steps_remaining: car.path.len(),
                })
                .collect(),
            tiles_used: self.grid.tiles_used(),
            max_tiles: self.grid.max_tiles(),
            turns_left: self.turns_left,
            max_turns: self.max_turns,
        }
    }

    /// Print a one-screen summary of the episode state
    pub fn print_summary(&self) {
        println!("=== {} ===", self.name);
        println!("Phase: {:?} | Outcome: {:?}", self.phase, self.outcome);
        println!(
            "Tiles: {}/{} | Turns left: {}/{}",
            self.grid.tiles_used(),
            self.grid.max_tiles(),
            self.turns_left,
            self.max_turns
        );
        for car in &self.cars {
            println!(
                "  Car {} (group {}): at ({}, {}) -> ({}, {}), {} steps left{}",
                car.id.0,
                car.group.0,
                car.position.x,
                car.position.y,
                car.destination.x,
                car.destination.y,
                car.path.len(),
                if car.reached { ", reached" } else { "" }
            );
        }
    }

    /// Draw the grid in the terminal
    pub fn draw_map(&self) {
        println!("Legend: .=empty, #=road, X=obstacle, A..=destination, 1..=car");
        for y in 0..self.grid.height() as i32 {
            let mut line = String::with_capacity(self.grid.width() as usize);
            for x in 0..self.grid.width() as i32 {
                let coord = GridCoord::new(x, y);
                let car_here = self
                    .cars
                    .iter()
                    .find(|car| !car.reached && car.position == coord);
                let ch = if let Some(car) = car_here {
                    char::from_digit(((car.id.0 + 1) % 10) as u32, 10).unwrap_or('?')
                } else {
                    match self.grid.kind(coord) {
                        Some(CellKind::Empty) => '.',
                        Some(CellKind::Road) => '#',
                        Some(CellKind::Obstacle) => 'X',
                        Some(CellKind::Destination { group }) => (b'A' + group.0) as char,
                        None => ' ',
                    }
                };
                line.push(ch);
            }
            println!("{}", line);
        }
    }
}
