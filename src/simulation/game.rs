//! Level progression and command dispatch
//!
//! `Game` sits on top of a single live `Episode` and owns everything that
//! outlives it: the level list, which levels are unlocked, and which one is
//! being played. The presentation layer talks to it either through the named
//! methods or by dispatching `Command` values and rendering the returned
//! `Event`s - buttons send data, not callbacks.

use log::info;

use super::car::RoutePlan;
use super::episode::Episode;
use super::error::SimError;
use super::grid::ToggleOutcome;
use super::level::{builtin_levels, LevelDefinition};
use super::types::{GridCoord, Outcome, Phase};

/// An input the presentation layer can send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleTile(GridCoord),
    StartSimulation,
    Tick,
    Reset,
    AdvanceLevel,
    SelectLevel(usize),
}

/// What a dispatched command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TileToggled(ToggleOutcome),
    RoutesPlanned(Vec<RoutePlan>),
    Ticked { phase: Phase, outcome: Outcome },
    LevelLoaded { index: usize },
}

/// The full game: a level list plus the episode being played
pub struct Game {
    levels: Vec<LevelDefinition>,
    /// Parallel to `levels`; a locked level cannot be selected
    unlocked: Vec<bool>,
    current: usize,
    episode: Episode,
}

impl Game {
    /// Creates a game over the given level list, starting on the first.
    ///
    /// Only the first level starts unlocked; finishing a level with
    /// `Success` unlocks the next one.
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self, SimError> {
        if levels.is_empty() {
            return Err(SimError::UnknownLevel { index: 0, count: 0 });
        }
        let episode = Episode::load(&levels[0])?;
        let mut unlocked = vec![false; levels.len()];
        unlocked[0] = true;
        Ok(Self {
            levels,
            unlocked,
            current: 0,
            episode,
        })
    }

    /// Creates a game over the built-in campaign
    pub fn with_campaign() -> Result<Self, SimError> {
        Self::new(builtin_levels())
    }

    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    pub fn current_level(&self) -> usize {
        self.current
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }

    pub fn is_unlocked(&self, index: usize) -> bool {
        self.unlocked.get(index).copied().unwrap_or(false)
    }

    /// See [`Episode::toggle_tile`]
    pub fn toggle_tile(&mut self, coord: GridCoord) -> Result<ToggleOutcome, SimError> {
        self.episode.toggle_tile(coord)
    }

    /// See [`Episode::start_simulation`]
    pub fn start_simulation(&mut self) -> Result<Vec<RoutePlan>, SimError> {
        self.episode.start_simulation()
    }

    /// Advances the episode one tick and records a success for progression.
    ///
    /// On the tick that resolves the episode as a success, the next level
    /// (if any) is unlocked.
    pub fn tick(&mut self) -> (Phase, Outcome) {
        let (phase, outcome) = self.episode.tick();
        if outcome == Outcome::Success {
            if let Some(next) = self.unlocked.get_mut(self.current + 1) {
                if !*next {
                    *next = true;
                    info!("level {} unlocked", self.current + 1);
                }
            }
        }
        (phase, outcome)
    }

    /// Reloads the current level into a fresh editing-phase episode.
    ///
    /// Valid from any phase; all simulation state is discarded wholesale.
    pub fn reset(&mut self) -> Result<(), SimError> {
        self.episode = Episode::load(&self.levels[self.current])?;
        Ok(())
    }

    /// Switches to an unlocked level and loads it fresh
    pub fn select_level(&mut self, index: usize) -> Result<(), SimError> {
        if index >= self.levels.len() {
            return Err(SimError::UnknownLevel {
                index,
                count: self.levels.len(),
            });
        }
        if !self.unlocked[index] {
            return Err(SimError::LevelLocked { index });
        }
        self.episode = Episode::load(&self.levels[index])?;
        self.current = index;
        Ok(())
    }

    /// Moves on to the next level.
    ///
    /// Only valid when the current episode is resolved as a success and a
    /// next level exists.
    pub fn advance_level(&mut self) -> Result<(), SimError> {
        let resolved_success =
            self.episode.phase() == Phase::Resolved && self.episode.outcome() == Outcome::Success;
        if !resolved_success {
            return Err(SimError::AdvanceWithoutSuccess);
        }
        if self.current + 1 >= self.levels.len() {
            return Err(SimError::NoNextLevel);
        }
        self.current += 1;
        self.episode = Episode::load(&self.levels[self.current])?;
        Ok(())
    }

    /// Routes a presentation-layer command to the matching method
    pub fn dispatch(&mut self, command: Command) -> Result<Event, SimError> {
        match command {
            Command::ToggleTile(coord) => self.toggle_tile(coord).map(Event::TileToggled),
            Command::StartSimulation => self.start_simulation().map(Event::RoutesPlanned),
            Command::Tick => {
                let (phase, outcome) = self.tick();
                Ok(Event::Ticked { phase, outcome })
            }
            Command::Reset => {
                self.reset()?;
                Ok(Event::LevelLoaded {
                    index: self.current,
                })
            }
            Command::AdvanceLevel => {
                self.advance_level()?;
                Ok(Event::LevelLoaded {
                    index: self.current,
                })
            }
            Command::SelectLevel(index) => {
                self.select_level(index)?;
                Ok(Event::LevelLoaded {
                    index: self.current,
                })
            }
        }
    }
}
