//! Road Paver
//!
//! A tile-placement road puzzle: pave roads on a grid within a tile budget,
//! then watch cars drive simultaneously along shortest paths to their
//! color-matched destinations before the turn budget runs out. This crate
//! contains the simulation core only; front ends drive it through the
//! `simulation` module and render its read-only snapshots.

pub mod simulation;
