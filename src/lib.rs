//! Tabular self-play learning engine for deterministic, perfect-information,
//! turn-based games.
//!
//! The engine learns a per-player move policy by playing games against
//! itself: every state a player chooses is tallied in a record store, the
//! episode outcome is propagated back along each player's path, and later
//! episodes sample moves in proportion to a pluggable weighting of those
//! tallies.
//!
//! The crate is organised around a few small seams:
//! - [`ports::GameRules`] - what a game must provide (candidate states,
//!   hashing, terminal detection)
//! - [`ports::RecordStore`] - where tallies live
//! - [`weights::WeightingStrategy`] - how tallies become sampling weights
//! - [`driver::run_episode`] / [`simulation::run_simulation`] - the self-play
//!   loop itself
//!
//! Bundled [`games`] adapters (tic-tac-toe, checkers) and snapshot
//! repositories ([`adapters`]) make the engine usable end to end from the
//! `tally` binary.

pub mod adapters;
pub mod cli;
pub mod driver;
pub mod error;
pub mod games;
pub mod ports;
pub mod record;
pub mod selector;
pub mod simulation;
pub mod weights;

pub use error::{Error, Result};
pub use record::{MoveOutcome, StateRecord};
