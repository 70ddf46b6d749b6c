//! CLI infrastructure for the self-play engine.
//!
//! This module provides the command-line interface for running self-play
//! simulations and inspecting learned record snapshots.

pub mod commands;

use clap::ValueEnum;

/// The bundled game adapters selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameKind {
    /// Tic-tac-toe on a 3x3 board, two players.
    Tictactoe,
    /// English draughts on an 8x8 board, two players, forced captures.
    Checkers,
}
