//! Bundled game adapters.
//!
//! Each game implements [`crate::ports::GameRules`]; the engine itself is
//! game-agnostic and knows nothing about the types in here.

pub mod checkers;
pub mod tictactoe;

pub use checkers::Checkers;
pub use tictactoe::TicTacToe;
