pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod games;

// Re-export for convenience
pub use crate::core::game::{Context, Flow, Game};
pub use crate::error::{ConfigError, PlaceError, SnapshotError};
pub use crate::games::tictactoe::{GameState, Outcome, Player, TicTacToe};
