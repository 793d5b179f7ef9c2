//! Error types.

use derive_more::{Display, Error};

/// Reasons a mark placement is rejected. The game state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlaceError {
    /// The game already ended in a win or a draw.
    #[display("game is already over")]
    GameOver,

    /// Row or column is outside the 3x3 grid.
    #[display("cell ({row}, {col}) is off the board")]
    OutOfRange { row: usize, col: usize },

    /// The target cell already holds a mark.
    #[display("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },
}

/// A saved [`crate::GameState`] that no sequence of legal moves produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SnapshotError {
    #[display("{x} X marks and {o} O marks cannot alternate")]
    MarkCounts { x: usize, o: usize },

    #[display("move count {moves} does not match {marks} marks on the grid")]
    MoveCount { moves: usize, marks: usize },

    #[display("a mark was placed after the game was won")]
    PlayedAfterWin,

    #[display("{expected} should be to move")]
    WrongTurn { expected: crate::games::tictactoe::Player },

    #[display("stored outcome disagrees with the grid")]
    OutcomeMismatch,
}

/// Failure to load a configuration file.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[display("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}
