pub mod effects;
pub mod game;
pub mod layout;
pub mod state;

pub use game::{Screen, TicTacToe};
pub use state::{evaluate, GameState, Grid, Mark, Outcome, Placement, Player, WinningLine, SIZE};
