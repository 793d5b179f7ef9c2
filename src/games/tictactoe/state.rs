//! Pure tic-tac-toe rules: grid, turn order, win/draw detection and restart.
//!
//! Nothing in here knows about terminals, timers or sound. The presentation
//! layer drives [`GameState`] through [`GameState::place`] and
//! [`GameState::restart`] and reads everything else through accessors.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlaceError, SnapshotError};

/// Board edge length.
pub const SIZE: usize = 3;

/// Occupancy of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    None,
    X,
    O,
}

impl Mark {
    pub fn is_empty(self) -> bool {
        self == Mark::None
    }

    /// The player owning this mark, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Mark::None => None,
            Mark::X => Some(Player::X),
            Mark::O => Some(Player::O),
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::None => f.write_str(" "),
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

/// One of the two sides. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn mark(self) -> Mark {
        match self {
            Player::X => Mark::X,
            Player::O => Mark::O,
        }
    }
}

impl From<Player> for Mark {
    fn from(player: Player) -> Self {
        player.mark()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.mark(), f)
    }
}

/// Row-major 3x3 grid.
pub type Grid = [[Mark; SIZE]; SIZE];

/// The eight lines that end a game, declared in evaluation priority order.
///
/// `Row` and `Column` take an index in `0..SIZE`. [`evaluate`] only ever
/// yields the values listed in [`WinningLine::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinningLine {
    Row(usize),
    Column(usize),
    MainDiagonal,
    AntiDiagonal,
}

impl WinningLine {
    /// All lines: rows top to bottom, columns left to right, then the main
    /// diagonal and the anti-diagonal.
    pub const ALL: [WinningLine; 8] = [
        WinningLine::Row(0),
        WinningLine::Row(1),
        WinningLine::Row(2),
        WinningLine::Column(0),
        WinningLine::Column(1),
        WinningLine::Column(2),
        WinningLine::MainDiagonal,
        WinningLine::AntiDiagonal,
    ];

    /// Position of this line in [`WinningLine::ALL`], or `None` for a row
    /// or column index off the board.
    pub fn index(self) -> Option<usize> {
        Self::ALL.iter().position(|&line| line == self)
    }

    /// The three `(row, col)` cells of the line, from start to end.
    pub fn cells(self) -> [(usize, usize); SIZE] {
        match self {
            WinningLine::Row(r) => [(r, 0), (r, 1), (r, 2)],
            WinningLine::Column(c) => [(0, c), (1, c), (2, c)],
            WinningLine::MainDiagonal => [(0, 0), (1, 1), (2, 2)],
            WinningLine::AntiDiagonal => [(0, 2), (1, 1), (2, 0)],
        }
    }

    pub fn start(self) -> (usize, usize) {
        self.cells()[0]
    }

    pub fn end(self) -> (usize, usize) {
        self.cells()[SIZE - 1]
    }

    pub fn contains(self, row: usize, col: usize) -> bool {
        self.cells().contains(&(row, col))
    }
}

/// Terminal or non-terminal status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won { player: Player, line: WinningLine },
    Draw,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub player: Player,
    pub outcome: Outcome,
}

/// Scores a grid from scratch. The first completed line in
/// [`WinningLine::ALL`] order decides the winner; a full grid with no line
/// is a draw.
pub fn evaluate(grid: &Grid) -> Outcome {
    for line in WinningLine::ALL {
        let [a, b, c] = line.cells();
        let first = grid[a.0][a.1];
        if let Some(player) = first.player() {
            if grid[b.0][b.1] == first && grid[c.0][c.1] == first {
                return Outcome::Won { player, line };
            }
        }
    }

    if grid.iter().flatten().all(|m| !m.is_empty()) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// A single game session.
///
/// Deserializing goes through [`GameState::from_parts`], so a snapshot that
/// no sequence of moves could produce is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    grid: Grid,
    turn: Player,
    outcome: Outcome,
    moves: usize,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            grid: [[Mark::None; SIZE]; SIZE],
            turn: Player::X,
            outcome: Outcome::InProgress,
            moves: 0,
        }
    }

    /// Puts the current player's mark at `(row, col)`.
    ///
    /// The turn only passes to the other player while the game is still in
    /// progress, so after a win [`GameState::turn`] still names the winner.
    pub fn place(&mut self, row: usize, col: usize) -> Result<Placement, PlaceError> {
        if self.outcome.is_over() {
            return Err(PlaceError::GameOver);
        }
        if row >= SIZE || col >= SIZE {
            return Err(PlaceError::OutOfRange { row, col });
        }
        if !self.grid[row][col].is_empty() {
            return Err(PlaceError::CellOccupied { row, col });
        }

        let player = self.turn;
        self.grid[row][col] = player.mark();
        self.moves += 1;
        self.outcome = evaluate(&self.grid);
        if !self.outcome.is_over() {
            self.turn = player.opponent();
        }

        Ok(Placement {
            row,
            col,
            player,
            outcome: self.outcome,
        })
    }

    /// Back to an empty board with X to move. Always succeeds.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// Recomputes the outcome from the grid without touching the cache.
    pub fn evaluate(&self) -> Outcome {
        evaluate(&self.grid)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        self.grid.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Outcome::Won { player, .. } => Some(player),
            _ => None,
        }
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        match self.outcome {
            Outcome::Won { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Number of accepted placements since the last restart.
    pub fn move_count(&self) -> usize {
        self.moves
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire form of [`GameState`] before validation.
#[derive(Deserialize)]
struct RawGameState {
    grid: Grid,
    turn: Player,
    outcome: Outcome,
    moves: usize,
}

impl TryFrom<RawGameState> for GameState {
    type Error = SnapshotError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        let state = Self::from_parts(raw.grid, raw.turn, raw.moves)?;
        if state.outcome != raw.outcome {
            return Err(SnapshotError::OutcomeMismatch);
        }
        Ok(state)
    }
}

impl GameState {
    /// Rebuilds a state from a grid, the player to move and the move count.
    /// The outcome is recomputed from the grid.
    pub fn from_parts(grid: Grid, turn: Player, moves: usize) -> Result<Self, SnapshotError> {
        let count = |mark: Mark| grid.iter().flatten().filter(|&&m| m == mark).count();
        let (xs, os) = (count(Mark::X), count(Mark::O));
        if xs != os && xs != os + 1 {
            return Err(SnapshotError::MarkCounts { x: xs, o: os });
        }
        if moves != xs + os {
            return Err(SnapshotError::MoveCount {
                moves,
                marks: xs + os,
            });
        }

        let outcome = evaluate(&grid);
        let last = if xs > os { Player::X } else { Player::O };
        if let Outcome::Won { player, .. } = outcome {
            if player != last {
                return Err(SnapshotError::PlayedAfterWin);
            }
        }
        // The turn only passes on while the game is running.
        let expected = match outcome {
            Outcome::InProgress => last.opponent(),
            _ => last,
        };
        if turn != expected {
            return Err(SnapshotError::WrongTurn { expected });
        }

        Ok(Self {
            grid,
            turn,
            outcome,
            moves,
        })
    }
}
