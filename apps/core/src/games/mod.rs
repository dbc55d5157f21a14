//! Kids' corner games: memory match and tic-tac-toe.

pub mod memory;
pub mod tictactoe;

pub use memory::{FlipOutcome, MemoryMatch, MemoryMatchSession, MemoryTile, PendingRevert, DEFAULT_SYMBOLS};
pub use tictactoe::{GameStatus, Mark, PlayOutcome, TicTacToe};
