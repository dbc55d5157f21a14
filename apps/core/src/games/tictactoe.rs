//! Tic-tac-toe for two players sharing a screen.
//! X always opens, including after a reset.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

pub type Board = [Option<Mark>; 9];

/// Rows, then columns, then diagonals
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// First completed line in scan order, with its mark
pub fn winning_line(board: &Board) -> Option<([usize; 3], Mark)> {
    LINES.iter().find_map(|&[a, b, c]| match board[a] {
        Some(mark) if board[b] == Some(mark) && board[c] == Some(mark) => Some(([a, b, c], mark)),
        _ => None,
    })
}

pub fn winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(_, mark)| mark)
}

/// No winner and no empty cell
pub fn is_draw(board: &Board) -> bool {
    winner(board).is_none() && board.iter().all(Option::is_some)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress { next: Mark },
    Won(Mark),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Occupied cell, out-of-range index, or the game is already over
    Ignored,
    Placed(Mark),
    Won(Mark),
    Draw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToe {
    board: Board,
    next: Mark,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            next: Mark::X,
        }
    }

    /// Place the next mark at `cell` (0..9, row-major).
    pub fn play(&mut self, cell: usize) -> PlayOutcome {
        if cell >= self.board.len() || self.board[cell].is_some() || self.winner().is_some() {
            debug!("Ignoring tic-tac-toe move at cell {}", cell);
            return PlayOutcome::Ignored;
        }

        let mark = self.next;
        self.board[cell] = Some(mark);
        self.next = mark.other();

        match self.status() {
            GameStatus::Won(winner) => PlayOutcome::Won(winner),
            GameStatus::Draw => PlayOutcome::Draw,
            GameStatus::InProgress { .. } => PlayOutcome::Placed(mark),
        }
    }

    pub fn winner(&self) -> Option<Mark> {
        winner(&self.board)
    }

    pub fn winning_line(&self) -> Option<[usize; 3]> {
        winning_line(&self.board).map(|(line, _)| line)
    }

    pub fn is_draw(&self) -> bool {
        is_draw(&self.board)
    }

    pub fn status(&self) -> GameStatus {
        if let Some(mark) = self.winner() {
            GameStatus::Won(mark)
        } else if self.is_draw() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress { next: self.next }
        }
    }

    pub fn is_over(&self) -> bool {
        !matches!(self.status(), GameStatus::InProgress { .. })
    }

    pub fn next_mark(&self) -> Mark {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Empty board, X to move.
    pub fn reset(&mut self) {
        self.board = [None; 9];
        self.next = Mark::X;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Mark> = Some(Mark::X);
    const O: Option<Mark> = Some(Mark::O);
    const E: Option<Mark> = None;

    #[test]
    fn test_top_row_wins() {
        let board = [X, X, X, O, O, E, E, E, E];
        assert_eq!(winner(&board), Some(Mark::X));
        assert_eq!(winning_line(&board), Some(([0, 1, 2], Mark::X)));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board = [X, O, X, O, X, O, O, X, O];
        assert_eq!(winner(&board), None);
        assert!(is_draw(&board));
    }

    #[test]
    fn test_every_line_detected() {
        for line in LINES {
            let mut board: Board = [None; 9];
            for cell in line {
                board[cell] = O;
            }
            assert_eq!(winner(&board), Some(Mark::O), "line {:?}", line);
            assert!(!is_draw(&board));
        }
    }

    #[test]
    fn test_turns_alternate_from_x() {
        let mut game = TicTacToe::new();
        assert_eq!(game.play(4), PlayOutcome::Placed(Mark::X));
        assert_eq!(game.next_mark(), Mark::O);
        assert_eq!(game.play(0), PlayOutcome::Placed(Mark::O));
        assert_eq!(game.next_mark(), Mark::X);
    }

    #[test]
    fn test_occupied_and_out_of_range_ignored() {
        let mut game = TicTacToe::new();
        game.play(0);
        assert_eq!(game.play(0), PlayOutcome::Ignored);
        assert_eq!(game.play(9), PlayOutcome::Ignored);
        assert_eq!(game.next_mark(), Mark::O);
    }

    #[test]
    fn test_no_moves_after_win() {
        let mut game = TicTacToe::new();
        for cell in [0, 3, 1, 4] {
            game.play(cell);
        }
        assert_eq!(game.play(2), PlayOutcome::Won(Mark::X));
        assert_eq!(game.winning_line(), Some([0, 1, 2]));
        assert_eq!(game.play(5), PlayOutcome::Ignored);
        assert_eq!(game.status(), GameStatus::Won(Mark::X));
    }

    #[test]
    fn test_last_cell_decides() {
        // Filling the ninth cell can still win (diagonal 0-4-8)
        let mut game = TicTacToe::new();
        let moves = [0, 1, 2, 3, 4, 5, 7, 6, 8];
        let mut last = PlayOutcome::Ignored;
        for cell in moves {
            last = game.play(cell);
        }
        assert_eq!(game.board(), &[X, O, X, O, X, O, O, X, X]);
        assert_eq!(last, PlayOutcome::Won(Mark::X));

        let mut game = TicTacToe::new();
        for cell in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            last = game.play(cell);
        }
        assert_eq!(last, PlayOutcome::Draw);
        assert!(game.is_draw());
        assert!(game.is_over());
    }

    #[test]
    fn test_reset_gives_x_first_move() {
        let mut game = TicTacToe::new();
        game.play(0);
        game.reset();
        assert_eq!(game.next_mark(), Mark::X);
        assert!(game.board().iter().all(Option::is_none));
        assert_eq!(game.play(8), PlayOutcome::Placed(Mark::X));
    }
}
