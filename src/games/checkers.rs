//! Checkers (draughts) rules adapter: 8×8 board, players 0 (Red, moving down
//! the row indices) and 1 (Black, moving up).
//!
//! Captures are forced: whenever any jump is available, simple moves are not
//! offered. Multi-jumps are explored exhaustively and every intermediate
//! landing state is offered as a candidate, so the learner may stop a jump
//! sequence early. A man reaching the crown row is promoted to a king, which
//! ends that jump sequence. A player who cannot move loses.

use std::collections::HashSet;

use crate::ports::GameRules;

const BOARD_SIZE: usize = 8;

/// Which side a piece belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    /// Engine player index for this side.
    pub fn player(self) -> usize {
        match self {
            Side::Red => 0,
            Side::Black => 1,
        }
    }

    pub fn from_player(player: usize) -> Side {
        if player == 0 { Side::Red } else { Side::Black }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Row direction this side's men move in.
    fn forward(self) -> i8 {
        match self {
            Side::Red => 1,
            Side::Black => -1,
        }
    }

    /// Row on which this side's men are crowned.
    fn crown_row(self) -> usize {
        match self {
            Side::Red => BOARD_SIZE - 1,
            Side::Black => 0,
        }
    }
}

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    Empty,
    Man(Side),
    King(Side),
}

impl Square {
    fn side(self) -> Option<Side> {
        match self {
            Square::Empty => None,
            Square::Man(side) | Square::King(side) => Some(side),
        }
    }

    /// Diagonal directions this piece may move or jump in.
    fn directions(self) -> &'static [(i8, i8)] {
        const RED_MAN: [(i8, i8); 2] = [(1, 1), (1, -1)];
        const BLACK_MAN: [(i8, i8); 2] = [(-1, 1), (-1, -1)];
        const KING: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

        match self {
            Square::Empty => &[],
            Square::Man(Side::Red) => &RED_MAN,
            Square::Man(Side::Black) => &BLACK_MAN,
            Square::King(_) => &KING,
        }
    }

    /// Two-bit piece code used by the board hash.
    fn code(self) -> u8 {
        match self {
            Square::Empty => unreachable!("empty squares are not encoded"),
            Square::Man(Side::Red) => 0b00,
            Square::King(Side::Red) => 0b01,
            Square::Man(Side::Black) => 0b10,
            Square::King(Side::Black) => 0b11,
        }
    }
}

/// An 8×8 checkers board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckersBoard {
    squares: [[Square; BOARD_SIZE]; BOARD_SIZE],
}

impl CheckersBoard {
    /// Empty board, for building positions in tests.
    pub fn empty() -> Self {
        CheckersBoard {
            squares: [[Square::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Standard opening position: twelve men per side on the dark squares,
    /// Red on rows 0–2, Black on rows 5–7.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for row in 0..3 {
            for col in 0..BOARD_SIZE {
                if (row + col) % 2 == 1 {
                    board.squares[row][col] = Square::Man(Side::Red);
                }
            }
        }
        for row in 5..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if (row + col) % 2 == 1 {
                    board.squares[row][col] = Square::Man(Side::Black);
                }
            }
        }
        board
    }

    pub fn square(&self, row: usize, col: usize) -> Square {
        self.squares[row][col]
    }

    pub fn set_square(&mut self, row: usize, col: usize, square: Square) {
        self.squares[row][col] = square;
    }

    fn in_bounds(row: i8, col: i8) -> bool {
        (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col)
    }

    /// Coordinates of every piece belonging to `side`.
    fn pieces_of(&self, side: Side) -> Vec<(usize, usize)> {
        let mut pieces = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.squares[row][col].side() == Some(side) {
                    pieces.push((row, col));
                }
            }
        }
        pieces
    }

    /// Move the piece at `from` to the empty square `to`, crowning a man
    /// that lands on its crown row. Returns the piece as it sits on `to`.
    fn move_piece(&mut self, from: (usize, usize), to: (usize, usize)) -> Square {
        let piece = self.squares[from.0][from.1];
        let landed = match piece {
            Square::Man(side) if to.0 == side.crown_row() => Square::King(side),
            other => other,
        };
        self.squares[from.0][from.1] = Square::Empty;
        self.squares[to.0][to.1] = landed;
        landed
    }

    /// Simple (non-capturing) successor boards for `side`.
    fn simple_moves(&self, side: Side) -> Vec<CheckersBoard> {
        let mut states = Vec::new();
        for (row, col) in self.pieces_of(side) {
            let piece = self.squares[row][col];
            for &(dr, dc) in piece.directions() {
                let (to_row, to_col) = (row as i8 + dr, col as i8 + dc);
                if !Self::in_bounds(to_row, to_col) {
                    continue;
                }
                let to = (to_row as usize, to_col as usize);
                if self.squares[to.0][to.1] != Square::Empty {
                    continue;
                }
                let mut next = *self;
                next.move_piece((row, col), to);
                states.push(next);
            }
        }
        states
    }

    /// Capturing successor boards for `side`, including every intermediate
    /// state of a multi-jump sequence.
    fn capture_moves(&self, side: Side) -> Vec<CheckersBoard> {
        let mut states = Vec::new();
        let mut stack: Vec<(CheckersBoard, (usize, usize))> = self
            .pieces_of(side)
            .into_iter()
            .map(|piece| (*self, piece))
            .collect();
        let mut visited: HashSet<(CheckersBoard, (usize, usize))> = HashSet::new();

        while let Some((board, from)) = stack.pop() {
            if !visited.insert((board, from)) {
                continue;
            }

            let piece = board.squares[from.0][from.1];
            for &(dr, dc) in piece.directions() {
                let (mid_row, mid_col) = (from.0 as i8 + dr, from.1 as i8 + dc);
                let (to_row, to_col) = (from.0 as i8 + 2 * dr, from.1 as i8 + 2 * dc);
                if !Self::in_bounds(to_row, to_col) {
                    continue;
                }

                let mid = (mid_row as usize, mid_col as usize);
                let to = (to_row as usize, to_col as usize);
                if board.squares[mid.0][mid.1].side() != Some(side.opponent()) {
                    continue;
                }
                if board.squares[to.0][to.1] != Square::Empty {
                    continue;
                }

                let was_man = matches!(piece, Square::Man(_));
                let mut next = board;
                next.squares[mid.0][mid.1] = Square::Empty;
                let landed = next.move_piece(from, to);

                // Crowning ends the jump sequence; otherwise keep exploring
                // further jumps from the landing square.
                if !(was_man && matches!(landed, Square::King(_))) {
                    stack.push((next, to));
                }
                states.push(next);
            }
        }
        states
    }

    /// Whether `side` has at least one legal move.
    fn can_move(&self, side: Side) -> bool {
        // Simple moves are cheaper to find; check them first.
        for (row, col) in self.pieces_of(side) {
            let piece = self.squares[row][col];
            for &(dr, dc) in piece.directions() {
                let (to_row, to_col) = (row as i8 + dr, col as i8 + dc);
                if Self::in_bounds(to_row, to_col)
                    && self.squares[to_row as usize][to_col as usize] == Square::Empty
                {
                    return true;
                }

                let (jump_row, jump_col) = (row as i8 + 2 * dr, col as i8 + 2 * dc);
                if Self::in_bounds(jump_row, jump_col)
                    && self.squares[to_row as usize][to_col as usize].side()
                        == Some(side.opponent())
                    && self.squares[jump_row as usize][jump_col as usize] == Square::Empty
                {
                    return true;
                }
            }
        }
        false
    }
}

/// The checkers rules adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checkers;

impl Checkers {
    pub fn initial_state() -> CheckersBoard {
        CheckersBoard::standard()
    }
}

impl GameRules for Checkers {
    type State = CheckersBoard;
    type Hash = Vec<u8>;

    /// Byte-string hash: a header byte carrying the acting player and piece
    /// count, then one byte per occupied square in row-major order (two bits
    /// of piece type, six bits of square index).
    fn hash_state(&self, player: usize, state: &Self::State) -> Self::Hash {
        let mut bytes = vec![0u8];
        let mut piece_count = 0u8;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let square = state.squares[row][col];
                if square != Square::Empty {
                    piece_count += 1;
                    bytes.push((square.code() << 6) | (row * BOARD_SIZE + col) as u8);
                }
            }
        }
        bytes[0] = ((player as u8) << 7) | piece_count;
        bytes
    }

    fn available_states(&self, player: usize, state: &Self::State) -> Vec<Self::State> {
        let side = Side::from_player(player);
        // Forced captures: when any jump exists, simple moves are illegal.
        let captures = state.capture_moves(side);
        if !captures.is_empty() {
            return captures;
        }
        state.simple_moves(side)
    }

    fn is_draw_state(&self, _player: usize, _state: &Self::State) -> bool {
        // Checkers has no drawn position of its own here; stalled games are
        // handled by the episode turn cap.
        false
    }

    fn is_win_state(&self, player: usize, state: &Self::State) -> bool {
        // A player wins when the opponent cannot move on their coming turn
        // (covers both piece loss and full blockade).
        let opponent = Side::from_player(player).opponent();
        !state.can_move(opponent)
    }
}
