//! Tic-tac-toe rules adapter: 3×3 board, players 0 (X) and 1 (O).

use std::fmt;
use std::str::FromStr;

use crate::ports::GameRules;

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The mark belonging to an engine player index (0 = X, 1 = O).
    pub fn for_player(player: usize) -> Cell {
        if player == 0 { Cell::X } else { Cell::O }
    }

    /// Ternary digit used by the board hash.
    fn code(self) -> u32 {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }
}

/// The eight winning lines, as cell indices.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A 3×3 board, cells indexed row-major from the top left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    pub cells: [Cell; 9],
}

impl Board {
    /// The empty board.
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// The mark completing a winning line, if any.
    pub fn winning_cell(&self) -> Option<Cell> {
        for line in &LINES {
            let first = self.cells[line[0]];
            if first != Cell::Empty
                && first == self.cells[line[1]]
                && first == self.cells[line[2]]
            {
                return Some(first);
            }
        }
        None
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    /// Compact ternary encoding of the cell contents, without turn ownership.
    fn code(&self) -> u32 {
        self.cells
            .iter()
            .rev()
            .fold(0, |acc, cell| acc * 3 + cell.code())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = crate::Error;

    /// Parse a 9-character board string such as `"X.O.X...."`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }
        Ok(Board { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                write!(f, "{}", self.cells[row * 3 + col].to_char())?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// The tic-tac-toe rules adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl TicTacToe {
    pub fn initial_state() -> Board {
        Board::new()
    }
}

impl GameRules for TicTacToe {
    type State = Board;
    type Hash = u32;

    fn hash_state(&self, player: usize, state: &Self::State) -> Self::Hash {
        // Ternary board code shifted to make room for the acting player, so
        // the same position owned by X and by O keeps separate records.
        state.code() * 2 + player as u32
    }

    fn available_states(&self, player: usize, state: &Self::State) -> Vec<Self::State> {
        let mark = Cell::for_player(player);
        let mut states = Vec::new();
        for (i, &cell) in state.cells.iter().enumerate() {
            if cell == Cell::Empty {
                let mut next = *state;
                next.cells[i] = mark;
                states.push(next);
            }
        }
        states
    }

    fn is_draw_state(&self, _player: usize, state: &Self::State) -> bool {
        state.is_full() && state.winning_cell().is_none()
    }

    fn is_win_state(&self, player: usize, state: &Self::State) -> bool {
        state.winning_cell() == Some(Cell::for_player(player))
    }
}
