use std::fmt;

use rand::{seq::SliceRandom, thread_rng};
use thiserror::Error;

pub const SIDE: usize = 3;
pub const CELLS: usize = SIDE * SIDE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Expansion order; also the tie-break order of equal-score frontier entries.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("tile value {value} is outside 0-8")]
    TileOutOfRange { value: u8 },
    #[error("tile value {value} appears more than once")]
    DuplicateTile { value: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [u8; CELLS], // The empty space is represented by 0
    blank: usize,
}

impl Board {
    pub fn new(cells: [u8; CELLS]) -> Result<Self, BoardError> {
        let mut seen = [false; CELLS];
        let mut blank = 0;

        for (index, &value) in cells.iter().enumerate() {
            if value as usize >= CELLS {
                return Err(BoardError::TileOutOfRange { value });
            }
            if seen[value as usize] {
                return Err(BoardError::DuplicateTile { value });
            }
            seen[value as usize] = true;
            if value == 0 {
                blank = index;
            }
        }

        Ok(Self { cells, blank })
    }

    pub fn solved_goal() -> Self {
        Self {
            cells: [1, 2, 3, 4, 5, 6, 7, 8, 0],
            blank: CELLS - 1,
        }
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    pub fn blank(&self) -> usize {
        self.blank
    }

    /// Slides the tile adjacent to the blank in the given direction into the
    /// blank, i.e. the blank itself moves in that direction. Returns false
    /// when the blank would leave the grid.
    pub fn apply_move(&mut self, movement: Move) -> bool {
        let (drow, dcol) = movement.as_offset();

        let new_row = (self.blank / SIDE) as isize + drow;
        let new_col = (self.blank % SIDE) as isize + dcol;

        if new_row >= 0 && new_row < SIDE as isize && new_col >= 0 && new_col < SIDE as isize {
            let target = new_row as usize * SIDE + new_col as usize;
            self.cells.swap(self.blank, target);
            self.blank = target;
            true
        } else {
            false
        }
    }

    pub fn try_move(&self, movement: Move) -> Option<Self> {
        let mut next = *self;
        if next.apply_move(movement) {
            Some(next)
        } else {
            None
        }
    }

    pub fn successors(&self) -> Vec<(Move, Board)> {
        Move::ALL
            .iter()
            .filter_map(|&movement| self.try_move(movement).map(|board| (movement, board)))
            .collect()
    }

    pub fn reachable(&self, goal: &Board) -> bool {
        // Width 3 is odd: reachability is decided by inversion parity alone.
        Self::count_inversions(&self.cells) % 2 == Self::count_inversions(&goal.cells) % 2
    }

    fn count_inversions(cells: &[u8; CELLS]) -> usize {
        cells
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0)
            .map(|(i, &value)| {
                cells[i + 1..]
                    .iter()
                    .filter(|&&next| next != 0 && next < value)
                    .count()
            })
            .sum()
    }

    pub fn shuffled() -> Self {
        let mut rng = thread_rng();
        let solved = Self::solved_goal();
        let mut board = solved;

        loop {
            board.cells.shuffle(&mut rng);
            if let Some(blank) = board.cells.iter().position(|&value| value == 0) {
                board.blank = blank;
                if board.reachable(&solved) {
                    return board;
                }
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SIDE) {
            for &value in row {
                write!(f, "{:2} ", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
