//! A board with a replayable move record.
//!
//! The board owns a [`Grid`] and the list of moves played on it, plus an
//! index into that list. The grid always holds exactly the moves before the
//! index; moves at or after the index are kept so they can be redone, until
//! a new move is committed.

use std::fmt;

use tracing::debug;

use crate::constants::{CHAR_BLACK, CHAR_EMPTY, CHAR_OUT, CHAR_WHITE};
use crate::grid::Grid;
use crate::point::{Point, zigzag_encode};
use crate::stone::Stone;

/// A recorded move.
pub type Move = (Point, Stone);

/// Playable area of a board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Bounds {
    #[default]
    Infinite,
    /// A `width x height` rectangle centred on the origin.
    ///
    /// Columns are taken in zigzag order (`0, -1, 1, -2, ...`), so odd sizes
    /// are symmetric and even sizes have one extra negative column or row.
    Rect(u32, u32),
}

impl Bounds {
    pub fn contains(self, p: Point) -> bool {
        match self {
            Bounds::Infinite => true,
            Bounds::Rect(w, h) => zigzag_encode(p.x) < w && zigzag_encode(p.y) < h,
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bounds::Infinite => write!(f, "Infinite"),
            Bounds::Rect(w, h) => write!(f, "Rect({w}*{h})"),
        }
    }
}

/// Reason a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("point is occupied")]
    Occupied,
    #[error("point is out of bounds")]
    OutOfBounds,
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    grid: Grid,
    bounds: Bounds,
    record: Vec<Move>,
    index: usize,
}

impl Board {
    pub const fn new(bounds: Bounds) -> Board {
        Board {
            grid: Grid::new(),
            bounds,
            record: Vec::new(),
            index: 0,
        }
    }

    pub const fn new_infinite() -> Board {
        Board::new(Bounds::Infinite)
    }

    pub const fn new_square(size: u32) -> Board {
        Board::new(Bounds::Rect(size, size))
    }

    /// Builds a board by committing `moves` in order.
    pub fn from_moves<I>(bounds: Bounds, moves: I) -> Result<Board, CommitError>
    where
        I: IntoIterator<Item = Move>,
    {
        let mut board = Board::new(bounds);
        for (point, stone) in moves {
            board.commit(point, stone)?;
        }
        Ok(board)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of recorded moves, including undone ones.
    pub fn total_count(&self) -> usize {
        self.record.len()
    }

    /// Number of moves currently on the board.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.index == 0
    }

    pub fn get(&self, point: Point) -> Option<Stone> {
        self.grid.get(point)
    }

    /// Moves currently on the board, oldest first.
    pub fn past_record(&self) -> &[Move] {
        &self.record[..self.index]
    }

    /// Places a stone as the next move.
    ///
    /// Any undone moves are discarded. On error nothing changes.
    pub fn commit(&mut self, point: Point, stone: Stone) -> Result<(), CommitError> {
        if !self.bounds.contains(point) {
            return Err(CommitError::OutOfBounds);
        }
        if !self.grid.set(point, stone) {
            return Err(CommitError::Occupied);
        }
        self.record.truncate(self.index);
        self.record.push((point, stone));
        self.index += 1;
        debug!(%point, %stone, index = self.index, "commit");
        Ok(())
    }

    /// Takes back the last move on the board.
    pub fn undo(&mut self) -> Option<Move> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        let last = self.record[self.index];
        self.grid.unset(last.0);
        debug!(point = %last.0, stone = %last.1, index = self.index, "undo");
        Some(last)
    }

    /// Replays the next undone move.
    pub fn redo(&mut self) -> Option<Move> {
        let next = *self.record.get(self.index)?;
        let placed = self.grid.set(next.0, next.1);
        debug_assert!(placed, "redo onto occupied point {}", next.0);
        self.index += 1;
        debug!(point = %next.0, stone = %next.1, index = self.index, "redo");
        Some(next)
    }

    /// Moves to `index` in the record, replaying or taking back the moves in
    /// between. Returns `false` and does nothing if `index` is past the end.
    pub fn jump(&mut self, index: usize) -> bool {
        if index > self.record.len() {
            return false;
        }
        if self.index < index {
            for &(point, stone) in &self.record[self.index..index] {
                let placed = self.grid.set(point, stone);
                debug_assert!(placed, "replay onto occupied point {point}");
            }
        } else {
            for &(point, _) in self.record[index..self.index].iter().rev() {
                self.grid.unset(point);
            }
        }
        debug!(from = self.index, to = index, "jump");
        self.index = index;
        true
    }

    /// Infers whose turn it is from the moves on the board.
    ///
    /// Black opens with a single stone; afterwards each side places two. The
    /// flag is `true` when the next stone is the last one of the mover's
    /// turn, i.e. the turn passes to the opponent right after it.
    pub fn infer_turn(&self) -> (Stone, bool) {
        if self.index == 0 {
            return (Stone::Black, true);
        }

        let last = self.record[self.index - 1].1;
        if self.index == 1 {
            return (Stone::White, last == Stone::White);
        }

        let prev = self.record[self.index - 2].1;
        if last == prev {
            (last.opposite(), false)
        } else {
            (last, true)
        }
    }

    /// Returns a printable window of `(2 * radius + 1)` points per side
    /// centred on `center`.
    pub fn view(&self, center: Point, radius: u32) -> View<'_> {
        View {
            board: self,
            center,
            radius,
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.bounds == other.bounds && self.past_record() == other.past_record()
    }
}

impl Eq for Board {}

/// A square window onto a board, rendered row by row from the top.
pub struct View<'a> {
    board: &'a Board,
    center: Point,
    radius: u32,
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = i64::from(self.radius);
        for dy in -r..=r {
            let Some(y) = to_coord(i64::from(self.center.y) + dy) else {
                continue;
            };
            for dx in -r..=r {
                let Some(x) = to_coord(i64::from(self.center.x) + dx) else {
                    continue;
                };
                let p = Point::new(x, y);
                let ch = if !self.board.bounds.contains(p) {
                    CHAR_OUT
                } else {
                    match self.board.get(p) {
                        Some(Stone::Black) => CHAR_BLACK,
                        Some(Stone::White) => CHAR_WHITE,
                        None => CHAR_EMPTY,
                    }
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn to_coord(v: i64) -> Option<i32> {
    i32::try_from(v).ok()
}
