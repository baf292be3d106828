//! Points on the infinite board and their Morton (Z-order) addresses.
//!
//! A point is mapped to a single `u64` index in two steps:
//!
//! 1. Each coordinate is zigzag-encoded (`0, -1, 1, -2, 2, ...` becomes
//!    `0, 1, 2, 3, 4, ...`) so that small magnitudes of either sign get
//!    small codes.
//! 2. The two 32-bit codes are bit-interleaved: `x` fills the even bit
//!    positions of the index and `y` the odd ones.
//!
//! Both axes are full `i32`s and the index is 64 bits wide, so every point
//! of the `i32 x i32` plane has exactly one index and every `u64` is the
//! index of exactly one point. Nothing overflows and no coordinate needs to
//! be rejected here.
//!
//! The low bits of the index locate a point inside its chunk (see
//! [`Address`]). Since interleaving alternates axis bits, the low
//! `2 * CHUNK_SIZE_BITS` bits of the index cover a square of the zigzag
//! plane, which keeps nearby stones in the same chunk.

use std::fmt;
use std::str::FromStr;

use crate::constants::{SLOT_INDEX_BITS, WORD_INDEX_BITS};

/// A point on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    /// Maps the point to its Morton index.
    pub fn index(self) -> u64 {
        interleave(zigzag_encode(self.x), zigzag_encode(self.y))
    }

    /// Maps a Morton index back to its point (undoes [`Point::index`]).
    pub fn from_index(index: u64) -> Point {
        let (x, y) = deinterleave(index);
        Point::new(zigzag_decode(x), zigzag_decode(y))
    }

    /// Returns the storage address of the point.
    pub fn address(self) -> Address {
        split(self.index())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Error returned when a vertex string is not `x,y` with two `i32` parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid vertex: {0:?}")]
pub struct ParsePointError(String);

impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Point, ParsePointError> {
        let err = || ParsePointError(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse::<i32>().map_err(|_| err())?;
        let y = y.trim().parse::<i32>().map_err(|_| err())?;
        Ok(Point::new(x, y))
    }
}

/// Location of a point inside the sparse grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Address {
    /// Key of the chunk in the grid's chunk map.
    pub chunk: u64,
    /// Word inside the chunk, in `0..WORDS_PER_CHUNK`.
    pub word: usize,
    /// Two-bit slot inside the word, in `0..SLOTS_PER_WORD`.
    pub slot: usize,
}

impl Address {
    /// Reassembles the Morton index (undoes [`split`]).
    pub fn join(self) -> u64 {
        (self.chunk << (WORD_INDEX_BITS + SLOT_INDEX_BITS))
            | ((self.word as u64) << SLOT_INDEX_BITS)
            | self.slot as u64
    }
}

/// Splits a Morton index into chunk, word and slot ids.
pub fn split(mut index: u64) -> Address {
    let slot = take_low_bits(&mut index, SLOT_INDEX_BITS) as usize;
    let word = take_low_bits(&mut index, WORD_INDEX_BITS) as usize;
    Address {
        chunk: index,
        word,
        slot,
    }
}

fn take_low_bits(index: &mut u64, bits: u32) -> u64 {
    let low = *index & ((1 << bits) - 1);
    *index >>= bits;
    low
}

/// Maps an integer to a natural number.
pub fn zigzag_encode(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

/// Maps a natural number to an integer (undoes `zigzag_encode`).
pub fn zigzag_decode(n: u32) -> i32 {
    ((n >> 1) ^ (n & 1).wrapping_neg()) as i32
}

/// Spreads the 32 bits of `v` over the even bit positions of a `u64`.
fn spread_even(v: u32) -> u64 {
    let mut v = v as u64;
    v = (v | (v << 16)) & 0x0000_ffff_0000_ffff;
    v = (v | (v << 8)) & 0x00ff_00ff_00ff_00ff;
    v = (v | (v << 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    v = (v | (v << 2)) & 0x3333_3333_3333_3333;
    v = (v | (v << 1)) & 0x5555_5555_5555_5555;
    v
}

/// Collects the even bits of `v` into a `u32` (undoes `spread_even`).
fn gather_even(v: u64) -> u32 {
    let mut v = v & 0x5555_5555_5555_5555;
    v = (v | (v >> 1)) & 0x3333_3333_3333_3333;
    v = (v | (v >> 2)) & 0x0f0f_0f0f_0f0f_0f0f;
    v = (v | (v >> 4)) & 0x00ff_00ff_00ff_00ff;
    v = (v | (v >> 8)) & 0x0000_ffff_0000_ffff;
    (v | (v >> 16)) as u32
}

/// Interleaves two codes, `x` on even bits and `y` on odd bits.
pub fn interleave(x: u32, y: u32) -> u64 {
    spread_even(x) | (spread_even(y) << 1)
}

/// Splits an index into its two interleaved codes (undoes `interleave`).
pub fn deinterleave(index: u64) -> (u32, u32) {
    (gather_even(index), gather_even(index >> 1))
}
