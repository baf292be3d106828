//! Fixed-size bit-packed storage for one square of the board.
//!
//! Each point takes a two-bit slot: `0` empty, `1` black, `2` white. The
//! pattern `3` is never written.

use crate::constants::{BITS_PER_SLOT, SLOTS_PER_WORD, WORDS_PER_CHUNK};
use crate::stone::Stone;

const SLOT_MASK: u64 = (1 << BITS_PER_SLOT) - 1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    words: [u64; WORDS_PER_CHUNK],
}

fn decode_slot(bits: u64) -> Option<Stone> {
    match bits {
        0 => None,
        1 => Some(Stone::Black),
        _ => Some(Stone::White),
    }
}

fn encode_slot(stone: Stone) -> u64 {
    stone as u64 + 1
}

fn shift(slot: usize) -> usize {
    slot * BITS_PER_SLOT as usize
}

impl Chunk {
    pub fn new() -> Chunk {
        Chunk::default()
    }

    pub fn get(&self, word: usize, slot: usize) -> Option<Stone> {
        decode_slot((self.words[word] >> shift(slot)) & SLOT_MASK)
    }

    /// Places a stone. Returns `false` and leaves the chunk untouched if the
    /// slot is occupied.
    #[must_use]
    pub fn set(&mut self, word: usize, slot: usize, stone: Stone) -> bool {
        let bits = self.words[word];
        if (bits >> shift(slot)) & SLOT_MASK != 0 {
            return false;
        }
        self.words[word] = bits | (encode_slot(stone) << shift(slot));
        true
    }

    /// Clears a slot and returns what it held.
    pub fn unset(&mut self, word: usize, slot: usize) -> Option<Stone> {
        let bits = self.words[word];
        self.words[word] = bits & !(SLOT_MASK << shift(slot));
        decode_slot((bits >> shift(slot)) & SLOT_MASK)
    }

    /// Iterates over occupied slots as `(word, slot, stone)`, in index order.
    pub fn stones(&self) -> impl Iterator<Item = (usize, usize, Stone)> + '_ {
        self.words.iter().enumerate().flat_map(|(word, &bits)| {
            (0..SLOTS_PER_WORD).filter_map(move |slot| {
                decode_slot((bits >> shift(slot)) & SLOT_MASK).map(|stone| (word, slot, stone))
            })
        })
    }
}
