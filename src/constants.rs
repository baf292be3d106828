//! Constants for chunk geometry, the record file format, and the protocol.
//!
//! The sparse grid stores stones in fixed-size chunks. A point's Morton index
//! is split into three parts, from least to most significant:
//!
//! ```text
//! | chunk id (56 bits) | word id (3 bits) | slot id (5 bits) |
//! ```
//!
//! Two bits per slot and 64-bit words give 32 slots per word, so the low
//! 8 bits of the index address one of 256 points in a 16x16 square.

// =============================================================================
// Chunk Geometry
// =============================================================================

/// Log2 of the chunk side length.
pub const CHUNK_SIZE_BITS: u32 = 4;

/// Chunk side length (a chunk covers `CHUNK_SIZE x CHUNK_SIZE` points).
pub const CHUNK_SIZE: usize = 1 << CHUNK_SIZE_BITS;

/// Bits used to store one slot (empty, black or white).
pub const BITS_PER_SLOT: u32 = 2;

/// Number of slots packed into one `u64` word.
pub const SLOTS_PER_WORD: usize = (u64::BITS / BITS_PER_SLOT) as usize;

/// Number of words in a chunk.
pub const WORDS_PER_CHUNK: usize = CHUNK_SIZE * CHUNK_SIZE / SLOTS_PER_WORD;

/// Index bits selecting a slot inside a word.
pub const SLOT_INDEX_BITS: u32 = SLOTS_PER_WORD.trailing_zeros();

/// Index bits selecting a word inside a chunk.
pub const WORD_INDEX_BITS: u32 = CHUNK_SIZE_BITS * 2 - SLOT_INDEX_BITS;

const _: () = assert!(1 << SLOT_INDEX_BITS == SLOTS_PER_WORD);
const _: () = assert!(1 << WORD_INDEX_BITS == WORDS_PER_CHUNK);

// =============================================================================
// Record File Format
// =============================================================================

/// First line of every record file.
pub const RECORD_HEADER: &str = "-----BEGIN CONNECT6 RECORD-----";

/// Last line of every record file.
pub const RECORD_TAIL: &str = "-----END CONNECT6 RECORD-----";

/// Version header written into saved records.
pub const RECORD_VERSION: &str = concat!(
    "Version: ",
    env!("CARGO_PKG_NAME"),
    " ",
    env!("CARGO_PKG_VERSION")
);

/// Raw body bytes per base64 line (encodes to 64 characters).
pub const RECORD_LINE_BYTES: usize = 48;

/// CRC-24 initial value (OpenPGP, RFC 4880 section 6.1).
pub const CRC24_INIT: u32 = 0xb7_04ce;

/// CRC-24 generator polynomial.
pub const CRC24_POLY: u32 = 0x186_4cfb;

// =============================================================================
// Protocol and Display
// =============================================================================

/// Default half-width of the window printed by `showboard`.
pub const DEFAULT_VIEW_RADIUS: u32 = 9;

/// Largest radius accepted for a printed window.
pub const MAX_VIEW_RADIUS: u32 = 64;

/// Character for a black stone.
pub const CHAR_BLACK: char = 'X';

/// Character for a white stone.
pub const CHAR_WHITE: char = 'O';

/// Character for an empty point.
pub const CHAR_EMPTY: char = '.';

/// Character for a point outside the board bounds.
pub const CHAR_OUT: char = ' ';
