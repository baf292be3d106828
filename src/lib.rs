//! Infinite-C6: an unbounded Connect6 board with a replayable move record.
//!
//! Stones are stored sparsely: every point is mapped to a Morton index,
//! whose high bits select a lazily allocated 16x16 chunk and whose low bits
//! select a two-bit slot inside it. On top of that storage, [`board::Board`]
//! keeps the list of moves and an index into it, so moves can be undone,
//! redone, and jumped between without copying the board.
//!
//! ## Modules
//!
//! - [`constants`] - Chunk geometry and file format constants
//! - [`point`] - Points, zigzag and Morton encoding, storage addresses
//! - [`stone`] - Stone colors
//! - [`chunk`] - Bit-packed storage for one 16x16 square
//! - [`grid`] - Sparse map of chunks
//! - [`board`] - Move record with undo, redo and jump
//! - [`record`] - Record file save and load
//! - [`protocol`] - Text command protocol
//!
//! ## Example
//!
//! ```
//! use infinite_c6::board::Board;
//! use infinite_c6::point::Point;
//! use infinite_c6::stone::Stone;
//!
//! let mut board = Board::new_infinite();
//! board.commit(Point::new(0, 0), Stone::Black).unwrap();
//! board.commit(Point::new(1, 1), Stone::White).unwrap();
//!
//! assert_eq!(board.undo(), Some((Point::new(1, 1), Stone::White)));
//! assert_eq!(board.get(Point::new(1, 1)), None);
//! assert_eq!(board.infer_turn(), (Stone::White, false));
//! ```

pub mod board;
pub mod chunk;
pub mod constants;
pub mod grid;
pub mod point;
pub mod protocol;
pub mod record;
pub mod stone;
