//! Sparse storage for an unbounded board.
//!
//! The grid maps chunk ids to [`Chunk`]s. A chunk is allocated the first time
//! a stone is placed inside it and is kept afterwards, even once it is empty
//! again. Reads and removals never allocate.

use std::collections::BTreeMap;

use crate::chunk::Chunk;
use crate::point::{Address, Point};
use crate::stone::Stone;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    chunks: BTreeMap<u64, Chunk>,
}

impl Grid {
    pub const fn new() -> Grid {
        Grid {
            chunks: BTreeMap::new(),
        }
    }

    pub fn get(&self, point: Point) -> Option<Stone> {
        let addr = point.address();
        self.chunks
            .get(&addr.chunk)
            .and_then(|chunk| chunk.get(addr.word, addr.slot))
    }

    /// Places a stone, allocating its chunk if needed.
    ///
    /// Returns `false` if the point is already occupied; the existing stone
    /// is kept.
    #[must_use]
    pub fn set(&mut self, point: Point, stone: Stone) -> bool {
        let addr = point.address();
        self.chunks
            .entry(addr.chunk)
            .or_default()
            .set(addr.word, addr.slot, stone)
    }

    /// Removes the stone at `point` and returns it.
    pub fn unset(&mut self, point: Point) -> Option<Stone> {
        let addr = point.address();
        self.chunks
            .get_mut(&addr.chunk)
            .and_then(|chunk| chunk.unset(addr.word, addr.slot))
    }

    /// Number of allocated chunks, including ones that became empty.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn stone_count(&self) -> usize {
        self.stones().count()
    }

    /// Iterates over all stones in Morton index order.
    pub fn stones(&self) -> impl Iterator<Item = (Point, Stone)> + '_ {
        self.chunks.iter().flat_map(|(&chunk, c)| {
            c.stones().map(move |(word, slot, stone)| {
                let addr = Address { chunk, word, slot };
                (Point::from_index(addr.join()), stone)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let grid = Grid::new();
        assert_eq!(grid.get(Point::ORIGIN), None);
        assert_eq!(grid.get(Point::new(i32::MIN, i32::MAX)), None);
        assert_eq!(grid.chunk_count(), 0);
    }

    #[test]
    fn test_set_get_coherence() {
        let mut grid = Grid::new();
        let p = Point::new(-3, 12);
        assert!(grid.set(p, Stone::Black));
        assert_eq!(grid.get(p), Some(Stone::Black));
        assert!(!grid.set(p, Stone::White));
        assert_eq!(grid.get(p), Some(Stone::Black));
    }

    #[test]
    fn test_unset_coherence() {
        let mut grid = Grid::new();
        let p = Point::new(100, -100);
        assert!(grid.set(p, Stone::White));
        assert_eq!(grid.unset(p), Some(Stone::White));
        assert_eq!(grid.get(p), None);
        assert_eq!(grid.unset(p), None);
    }

    #[test]
    fn test_reads_do_not_allocate() {
        let mut grid = Grid::new();
        assert_eq!(grid.get(Point::new(5, 5)), None);
        assert_eq!(grid.unset(Point::new(5, 5)), None);
        assert_eq!(grid.chunk_count(), 0);
    }

    #[test]
    fn test_chunks_are_kept() {
        let mut grid = Grid::new();
        assert!(grid.set(Point::new(1_000_000, -1_000_000), Stone::Black));
        assert_eq!(grid.chunk_count(), 1);
        grid.unset(Point::new(1_000_000, -1_000_000));
        assert_eq!(grid.chunk_count(), 1);
        assert_eq!(grid.stone_count(), 0);
    }

    #[test]
    fn test_nearby_points_share_chunk() {
        let mut grid = Grid::new();
        for x in -8..=7 {
            for y in -8..=7 {
                assert!(grid.set(Point::new(x, y), Stone::Black));
            }
        }
        assert_eq!(grid.chunk_count(), 1);
        assert_eq!(grid.stone_count(), 256);
    }

    #[test]
    fn test_stones_roundtrip_points() {
        let mut grid = Grid::new();
        let placed = [
            (Point::new(0, 0), Stone::Black),
            (Point::new(-7, 3), Stone::White),
            (Point::new(i32::MAX, i32::MIN), Stone::Black),
        ];
        for &(p, s) in &placed {
            assert!(grid.set(p, s));
        }
        let mut found: Vec<_> = grid.stones().collect();
        found.sort_by_key(|&(p, _)| (p.x, p.y));
        let mut expected = placed.to_vec();
        expected.sort_by_key(|&(p, _)| (p.x, p.y));
        assert_eq!(found, expected);
    }

    #[test]
    fn test_random_points_independent() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut grid = Grid::new();
        let mut placed = std::collections::HashMap::new();
        for _ in 0..2000 {
            let p = Point::new(rng.i32(-300..300), rng.i32(-300..300));
            let s = if rng.bool() { Stone::Black } else { Stone::White };
            let fresh = !placed.contains_key(&p);
            assert_eq!(grid.set(p, s), fresh);
            placed.entry(p).or_insert(s);
        }
        for (&p, &s) in &placed {
            assert_eq!(grid.get(p), Some(s));
        }
        assert_eq!(grid.stone_count(), placed.len());
    }
}
