//! Saving and loading move records.
//!
//! A record is an armored text file:
//!
//! ```text
//! -----BEGIN CONNECT6 RECORD-----
//! Version: infinite-c6 0.1.0
//! Board: Rect(19*19)
//! Count: 2
//!
//! ABk=
//! =xxxx
//! -----END CONNECT6 RECORD-----
//! ```
//!
//! The body is base64 of one varint per move: the point's Morton index
//! shifted left by one, with the stone tag in the lowest bit. The line
//! after the body is `=` followed by the base64 of the little-endian CRC-24
//! of the raw body bytes. Loading stops at the checksum line; the tail
//! line is written but not required.

use std::io::{self, BufRead, Write};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::info;

use crate::board::{Board, Bounds, CommitError};
use crate::constants::{
    CRC24_INIT, CRC24_POLY, RECORD_HEADER, RECORD_LINE_BYTES, RECORD_TAIL, RECORD_VERSION,
};
use crate::point::Point;
use crate::stone::Stone;

#[derive(Debug, thiserror::Error)]
pub enum LoadRecordError {
    #[error("io failure: {0}")]
    Io(#[from] io::Error),
    #[error("syntax error: {0}")]
    Syntax(&'static str),
    #[error("unable to decode base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("corrupted data: {0}")]
    Data(&'static str),
    #[error("unable to place stone: {0}")]
    Commit(#[from] CommitError),
}

/// Appends a 65-bit varint made of a 64-bit value and a low tag bit.
///
/// The first byte holds the tag and the low 6 bits of `hi`; each following
/// byte holds 7 more bits. The top bit of a byte marks continuation.
fn write_var_u65(buf: &mut Vec<u8>, hi: u64, lo: u8) {
    let mut byte = (((hi & 0x3f) << 1) as u8) | (lo & 1);
    let mut rest = hi >> 6;
    while rest != 0 {
        buf.push(byte | 0x80);
        byte = (rest & 0x7f) as u8;
        rest >>= 7;
    }
    buf.push(byte);
}

/// Reads a varint written by `write_var_u65`, advancing `buf` past it.
///
/// Returns `None` on truncated input or if the value exceeds 65 bits.
fn read_var_u65(buf: &mut &[u8]) -> Option<(u64, u8)> {
    let (&first, mut rest) = buf.split_first()?;
    let lo = first & 1;
    let mut hi = u64::from((first & 0x7f) >> 1);
    let mut shift = 6;
    let mut byte = first;

    while byte & 0x80 != 0 {
        let (&next, tail) = rest.split_first()?;
        rest = tail;
        byte = next;

        if shift + 7 > u64::BITS {
            // Only the bits that still fit may be set, and no continuation.
            if byte >= 1 << (u64::BITS - shift) {
                return None;
            }
            hi |= u64::from(byte) << shift;
            break;
        }
        hi |= u64::from(byte & 0x7f) << shift;
        shift += 7;
    }

    *buf = rest;
    Some((hi, lo))
}

/// CRC-24 as used by OpenPGP (RFC 4880 section 6.1).
pub fn crc24(bytes: &[u8]) -> u32 {
    let mut crc = CRC24_INIT;
    for &b in bytes {
        crc ^= u32::from(b) << 16;
        for _ in 0..8 {
            crc <<= 1;
            if crc & 0x100_0000 != 0 {
                crc ^= CRC24_POLY;
            }
        }
    }
    crc & 0xff_ffff
}

fn parse_bounds(s: &str) -> Option<Bounds> {
    if s == "Infinite" {
        return Some(Bounds::Infinite);
    }
    let s = s.strip_prefix("Rect(")?.strip_suffix(')')?;
    let (w, h) = s.split_once('*')?;
    Some(Bounds::Rect(w.parse().ok()?, h.parse().ok()?))
}

fn encode_moves(moves: &[(Point, Stone)]) -> Vec<u8> {
    let mut buf = Vec::new();
    for &(point, stone) in moves {
        write_var_u65(&mut buf, point.index(), stone.tag());
    }
    buf
}

impl Board {
    /// Writes the moves currently on the board as a record.
    pub fn save_record<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let moves = self.past_record();

        writeln!(writer, "{RECORD_HEADER}")?;
        writeln!(writer, "{RECORD_VERSION}")?;
        writeln!(writer, "Board: {}", self.bounds())?;
        writeln!(writer, "Count: {}", moves.len())?;
        writeln!(writer)?;

        let body = encode_moves(moves);
        for line in body.chunks(RECORD_LINE_BYTES) {
            writeln!(writer, "{}", STANDARD.encode(line))?;
        }

        // OpenPGP armor uses big-endian; records use little-endian.
        let crc = crc24(&body).to_le_bytes();
        writeln!(writer, "={}", STANDARD.encode(&crc[..3]))?;
        writeln!(writer, "{RECORD_TAIL}")?;
        writer.flush()?;

        info!(count = moves.len(), bounds = %self.bounds(), "saved record");
        Ok(())
    }

    /// Reads a record and replays it onto a new board.
    pub fn load_record<R: BufRead>(reader: R) -> Result<Board, LoadRecordError> {
        use LoadRecordError::*;

        let mut lines = reader.lines();
        let mut next_line = move || -> Result<String, LoadRecordError> {
            lines.next().ok_or(Syntax("unexpected EOF"))?.map_err(Io)
        };

        if next_line()? != RECORD_HEADER {
            return Err(Syntax("expected header line"));
        }

        let mut bounds = Bounds::Infinite;
        let mut count = None;
        loop {
            let line = next_line()?;
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }

            let (key, value) = line
                .split_once(':')
                .ok_or(Syntax("expected colon in header"))?;
            let value = value.trim_start();
            match key {
                "Board" => {
                    bounds = parse_bounds(value).ok_or(Syntax("invalid header: Board"))?;
                }
                "Count" => {
                    let n = value
                        .parse::<usize>()
                        .map_err(|_| Syntax("invalid header: Count"))?;
                    count = Some(n);
                }
                _ => {}
            }
        }

        let mut body = Vec::new();
        let checksum_line = loop {
            let line = next_line()?;
            if line.starts_with('=') {
                break line;
            }
            STANDARD.decode_vec(line.trim_end(), &mut body)?;
        };

        let checksum_line = checksum_line.trim_end();
        if checksum_line.len() != 5 {
            return Err(Syntax("expected checksum"));
        }
        let crc = STANDARD.decode(&checksum_line[1..])?;
        let crc = match crc[..] {
            [a, b, c] => u32::from_le_bytes([a, b, c, 0]),
            _ => return Err(Syntax("expected checksum")),
        };
        if crc != crc24(&body) {
            return Err(Data("wrong checksum"));
        }

        let mut board = Board::new(bounds);
        let mut rest = &body[..];
        while !rest.is_empty() {
            let (index, tag) = read_var_u65(&mut rest).ok_or(Data("malformed varint"))?;
            board.commit(Point::from_index(index), Stone::from_tag(tag))?;
        }

        if count.is_some_and(|n| n != board.total_count()) {
            return Err(Data("wrong count"));
        }

        info!(count = board.total_count(), %bounds, "loaded record");
        Ok(board)
    }
}
