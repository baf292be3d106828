use std::fmt;
use std::str::FromStr;

/// A stone on the board, either black or white.
///
/// There is no "empty" variant: an empty point is `Option::<Stone>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Black = 0,
    White = 1,
}

impl Stone {
    pub fn opposite(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// One-bit tag used by the record format.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Creates a stone from its record tag. Only the lowest bit is read.
    pub fn from_tag(tag: u8) -> Stone {
        if tag & 1 == 0 {
            Stone::Black
        } else {
            Stone::White
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stone::Black => "black",
            Stone::White => "white",
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a color string is not a known stone name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color: {0:?}")]
pub struct ParseStoneError(String);

impl FromStr for Stone {
    type Err = ParseStoneError;

    /// Accepts `black`/`b` and `white`/`w`, case-insensitively.
    fn from_str(s: &str) -> Result<Stone, ParseStoneError> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "b" => Ok(Stone::Black),
            "white" | "w" => Ok(Stone::White),
            _ => Err(ParseStoneError(s.to_string())),
        }
    }
}
