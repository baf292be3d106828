//! Line-oriented text protocol for driving a board session.
//!
//! The protocol follows the shape of GTP: one command per line, an optional
//! numeric id in front, and a response of `=` (success) or `?` (failure)
//! followed by the id and a message, terminated by a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`, `list_commands`,
//!   `known_command <cmd>`, `quit`
//! - `boardsize <n|infinite>` - Start an empty board with new bounds
//! - `clear_board` - Start an empty board with the same bounds
//! - `play <color> <x,y>` - Place a stone
//! - `place <x,y>` - Place a stone of the color whose turn it is
//! - `turn` - Color to move and stones left in its turn
//! - `undo`, `redo` - Step through the record
//! - `jump <n>`, `first`, `last` - Move to a position in the record
//! - `get <x,y>` - Stone at a point
//! - `count` - Moves on the board and moves recorded
//! - `record` - Moves on the board, oldest first
//! - `showboard [radius]` - Draw the area around the last stone
//! - `save <path>`, `load <path>` - Record files
//!
//! ## Example
//!
//! ```
//! use infinite_c6::protocol::Engine;
//!
//! let mut engine = Engine::new();
//! let mut out = Vec::new();
//! engine.run("play black 0,0\nget 0,0\n".as_bytes(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "= \n\n= black\n\n");
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use tracing::{debug, warn};

use crate::board::{Board, Bounds, Move};
use crate::constants::{DEFAULT_VIEW_RADIUS, MAX_VIEW_RADIUS};
use crate::point::Point;
use crate::stone::Stone;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "count",
    "first",
    "get",
    "jump",
    "known_command",
    "last",
    "list_commands",
    "load",
    "name",
    "place",
    "play",
    "protocol_version",
    "quit",
    "record",
    "redo",
    "save",
    "showboard",
    "turn",
    "undo",
    "version",
];

/// Result of one command: success flag and response text.
type Response = (bool, String);

fn ok(message: impl Into<String>) -> Response {
    (true, message.into())
}

fn fail(message: impl Into<String>) -> Response {
    (false, message.into())
}

fn format_move((point, stone): Move) -> String {
    format!("{stone} {point}")
}

/// Protocol engine state.
pub struct Engine {
    board: Board,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with an empty infinite board.
    pub fn new() -> Self {
        Self::with_board(Board::new_infinite())
    }

    /// Create an engine around an existing board.
    pub fn with_board(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            if !success {
                warn!(%command, %message, "command failed");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());

        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> Response {
        debug!(command, ?args, "execute");
        match command {
            "name" => ok(env!("CARGO_PKG_NAME")),

            "version" => ok(env!("CARGO_PKG_VERSION")),

            "protocol_version" => ok("1"),

            "list_commands" => ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    ok(if known { "true" } else { "false" })
                }
                None => fail("missing argument"),
            },

            "quit" => ok(""),

            "boardsize" => match args.first() {
                Some(arg) => match parse_bounds_arg(arg) {
                    Some(bounds) => {
                        self.board = Board::new(bounds);
                        ok("")
                    }
                    None => fail("invalid size"),
                },
                None => fail("missing argument"),
            },

            "clear_board" => {
                self.board = Board::new(self.board.bounds());
                ok("")
            }

            "play" => {
                let [color, vertex] = args else {
                    return fail("expected color and vertex");
                };
                let Ok(stone) = color.parse::<Stone>() else {
                    return fail("invalid color");
                };
                self.commit(vertex, stone)
            }

            "place" => {
                let [vertex] = args else {
                    return fail("expected vertex");
                };
                let (stone, _) = self.board.infer_turn();
                self.commit(vertex, stone)
            }

            "turn" => {
                let (stone, last_of_turn) = self.board.infer_turn();
                let left = if last_of_turn { 1 } else { 2 };
                ok(format!("{stone} {left}"))
            }

            "undo" => match self.board.undo() {
                Some(mv) => ok(format_move(mv)),
                None => fail("nothing to undo"),
            },

            "redo" => match self.board.redo() {
                Some(mv) => ok(format_move(mv)),
                None => fail("nothing to redo"),
            },

            "jump" => {
                let Some(Ok(index)) = args.first().map(|a| a.parse::<usize>()) else {
                    return fail("invalid index");
                };
                self.jump(index)
            }

            "first" => self.jump(0),

            "last" => self.jump(self.board.total_count()),

            "get" => {
                let [vertex] = args else {
                    return fail("expected vertex");
                };
                match vertex.parse::<Point>() {
                    Ok(point) => ok(self
                        .board
                        .get(point)
                        .map_or("empty", Stone::name)),
                    Err(err) => fail(err.to_string()),
                }
            }

            "count" => ok(format!(
                "{} {}",
                self.board.index(),
                self.board.total_count()
            )),

            "record" => {
                let lines: Vec<String> = self
                    .board
                    .past_record()
                    .iter()
                    .map(|&mv| format_move(mv))
                    .collect();
                ok(lines.join("\n"))
            }

            "showboard" => {
                let radius = match args.first() {
                    Some(arg) => match arg.parse::<u32>() {
                        Ok(r) if r <= MAX_VIEW_RADIUS => r,
                        _ => return fail("invalid radius"),
                    },
                    None => DEFAULT_VIEW_RADIUS,
                };
                let center = self
                    .board
                    .past_record()
                    .last()
                    .map_or(Point::ORIGIN, |&(p, _)| p);
                ok(format!("\n{}", self.board.view(center, radius)))
            }

            "save" => {
                let [path] = args else {
                    return fail("expected path");
                };
                let res = File::create(path)
                    .and_then(|file| self.board.save_record(BufWriter::new(file)));
                match res {
                    Ok(()) => ok(""),
                    Err(err) => fail(format!("cannot save: {err}")),
                }
            }

            "load" => {
                let [path] = args else {
                    return fail("expected path");
                };
                let res = File::open(path)
                    .map_err(Into::into)
                    .and_then(|file| Board::load_record(BufReader::new(file)));
                match res {
                    Ok(board) => {
                        self.board = board;
                        ok("")
                    }
                    Err(err) => fail(format!("cannot load: {err}")),
                }
            }

            _ => fail(format!("unknown command: {command}")),
        }
    }

    fn commit(&mut self, vertex: &str, stone: Stone) -> Response {
        let point = match vertex.parse::<Point>() {
            Ok(point) => point,
            Err(err) => return fail(err.to_string()),
        };
        match self.board.commit(point, stone) {
            Ok(()) => ok(""),
            Err(err) => fail(format!("illegal move: {err}")),
        }
    }

    fn jump(&mut self, index: usize) -> Response {
        if self.board.jump(index) {
            ok("")
        } else {
            fail(format!(
                "index out of range (total {})",
                self.board.total_count()
            ))
        }
    }
}

/// Parses `infinite` or a square board size.
fn parse_bounds_arg(arg: &str) -> Option<Bounds> {
    if arg.eq_ignore_ascii_case("infinite") {
        return Some(Bounds::Infinite);
    }
    match arg.parse::<u32>() {
        Ok(size) if size > 0 => Some(Bounds::Rect(size, size)),
        _ => None,
    }
}
