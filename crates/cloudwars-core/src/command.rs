//! Outbound commands and their wire encoding
//!
//! Every command is a keyword followed directly by its payload, no separator:
//! `name<Player>`, `type<Color>`, `play`, `list`, `move<x1>,<y1>;<x2>,<y2>`, `kill`, `quit`.

use crate::error::CloudWarsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A command sent to the game server, one per line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register under a display name
    Name(String),
    /// Declare the role (the player colour)
    Type(String),
    /// Begin the session
    Play,
    /// Request the current game state
    List,
    /// Submit a move
    Move(Move),
    /// Blast the controlled cloud
    Kill,
    /// Ask the server to close the connection
    Quit,
}

impl Command {
    /// Command keyword as it appears on the wire
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Name(_) => "name",
            Command::Type(_) => "type",
            Command::Play => "play",
            Command::List => "list",
            Command::Move(_) => "move",
            Command::Kill => "kill",
            Command::Quit => "quit",
        }
    }

    /// Encode the command as a single line, without the trailing delimiter.
    ///
    /// Free-text payloads have `\r` and `\n` removed; a line break inside a
    /// payload would end the command early on the server side.
    pub fn encode(&self) -> String {
        match self {
            Command::Name(payload) | Command::Type(payload) => {
                format!("{}{}", self.keyword(), strip_line_breaks(payload))
            }
            Command::Move(mv) => format!("{}{}", self.keyword(), mv),
            Command::Play | Command::List | Command::Kill | Command::Quit => {
                self.keyword().to_string()
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

fn strip_line_breaks(payload: &str) -> String {
    payload.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// A board coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// A player action: two coordinate pairs, encoded as `<x1>,<y1>;<x2>,<y2>`.
///
/// Coordinates are not range-checked here; the server decides legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub first: Coord,
    pub second: Coord,
}

impl Move {
    pub fn new(first: Coord, second: Coord) -> Self {
        Self { first, second }
    }

    /// Build a move from raw components
    pub fn from_parts(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self::new(Coord::new(x1, y1), Coord::new(x2, y2))
    }

    /// Full command line for this move
    pub fn to_command(self) -> Command {
        Command::Move(self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.first, self.second)
    }
}

impl FromStr for Coord {
    type Err = CloudWarsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| CloudWarsError::InvalidMove(s.to_string()))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<i64>()
                .map_err(|_| CloudWarsError::InvalidMove(s.to_string()))
        };
        Ok(Coord::new(parse(x)?, parse(y)?))
    }
}

impl FromStr for Move {
    type Err = CloudWarsError;

    /// Parse the payload form `<x1>,<y1>;<x2>,<y2>` (without the `move` keyword)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (first, second) = s
            .split_once(';')
            .ok_or_else(|| CloudWarsError::InvalidMove(s.to_string()))?;
        Ok(Move::new(first.parse()?, second.parse()?))
    }
}

/// Player colours accepted by the server as the `type` role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Gray,
    Orange,
    Purple,
    Red,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::Blue,
        Color::Gray,
        Color::Orange,
        Color::Purple,
        Color::Red,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Gray => "gray",
            Color::Orange => "orange",
            Color::Purple => "purple",
            Color::Red => "red",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = CloudWarsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Color::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| CloudWarsError::InvalidColor(s.to_string()))
    }
}
