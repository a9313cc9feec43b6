//! Server responses and their classification
//!
//! The protocol carries no type tag: a reply is a structured payload when its
//! content opens with `{`, and plain text otherwise. [`classify`] is the only
//! place that makes this decision.

use crate::error::{CloudWarsError, Result};
use crate::state::GameState;

/// Marker that opens a structured payload
pub const STRUCTURED_MARKER: char = '{';

/// How a response should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Informational line, surfaced as-is
    Plain,
    /// Key-value record (JSON object)
    Structured,
}

/// Classify response content (delimiter already stripped) by its first character
pub fn classify(content: &str) -> ResponseKind {
    if content.starts_with(STRUCTURED_MARKER) {
        ResponseKind::Structured
    } else {
        ResponseKind::Plain
    }
}

/// A single line received from the server, delimiter still attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    raw: String,
}

impl Response {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The line exactly as framed, including its delimiter
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Content with the trailing `\n` (and a preceding `\r`) stripped
    pub fn content(&self) -> &str {
        let line = self.raw.strip_suffix('\n').unwrap_or(&self.raw);
        line.strip_suffix('\r').unwrap_or(line)
    }

    pub fn kind(&self) -> ResponseKind {
        classify(self.content())
    }

    pub fn is_structured(&self) -> bool {
        self.kind() == ResponseKind::Structured
    }

    /// Decode a structured response as a game state record
    pub fn game_state(&self) -> Result<GameState> {
        match self.kind() {
            ResponseKind::Structured => GameState::from_json(self.content()),
            ResponseKind::Plain => Err(CloudWarsError::Payload(format!(
                "Expected structured payload, got plain text: {}",
                self.content()
            ))),
        }
    }

    pub fn into_content(self) -> String {
        let len = self.content().len();
        let mut raw = self.raw;
        raw.truncate(len);
        raw
    }
}
