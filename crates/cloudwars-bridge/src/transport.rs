//! Transport abstractions for the line protocol
//!
//! The session driver only talks to these traits, so it can run over a TCP
//! stream, an in-memory pipe, or a scripted peer in tests.

use async_trait::async_trait;
use cloudwars_core::{Response, Result};

/// Trait for sending framed lines
#[async_trait]
pub trait LineWriter: Send {
    /// Append the delimiter to `text`, write the whole line and flush.
    /// `text` must not contain a newline; this is not checked.
    async fn send(&mut self, text: &str) -> Result<()>;

    /// Shut down the write side of the transport
    async fn close(&mut self) -> Result<()>;
}

/// Trait for receiving framed lines
#[async_trait]
pub trait LineReader: Send {
    /// Wait for the next complete line, delimiter still attached
    async fn receive(&mut self) -> Result<Response>;
}

/// A bidirectional line transport
pub trait LineChannel: LineReader + LineWriter {}

impl<T: LineReader + LineWriter> LineChannel for T {}
