//! Newline-framed stream channel for the CloudWars protocol
//!
//! This crate provides:
//! - Line framing over a byte stream (growth buffer + delimiter scan)
//! - Transport abstractions (LineReader/LineWriter traits)
//! - The framed channel over any tokio byte stream
//! - The TCP "open a stream to host:port" primitive

pub mod channel;
pub mod framing;
pub mod tcp;
pub mod transport;

pub use channel::FramedChannel;
pub use framing::{DELIMITER, LineBuffer, frame};
pub use tcp::{TcpChannel, connect};
pub use transport::{LineChannel, LineReader, LineWriter};
