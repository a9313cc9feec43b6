//! # cloudwars-core
//!
//! Core types for the CloudWars line protocol.
//!
//! This crate provides the vocabulary shared by the channel and the session driver:
//! - Error taxonomy
//! - Outbound commands and move encoding
//! - Response classification (plain text vs structured payload)
//! - The game state record carried by structured responses

pub mod command;
pub mod error;
pub mod response;
pub mod state;

pub use command::{Color, Command, Coord, Move};
pub use error::{CloudWarsError, Result};
pub use response::{Response, ResponseKind, classify};
pub use state::{Cloud, GameState, Position, Velocity};
