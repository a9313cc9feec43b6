//! CloudWars game client
//!
//! This crate drives one game session over a newline-framed channel:
//! register a name, pick a colour, start playing, fetch the game state and
//! submit a move. The session is a typestate, so commands can only be issued
//! in protocol order.

pub mod config;
pub mod runner;
pub mod session;

pub use config::ClientConfig;
pub use runner::{SessionPlan, SessionReport, play, run_session};
pub use session::{
    Configured, Connected, Done, InGame, Registered, Session, StateKnown, StateReport,
};
