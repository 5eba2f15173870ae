//! Session orchestration: one login, one match

pub mod events;
pub mod game;
pub mod runner;

pub use events::{log_events, GameOutcome, SessionEvent};
pub use game::Game;
pub use runner::{connect_and_play, run_session};
