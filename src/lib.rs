//! Football scoreboard core: polls the ESPN scoreboard for the NFL and
//! college football, normalizes both into one game model, and tracks
//! score/turnover changes between polls.

pub mod board;
pub mod changes;
pub mod poller;
pub mod refresher;
pub mod sample;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

pub use football_api::{Game, GameStatus, League};
