//! Fencing Ladder - roster, bout tracking and leaderboards for a fencing club
//!
//! This crate records fencers and bout results per weapon, persists them
//! through a key-value store, and derives a ranked leaderboard combining an
//! Elo-style rating with decayed, volume-weighted points.

pub mod club;
pub mod config;
pub mod error;
pub mod export;
pub mod scoring;
pub mod storage;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LadderError, Result};
pub use types::*;

// Re-export key components
pub use club::{BoutDraft, ClubRecords};
pub use scoring::{compute_leaderboard, ClubLeaderboardCalculator, LeaderboardCalculator};
pub use storage::{InMemoryStore, JsonFileStore, KeyValueStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
