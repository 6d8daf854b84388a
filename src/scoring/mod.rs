//! Leaderboard scoring engine
//!
//! This module replays a weapon's bout history to derive each fencer's
//! Elo-style rating and their decayed, volume-weighted point total.

pub mod calculator;
pub mod elo;
pub mod points;

// Re-export commonly used types
pub use calculator::{compute_leaderboard, ClubLeaderboardCalculator, LeaderboardCalculator};
pub use elo::{margin_scale, rating_delta, win_probability};
pub use points::DailyBoutCounter;
