//! Elo-style rating formulas
//!
//! Expected scores come from the classic logistic Elo curve in skillratings,
//! with the size of every change scaled by the touch margin of the bout.

use crate::config::ScoringConfig;
use skillratings::elo::{expected_score, EloRating};

/// Probability that a fencer rated `rating1` beats one rated `rating2`
pub fn win_probability(rating1: f64, rating2: f64) -> f64 {
    let (chance1, _chance2) = expected_score(
        &EloRating { rating: rating1 },
        &EloRating { rating: rating2 },
    );
    chance1
}

/// Fraction of the full rating swing earned for a given touch margin.
///
/// A one-touch win moves ratings far less than a 15-0 blowout.
pub fn margin_scale(score1: u32, score2: u32, config: &ScoringConfig) -> f64 {
    let margin = (score1 as f64 - score2 as f64).abs();
    (margin + config.win_bonus) / (config.max_score + config.win_bonus)
}

/// Rating change for fencer 1; fencer 2 receives the negation.
pub fn rating_delta(
    win_chance1: f64,
    fencer1_won: bool,
    score1: u32,
    score2: u32,
    config: &ScoringConfig,
) -> f64 {
    let actual = if fencer1_won { 1.0 } else { 0.0 };
    config.base_change * (actual - win_chance1) * margin_scale(score1, score2, config)
}
