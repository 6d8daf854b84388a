//! Point formulas: age decay, same-day volume multiplier and bout rewards

use crate::config::ScoringConfig;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Linear decay factor for a bout `months_old` calendar months in the past.
///
/// Returns `None` once the bout has reached the expiry horizon.
pub fn age_scale(months_old: i32, months_expire: u32) -> Option<f64> {
    let expire = months_expire as i32;
    if months_old >= expire {
        return None;
    }
    Some((expire - months_old) as f64 / expire as f64)
}

/// Multiplier for a fencer who already fenced `prior_bouts_today` bouts that day
pub fn daily_multiplier(prior_bouts_today: u32, multiplier_amount: f64) -> f64 {
    1.0 + prior_bouts_today as f64 * multiplier_amount
}

/// Undecayed points for one side of a bout
pub fn base_points(own_score: u32, won: bool, config: &ScoringConfig) -> f64 {
    let mut points = config.points_bout + own_score as f64 * config.points_touch;
    if won {
        points += config.points_win;
    }
    points
}

/// Per-fencer count of bouts fenced on the current calendar day.
///
/// Counts clear whenever the processed bout moves to a different date.
#[derive(Debug, Default)]
pub struct DailyBoutCounter {
    day: Option<NaiveDate>,
    counts: HashMap<String, u32>,
}

impl DailyBoutCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the date of the next bout, clearing counts on a new day
    pub fn observe(&mut self, date: NaiveDate) {
        if self.day != Some(date) {
            self.counts.clear();
            self.day = Some(date);
        }
    }

    /// Count of bouts already fenced today
    pub fn count(&self, fencer_id: &str) -> u32 {
        self.counts.get(fencer_id).copied().unwrap_or(0)
    }

    /// Record a bout between two fencers, returning each one's prior count
    pub fn record_bout(&mut self, fencer1_id: &str, fencer2_id: &str) -> (u32, u32) {
        let prior1 = self.count(fencer1_id);
        let prior2 = self.count(fencer2_id);
        self.counts.insert(fencer1_id.to_string(), prior1 + 1);
        self.counts.insert(fencer2_id.to_string(), prior2 + 1);
        (prior1, prior2)
    }
}
