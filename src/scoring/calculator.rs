//! Leaderboard calculator trait and the club's scoring implementation
//!
//! Every call replays the full bout history from scratch: there is no
//! incremental state, so the result depends only on the roster, the bouts
//! and the reference time.

use crate::config::ScoringConfig;
use crate::scoring::elo::{rating_delta, win_probability};
use crate::scoring::points::{age_scale, base_points, daily_multiplier, DailyBoutCounter};
use crate::types::{Bout, Fencer, LeaderboardEntry};
use crate::utils::{calendar_date, current_timestamp, months_between};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Trait for turning a bout history into a ranked leaderboard
pub trait LeaderboardCalculator: Send + Sync {
    /// Compute one entry per roster fencer, sorted by points descending
    ///
    /// # Arguments
    /// * `bouts` - Bouts for a single weapon, in any order
    /// * `fencers` - The full roster
    /// * `now` - Reference time for point decay
    fn calculate(
        &self,
        bouts: &[Bout],
        fencers: &[Fencer],
        now: DateTime<Utc>,
    ) -> Vec<LeaderboardEntry>;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// Elo rating plus decayed, volume-weighted points
#[derive(Debug, Clone, Default)]
pub struct ClubLeaderboardCalculator {
    config: ScoringConfig,
}

impl ClubLeaderboardCalculator {
    /// Create a calculator, rejecting invalid constants
    pub fn new(config: ScoringConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    fn new_entry(&self, fencer: &Fencer) -> LeaderboardEntry {
        LeaderboardEntry {
            id: fencer.id.clone(),
            name: fencer.name.clone(),
            bouts: 0,
            wins: 0,
            rating: self.config.initial_rating,
            points: 0.0,
            refereed_bouts: 0,
        }
    }
}

impl LeaderboardCalculator for ClubLeaderboardCalculator {
    fn calculate(
        &self,
        bouts: &[Bout],
        fencers: &[Fencer],
        now: DateTime<Utc>,
    ) -> Vec<LeaderboardEntry> {
        if fencers.is_empty() {
            return Vec::new();
        }

        let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(fencers.len());
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(fencers.len());
        for fencer in fencers {
            if index.contains_key(fencer.id.as_str()) {
                continue;
            }
            index.insert(fencer.id.as_str(), entries.len());
            entries.push(self.new_entry(fencer));
        }

        // Stable sort: bouts on the same timestamp keep their recorded order
        let mut ordered: Vec<&Bout> = bouts.iter().collect();
        ordered.sort_by_key(|bout| bout.date);

        let offset = self.config.club_offset();
        let mut daily = DailyBoutCounter::new();

        for bout in ordered {
            daily.observe(calendar_date(bout.date, offset));

            let (Some(&i1), Some(&i2)) = (
                index.get(bout.fencer1_id.as_str()),
                index.get(bout.fencer2_id.as_str()),
            ) else {
                debug!(bout_id = %bout.id, "Skipping bout with a fencer missing from the roster");
                continue;
            };

            entries[i1].bouts += 1;
            entries[i2].bouts += 1;
            match index.get(bout.referee_id.as_str()) {
                Some(&referee) => entries[referee].refereed_bouts += 1,
                None => debug!(bout_id = %bout.id, "Referee not on roster, not credited"),
            }

            let fencer1_won = bout.winner_id() == &bout.fencer1_id;
            if fencer1_won {
                entries[i1].wins += 1;
            } else {
                entries[i2].wins += 1;
            }

            let win_chance1 = win_probability(entries[i1].rating, entries[i2].rating);
            let delta = rating_delta(
                win_chance1,
                fencer1_won,
                bout.score1,
                bout.score2,
                &self.config,
            );
            entries[i1].rating += delta;
            entries[i2].rating -= delta;

            let months_old = months_between(now, bout.date, offset);
            let Some(scale) = age_scale(months_old, self.config.months_expire) else {
                trace!(bout_id = %bout.id, months_old, "Bout past points horizon");
                continue;
            };

            let (prior1, prior2) = daily.record_bout(&bout.fencer1_id, &bout.fencer2_id);
            let multiplier1 = daily_multiplier(prior1, self.config.multiplier_amount);
            let multiplier2 = daily_multiplier(prior2, self.config.multiplier_amount);

            let points1 = base_points(bout.score1, fencer1_won, &self.config);
            let points2 = base_points(bout.score2, !fencer1_won, &self.config);

            // Each side is weighted by the chance it was expected to lose
            entries[i1].points += points1 * scale * multiplier1 * (1.0 - win_chance1);
            entries[i2].points += points2 * scale * multiplier2 * win_chance1;

            trace!(
                bout_id = %bout.id,
                win_chance1,
                delta,
                "Scored bout"
            );
        }

        entries.sort_by(|a, b| {
            b.points
                .partial_cmp(&a.points)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entries
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}

/// Compute a leaderboard with the default constants as of the current time
pub fn compute_leaderboard(bouts: &[Bout], fencers: &[Fencer]) -> Vec<LeaderboardEntry> {
    ClubLeaderboardCalculator::default().calculate(bouts, fencers, current_timestamp())
}
