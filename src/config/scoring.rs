//! Scoring engine configuration

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Constants driving rating and point calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Rating every fencer starts from
    pub initial_rating: f64,
    /// Largest rating swing for a single bout
    pub base_change: f64,
    /// Added to the touch margin when scaling rating changes
    pub win_bonus: f64,
    /// Touches needed to win a direct-elimination bout
    pub max_score: f64,
    /// Bouts this many calendar months old or older earn no points
    pub months_expire: u32,
    /// Extra point multiplier per earlier bout fenced the same day
    pub multiplier_amount: f64,
    /// Points for fencing a bout
    pub points_bout: f64,
    /// Points for winning a bout
    pub points_win: f64,
    /// Points per touch scored
    pub points_touch: f64,
    /// Club time zone as minutes east of UTC, used for calendar days and months
    pub utc_offset_minutes: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            initial_rating: 1000.0,
            base_change: 80.0,
            win_bonus: 1.0,
            max_score: 15.0,
            months_expire: 12,
            multiplier_amount: 0.05,
            points_bout: 10.0,
            points_win: 60.0,
            points_touch: 20.0,
            utc_offset_minutes: 0,
        }
    }
}

impl ScoringConfig {
    fn offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
    }

    /// Offset bout dates are read in when grouping by day and month
    pub fn club_offset(&self) -> FixedOffset {
        self.offset().unwrap_or_else(|| Utc.fix())
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.offset().is_none() {
            return Err(crate::error::LadderError::ConfigurationError {
                message: format!(
                    "UTC offset must be within a day, got {} minutes",
                    self.utc_offset_minutes
                ),
            }
            .into());
        }

        if self.max_score + self.win_bonus <= 0.0 {
            return Err(crate::error::LadderError::ConfigurationError {
                message: "Max score plus win bonus must be positive".to_string(),
            }
            .into());
        }

        if self.months_expire == 0 {
            return Err(crate::error::LadderError::ConfigurationError {
                message: "Points expiry must be at least one month".to_string(),
            }
            .into());
        }

        if self.multiplier_amount < 0.0 {
            return Err(crate::error::LadderError::ConfigurationError {
                message: "Daily multiplier amount must be non-negative".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
