//! Bout submissions and their validation

use crate::error::LadderError;
use crate::types::{Bout, BoutId, Fencer, FencerId, Weapon};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest score a fencer can record in a bout
pub const MAX_BOUT_SCORE: u32 = 15;

/// A bout as entered by an operator, before it is given an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoutDraft {
    pub date: DateTime<Utc>,
    pub fencer1_id: FencerId,
    pub fencer2_id: FencerId,
    pub referee_id: FencerId,
    pub score1: u32,
    pub score2: u32,
}

impl BoutDraft {
    /// Check the draft against the current roster
    pub fn validate(&self, fencers: &[Fencer]) -> crate::error::Result<()> {
        let on_roster = |id: &str| fencers.iter().any(|f| f.id == id);

        for (role, id) in [
            ("Fencer 1", &self.fencer1_id),
            ("Fencer 2", &self.fencer2_id),
            ("Referee", &self.referee_id),
        ] {
            if id.is_empty() {
                return Err(LadderError::InvalidBout {
                    reason: format!("{} must be selected", role),
                }
                .into());
            }
            if !on_roster(id.as_str()) {
                return Err(LadderError::FencerNotFound {
                    fencer_id: id.clone(),
                }
                .into());
            }
        }

        if self.fencer1_id == self.fencer2_id {
            return Err(LadderError::InvalidBout {
                reason: "A fencer cannot fence themselves".to_string(),
            }
            .into());
        }

        if self.score1 > MAX_BOUT_SCORE || self.score2 > MAX_BOUT_SCORE {
            return Err(LadderError::InvalidBout {
                reason: format!(
                    "Scores must be between 0 and {}, got {}-{}",
                    MAX_BOUT_SCORE, self.score1, self.score2
                ),
            }
            .into());
        }

        Ok(())
    }

    /// Turn the draft into a bout record
    pub fn into_bout(self, id: BoutId, weapon: Weapon) -> Bout {
        Bout {
            id,
            date: self.date,
            weapon,
            fencer1_id: self.fencer1_id,
            fencer2_id: self.fencer2_id,
            referee_id: self.referee_id,
            score1: self.score1,
            score2: self.score2,
        }
    }
}

impl From<&Bout> for BoutDraft {
    fn from(bout: &Bout) -> Self {
        Self {
            date: bout.date,
            fencer1_id: bout.fencer1_id.clone(),
            fencer2_id: bout.fencer2_id.clone(),
            referee_id: bout.referee_id.clone(),
            score1: bout.score1,
            score2: bout.score2,
        }
    }
}
