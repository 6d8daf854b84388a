//! Common types used throughout the fencing ladder

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Unique identifier for fencers
pub type FencerId = String;

/// Unique identifier for bouts
pub type BoutId = String;

/// Weapon a bout is fenced with. Each weapon has its own bout list and leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weapon {
    Epee,
    Foil,
    Sabre,
}

impl Weapon {
    /// All weapons in display order
    pub const ALL: [Weapon; 3] = [Weapon::Epee, Weapon::Foil, Weapon::Sabre];
}

impl std::fmt::Display for Weapon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Weapon::Epee => write!(f, "Epee"),
            Weapon::Foil => write!(f, "Foil"),
            Weapon::Sabre => write!(f, "Sabre"),
        }
    }
}

impl FromStr for Weapon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "epee" | "épée" => Ok(Weapon::Epee),
            "foil" => Ok(Weapon::Foil),
            "sabre" | "saber" => Ok(Weapon::Sabre),
            other => Err(format!("Unknown weapon: {}", other)),
        }
    }
}

/// A registered club member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fencer {
    pub id: FencerId,
    pub name: String,
}

/// A recorded bout result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bout {
    pub id: BoutId,
    pub date: DateTime<Utc>,
    pub weapon: Weapon,
    pub fencer1_id: FencerId,
    pub fencer2_id: FencerId,
    pub referee_id: FencerId,
    pub score1: u32,
    pub score2: u32,
}

impl Bout {
    /// Participant credited with the win. Equal scores credit fencer 2.
    pub fn winner_id(&self) -> &FencerId {
        if self.score1 > self.score2 {
            &self.fencer1_id
        } else {
            &self.fencer2_id
        }
    }

    /// Whether the fencer took part in this bout as fencer or referee
    pub fn involves(&self, fencer_id: &str) -> bool {
        self.fencer1_id == fencer_id || self.fencer2_id == fencer_id || self.referee_id == fencer_id
    }
}

/// One row of a computed leaderboard. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: FencerId,
    pub name: String,
    pub bouts: u32,
    pub wins: u32,
    pub rating: f64,
    pub points: f64,
    pub refereed_bouts: u32,
}

/// Bout lists partitioned by weapon
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoutsByWeapon {
    #[serde(rename = "Epee", default)]
    pub epee: Vec<Bout>,
    #[serde(rename = "Foil", default)]
    pub foil: Vec<Bout>,
    #[serde(rename = "Sabre", default)]
    pub sabre: Vec<Bout>,
}

impl BoutsByWeapon {
    pub fn get(&self, weapon: Weapon) -> &[Bout] {
        match weapon {
            Weapon::Epee => &self.epee,
            Weapon::Foil => &self.foil,
            Weapon::Sabre => &self.sabre,
        }
    }

    pub fn get_mut(&mut self, weapon: Weapon) -> &mut Vec<Bout> {
        match weapon {
            Weapon::Epee => &mut self.epee,
            Weapon::Foil => &mut self.foil,
            Weapon::Sabre => &mut self.sabre,
        }
    }

    /// Total number of bouts across all weapons
    pub fn len(&self) -> usize {
        self.epee.len() + self.foil.len() + self.sabre.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
