//! Roster and bout store backed by persistent state

use crate::club::draft::BoutDraft;
use crate::error::LadderError;
use crate::scoring::{ClubLeaderboardCalculator, LeaderboardCalculator};
use crate::storage::{KeyValueStore, PersistentState};
use crate::types::{Bout, BoutsByWeapon, Fencer, LeaderboardEntry, Weapon};
use crate::utils::generate_id;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Storage key for the roster
pub const FENCERS_KEY: &str = "fencers";

/// Storage key for the per-weapon bout lists
pub const BOUTS_KEY: &str = "bouts";

/// The club's fencers and recorded bouts
pub struct ClubRecords {
    fencers: PersistentState<Vec<Fencer>>,
    bouts: PersistentState<BoutsByWeapon>,
    calculator: Box<dyn LeaderboardCalculator>,
}

impl ClubRecords {
    /// Load records from `store` with the default scoring constants
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_calculator(store, Box::new(ClubLeaderboardCalculator::default()))
    }

    /// Load records from `store`, scoring leaderboards with `calculator`
    pub fn with_calculator(
        store: Arc<dyn KeyValueStore>,
        calculator: Box<dyn LeaderboardCalculator>,
    ) -> Self {
        let fencers = PersistentState::load(store.clone(), FENCERS_KEY, Vec::new());
        let bouts = PersistentState::load(store, BOUTS_KEY, BoutsByWeapon::default());

        info!(
            fencers = fencers.get().len(),
            bouts = bouts.get().len(),
            "Loaded club records"
        );

        Self {
            fencers,
            bouts,
            calculator,
        }
    }

    pub fn fencers(&self) -> &[Fencer] {
        self.fencers.get()
    }

    pub fn bouts(&self, weapon: Weapon) -> &[Bout] {
        self.bouts.get().get(weapon)
    }

    pub fn all_bouts(&self) -> &BoutsByWeapon {
        self.bouts.get()
    }

    /// Display name for a fencer id
    pub fn fencer_name(&self, id: &str) -> Option<&str> {
        self.fencers()
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.name.as_str())
    }

    /// Map of fencer id to display name
    pub fn fencer_names(&self) -> HashMap<String, String> {
        self.fencers()
            .iter()
            .map(|f| (f.id.clone(), f.name.clone()))
            .collect()
    }

    /// Look a fencer up by id, or by exact name
    pub fn find_fencer(&self, name_or_id: &str) -> Option<&Fencer> {
        let needle = name_or_id.trim();
        self.fencers()
            .iter()
            .find(|f| f.id == needle)
            .or_else(|| self.fencers().iter().find(|f| f.name == needle))
    }

    /// Register a new fencer. Names are trimmed and must be unique.
    pub fn add_fencer(&mut self, name: &str) -> crate::error::Result<Fencer> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LadderError::InvalidFencerName {
                reason: "Name cannot be empty".to_string(),
            }
            .into());
        }
        if self.fencers().iter().any(|f| f.name == name) {
            return Err(LadderError::DuplicateFencer {
                name: name.to_string(),
            }
            .into());
        }

        let fencer = Fencer {
            id: generate_id(),
            name: name.to_string(),
        };
        self.fencers.update(|fencers| fencers.push(fencer.clone()));

        info!(fencer_id = %fencer.id, name = %fencer.name, "Added fencer");
        Ok(fencer)
    }

    /// Remove a fencer and every bout they fenced or refereed, in all weapons.
    ///
    /// Returns the number of bouts removed.
    pub fn delete_fencer(&mut self, id: &str) -> crate::error::Result<usize> {
        if self.fencer_name(id).is_none() {
            return Err(LadderError::FencerNotFound {
                fencer_id: id.to_string(),
            }
            .into());
        }

        self.fencers.update(|fencers| fencers.retain(|f| f.id != id));
        let removed = self.bouts.update(|bouts| {
            Weapon::ALL
                .iter()
                .map(|&weapon| {
                    let list = bouts.get_mut(weapon);
                    let before = list.len();
                    list.retain(|b| !b.involves(id));
                    before - list.len()
                })
                .sum::<usize>()
        });

        info!(fencer_id = %id, bouts_removed = removed, "Deleted fencer");
        Ok(removed)
    }

    /// Record a new bout for `weapon`
    pub fn record_bout(&mut self, weapon: Weapon, draft: BoutDraft) -> crate::error::Result<Bout> {
        draft.validate(self.fencers())?;

        let bout = draft.into_bout(generate_id(), weapon);
        self.bouts
            .update(|bouts| bouts.get_mut(weapon).push(bout.clone()));

        info!(
            bout_id = %bout.id,
            %weapon,
            score = %format!("{}-{}", bout.score1, bout.score2),
            "Recorded bout"
        );
        Ok(bout)
    }

    /// Replace a bout in place, keeping its id and position
    pub fn update_bout(
        &mut self,
        weapon: Weapon,
        id: &str,
        draft: BoutDraft,
    ) -> crate::error::Result<Bout> {
        let position = self
            .bouts(weapon)
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| LadderError::BoutNotFound {
                bout_id: id.to_string(),
            })?;
        draft.validate(self.fencers())?;

        let bout = draft.into_bout(id.to_string(), weapon);
        self.bouts
            .update(|bouts| bouts.get_mut(weapon)[position] = bout.clone());

        info!(bout_id = %id, %weapon, "Updated bout");
        Ok(bout)
    }

    /// Remove a bout from `weapon`'s list
    pub fn delete_bout(&mut self, weapon: Weapon, id: &str) -> crate::error::Result<Bout> {
        let position = self
            .bouts(weapon)
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| LadderError::BoutNotFound {
                bout_id: id.to_string(),
            })?;

        let bout = self
            .bouts
            .update(|bouts| bouts.get_mut(weapon).remove(position));

        info!(bout_id = %id, %weapon, "Deleted bout");
        Ok(bout)
    }

    /// Find a bout in any weapon by id
    pub fn find_bout(&self, id: &str) -> Option<&Bout> {
        Weapon::ALL
            .iter()
            .flat_map(|&weapon| self.bouts(weapon).iter())
            .find(|b| b.id == id)
    }

    /// A weapon's bouts, most recent first
    pub fn bout_history(&self, weapon: Weapon) -> Vec<Bout> {
        let mut bouts = self.bouts(weapon).to_vec();
        bouts.sort_by(|a, b| b.date.cmp(&a.date));
        bouts
    }

    /// Ranked leaderboard for `weapon` as of `now`
    pub fn leaderboard(&self, weapon: Weapon, now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
        self.calculator
            .calculate(self.bouts(weapon), self.fencers(), now)
    }
}

impl std::fmt::Debug for ClubRecords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClubRecords")
            .field("fencers", self.fencers.get())
            .field("bouts", self.bouts.get())
            .finish()
    }
}
