//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use fencing_ladder::types::{Bout, Fencer, Weapon};

/// Fixed reference time so decay is reproducible
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 20, 0, 0).unwrap()
}

pub fn fencer(id: &str, name: &str) -> Fencer {
    Fencer {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// A small roster: three fencers plus a dedicated referee
pub fn roster() -> Vec<Fencer> {
    vec![
        fencer("f-aldo", "Aldo"),
        fencer("f-nedo", "Nedo"),
        fencer("f-ilona", "Ilona"),
        fencer("f-ref", "Referee"),
    ]
}

/// Builder for bout records in tests
#[derive(Debug, Clone)]
pub struct BoutBuilder {
    bout: Bout,
}

impl BoutBuilder {
    pub fn new(id: &str, fencer1: &str, fencer2: &str) -> Self {
        Self {
            bout: Bout {
                id: id.to_string(),
                date: reference_now(),
                weapon: Weapon::Epee,
                fencer1_id: fencer1.to_string(),
                fencer2_id: fencer2.to_string(),
                referee_id: "f-ref".to_string(),
                score1: 15,
                score2: 10,
            },
        }
    }

    pub fn score(mut self, score1: u32, score2: u32) -> Self {
        self.bout.score1 = score1;
        self.bout.score2 = score2;
        self
    }

    pub fn referee(mut self, referee: &str) -> Self {
        self.bout.referee_id = referee.to_string();
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.bout.date = date;
        self
    }

    pub fn days_ago(mut self, days: i64) -> Self {
        self.bout.date = reference_now() - Duration::days(days);
        self
    }

    pub fn build(self) -> Bout {
        self.bout
    }
}
