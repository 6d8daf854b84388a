//! Integration tests for the fencing ladder
//!
//! These tests exercise the scoring engine against full bout histories and
//! the club records end to end through the file-backed store:
//! - Worked rating and point scenarios
//! - Ordering, decay horizon and tie-break behaviour
//! - Cascade deletes and persistence fallbacks
//! - Text exports

mod fixtures;

use chrono::{Duration, FixedOffset, TimeZone, Utc};
use fencing_ladder::club::{BoutDraft, ClubRecords};
use fencing_ladder::export::{export_bout_history, export_leaderboard};
use fencing_ladder::scoring::{ClubLeaderboardCalculator, LeaderboardCalculator};
use fencing_ladder::storage::{JsonFileStore, KeyValueStore};
use fencing_ladder::types::{LeaderboardEntry, Weapon};
use std::sync::Arc;

use fixtures::{reference_now, roster, BoutBuilder};

fn entry<'a>(board: &'a [LeaderboardEntry], id: &str) -> &'a LeaderboardEntry {
    board
        .iter()
        .find(|e| e.id == id)
        .unwrap_or_else(|| panic!("no entry for {}", id))
}

fn calculate(bouts: &[fencing_ladder::types::Bout]) -> Vec<LeaderboardEntry> {
    ClubLeaderboardCalculator::default().calculate(bouts, &roster(), reference_now())
}

#[test]
fn test_even_bout_today() {
    let bouts = vec![BoutBuilder::new("b1", "f-aldo", "f-nedo")
        .score(15, 10)
        .build()];

    let board = calculate(&bouts);
    let aldo = entry(&board, "f-aldo");
    let nedo = entry(&board, "f-nedo");

    assert_eq!(aldo.rating, 1015.0);
    assert_eq!(nedo.rating, 985.0);
    assert_eq!(aldo.points, 185.0);
    assert_eq!(nedo.points, 105.0);
    assert_eq!(board[0].id, "f-aldo");
    assert_eq!(board[1].id, "f-nedo");
    assert_eq!(entry(&board, "f-ref").refereed_bouts, 1);
}

#[test]
fn test_processing_order_changes_result() {
    let day = |n: i64| reference_now() - Duration::days(30 - n);
    let chronological = vec![
        BoutBuilder::new("b1", "f-aldo", "f-nedo")
            .score(15, 0)
            .date(day(1))
            .build(),
        BoutBuilder::new("b2", "f-nedo", "f-ilona")
            .score(15, 5)
            .date(day(2))
            .build(),
        BoutBuilder::new("b3", "f-ilona", "f-aldo")
            .score(15, 14)
            .date(day(3))
            .build(),
    ];

    // Same results, but the last bout is dated first
    let mut reordered = chronological.clone();
    reordered[2].date = day(0);

    let first = calculate(&chronological);
    let second = calculate(&reordered);

    assert_ne!(
        entry(&first, "f-aldo").rating,
        entry(&second, "f-aldo").rating
    );
    assert_ne!(
        entry(&first, "f-ilona").points,
        entry(&second, "f-ilona").points
    );

    // Counts don't depend on order
    for id in ["f-aldo", "f-nedo", "f-ilona"] {
        assert_eq!(entry(&first, id).bouts, entry(&second, id).bouts);
        assert_eq!(entry(&first, id).wins, entry(&second, id).wins);
    }
}

#[test]
fn test_bout_exactly_twelve_months_old_earns_no_points() {
    let year_ago = Utc.with_ymd_and_hms(2023, 6, 1, 9, 0, 0).unwrap();
    let eleven_months = Utc.with_ymd_and_hms(2023, 7, 31, 9, 0, 0).unwrap();

    let expired = calculate(&[BoutBuilder::new("b1", "f-aldo", "f-nedo")
        .date(year_ago)
        .build()]);
    assert_eq!(entry(&expired, "f-aldo").points, 0.0);
    assert_eq!(entry(&expired, "f-nedo").points, 0.0);
    assert_eq!(entry(&expired, "f-aldo").rating, 1015.0);
    assert_eq!(entry(&expired, "f-aldo").bouts, 1);
    assert_eq!(entry(&expired, "f-ref").refereed_bouts, 1);

    let fading = calculate(&[BoutBuilder::new("b1", "f-aldo", "f-nedo")
        .date(eleven_months)
        .build()]);
    let aldo = entry(&fading, "f-aldo").points;
    assert!((aldo - 185.0 / 12.0).abs() < 1e-9);
}

#[test]
fn test_tie_credits_second_fencer() {
    let board = calculate(&[BoutBuilder::new("b1", "f-aldo", "f-nedo")
        .score(14, 14)
        .build()]);

    assert_eq!(entry(&board, "f-nedo").wins, 1);
    assert_eq!(entry(&board, "f-aldo").wins, 0);
    assert!(entry(&board, "f-nedo").rating > 1000.0);
    assert!(entry(&board, "f-aldo").rating < 1000.0);
}

#[test]
fn test_upset_earns_more_points_than_expected_win() {
    // Build Aldo up to a clear favourite first
    let mut history: Vec<_> = (0..5)
        .map(|i| {
            BoutBuilder::new(&format!("warmup{}", i), "f-aldo", "f-ilona")
                .score(15, 0)
                .days_ago(40 - i)
                .build()
        })
        .collect();

    let mut expected = history.clone();
    expected.push(
        BoutBuilder::new("final", "f-aldo", "f-nedo")
            .score(15, 10)
            .days_ago(1)
            .build(),
    );
    history.push(
        BoutBuilder::new("final", "f-nedo", "f-aldo")
            .score(15, 10)
            .days_ago(1)
            .build(),
    );

    let favourite_wins = calculate(&expected);
    let underdog_wins = calculate(&history);

    let favourite_gain = entry(&favourite_wins, "f-aldo").points
        - entry(&calculate(&expected[..5]), "f-aldo").points;
    let underdog_gain = entry(&underdog_wins, "f-nedo").points;
    assert!(underdog_gain > favourite_gain);
}

#[test]
fn test_bouts_against_removed_fencers_are_ignored() {
    let bouts = vec![
        BoutBuilder::new("b1", "f-aldo", "f-gone").build(),
        BoutBuilder::new("b2", "f-aldo", "f-nedo")
            .referee("f-gone")
            .build(),
    ];

    let board = calculate(&bouts);
    assert_eq!(entry(&board, "f-aldo").bouts, 1);
    assert_eq!(entry(&board, "f-aldo").rating, 1015.0);
    assert!(board.iter().all(|e| e.refereed_bouts == 0));
    assert_eq!(board.len(), 4);
}

fn open_club(dir: &std::path::Path) -> ClubRecords {
    ClubRecords::open(Arc::new(JsonFileStore::new(dir)))
}

fn draft(f1: &str, f2: &str, referee: &str, s1: u32, s2: u32) -> BoutDraft {
    BoutDraft {
        date: Utc::now(),
        fencer1_id: f1.to_string(),
        fencer2_id: f2.to_string(),
        referee_id: referee.to_string(),
        score1: s1,
        score2: s2,
    }
}

#[test]
fn test_cascade_delete_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let (aldo, nedo, ilona) = {
        let mut club = open_club(dir.path());
        let aldo = club.add_fencer("Aldo").unwrap().id;
        let nedo = club.add_fencer("Nedo").unwrap().id;
        let ilona = club.add_fencer("Ilona").unwrap().id;

        club.record_bout(Weapon::Epee, draft(&aldo, &nedo, &ilona, 15, 9))
            .unwrap();
        club.record_bout(Weapon::Foil, draft(&nedo, &ilona, &aldo, 15, 9))
            .unwrap();
        club.record_bout(Weapon::Sabre, draft(&ilona, &nedo, &nedo, 15, 9))
            .unwrap();
        (aldo, nedo, ilona)
    };

    {
        let mut club = open_club(dir.path());
        assert_eq!(club.all_bouts().len(), 3);
        assert_eq!(club.delete_fencer(&aldo).unwrap(), 2);
    }

    let club = open_club(dir.path());
    assert_eq!(club.fencers().len(), 2);
    assert!(club.bouts(Weapon::Epee).is_empty());
    assert!(club.bouts(Weapon::Foil).is_empty());
    assert_eq!(club.bouts(Weapon::Sabre).len(), 1);
    assert!(club
        .all_bouts()
        .get(Weapon::Sabre)
        .iter()
        .all(|b| !b.involves(&aldo)));

    let board = club.leaderboard(Weapon::Sabre, Utc::now());
    assert_eq!(board[0].id, ilona);
    assert_eq!(entry(&board, &nedo).refereed_bouts, 1);
}

#[test]
fn test_corrupt_data_files_fall_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("fencers.json"), "[{\"id\": 3").unwrap();
    std::fs::write(dir.path().join("bouts.json"), "not json at all").unwrap();

    let mut club = open_club(dir.path());
    assert!(club.fencers().is_empty());
    assert!(club.all_bouts().is_empty());

    club.add_fencer("Aldo").unwrap();
    let store = JsonFileStore::new(dir.path());
    let saved = store.read("fencers").unwrap().unwrap();
    assert!(saved.contains("Aldo"));
}

#[test]
fn test_stored_format_uses_weapon_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut club = open_club(dir.path());
    let a = club.add_fencer("A").unwrap().id;
    let b = club.add_fencer("B").unwrap().id;
    club.record_bout(Weapon::Foil, draft(&a, &b, &a, 15, 3)).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("bouts.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["Foil"][0]["score2"], 3);
    assert_eq!(json["Foil"][0]["refereeId"], a.as_str());
    assert!(json["Epee"].as_array().unwrap().is_empty());
}

#[test]
fn test_exports_from_club_records() {
    let dir = tempfile::tempdir().unwrap();
    let mut club = open_club(dir.path());
    let a = club.add_fencer("Aldo").unwrap().id;
    let b = club.add_fencer("Nedo").unwrap().id;
    club.record_bout(Weapon::Epee, draft(&a, &b, &b, 15, 10)).unwrap();

    let now = Utc::now();
    let board = export_leaderboard("Epee Leaderboard", &club.leaderboard(Weapon::Epee, now), now);
    let rows: Vec<Vec<&str>> = board
        .lines()
        .skip(4)
        .map(|line| line.split_whitespace().collect())
        .collect();
    assert_eq!(rows[0], vec!["1", "Aldo", "185", "1015", "1", "1", "0"]);
    assert_eq!(rows[1], vec!["2", "Nedo", "105", "985", "0", "1", "1"]);

    let utc = FixedOffset::east_opt(0).unwrap();
    let history = export_bout_history("History", club.all_bouts(), &club.fencer_names(), utc, now);
    assert!(history.contains("Aldo vs Nedo"));
    assert!(history.contains("Score: 15 - 10"));
    assert!(history.contains("Referee: Nedo"));
}
