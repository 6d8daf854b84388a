//! Plain-text reports for leaderboards and bout history

use crate::types::{Bout, BoutsByWeapon, LeaderboardEntry, Weapon};
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::HashMap;
use std::fmt::Write;

/// Rule printed after every bout in a history report
pub const BOUT_RULE: &str = "----------------------------------------";

const UNKNOWN_FENCER: &str = "Unknown";

/// Narrowest Name column; widened to fit the longest name plus a gap
const NAME_COLUMN_WIDTH: usize = 24;

fn write_heading(out: &mut String, title: &str, exported_at: DateTime<Utc>) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(
        out,
        "Exported: {}",
        exported_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

fn leaderboard_row(out: &mut String, rank: &str, name: &str, width: usize, cells: [&str; 5]) {
    let _ = writeln!(
        out,
        "{:<6}{:<width$}{:>8}{:>8}{:>6}{:>7}{:>7}",
        rank,
        name,
        cells[0],
        cells[1],
        cells[2],
        cells[3],
        cells[4],
        width = width
    );
}

/// Render a computed leaderboard as a fixed-width table
pub fn export_leaderboard(
    title: &str,
    entries: &[LeaderboardEntry],
    exported_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    write_heading(&mut out, title, exported_at);

    let name_width = entries
        .iter()
        .map(|entry| entry.name.chars().count() + 2)
        .fold(NAME_COLUMN_WIDTH, usize::max);

    leaderboard_row(
        &mut out,
        "Rank",
        "Name",
        name_width,
        ["Points", "Rating", "Wins", "Bouts", "Ref'd"],
    );

    for (position, entry) in entries.iter().enumerate() {
        let points = (entry.points.round() as i64).to_string();
        let rating = (entry.rating.round() as i64).to_string();
        leaderboard_row(
            &mut out,
            &(position + 1).to_string(),
            &entry.name,
            name_width,
            [
                points.as_str(),
                rating.as_str(),
                entry.wins.to_string().as_str(),
                entry.bouts.to_string().as_str(),
                entry.refereed_bouts.to_string().as_str(),
            ],
        );
    }

    out
}

fn write_bout(
    out: &mut String,
    bout: &Bout,
    names: &HashMap<String, String>,
    offset: FixedOffset,
) {
    let name = |id: &str| {
        names
            .get(id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_FENCER)
            .to_string()
    };

    let _ = writeln!(
        out,
        "Date: {}",
        bout.date.with_timezone(&offset).format("%Y-%m-%d")
    );
    let _ = writeln!(
        out,
        "{} vs {}",
        name(bout.fencer1_id.as_str()),
        name(bout.fencer2_id.as_str())
    );
    let _ = writeln!(out, "Score: {} - {}", bout.score1, bout.score2);
    let _ = writeln!(out, "Referee: {}", name(bout.referee_id.as_str()));
    let _ = writeln!(out, "{}", BOUT_RULE);
}

/// Render every weapon's bouts, newest first within each weapon.
///
/// Bout dates are shown as calendar dates at `offset`.
pub fn export_bout_history(
    title: &str,
    bouts: &BoutsByWeapon,
    names: &HashMap<String, String>,
    offset: FixedOffset,
    exported_at: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    write_heading(&mut out, title, exported_at);

    for weapon in Weapon::ALL {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", weapon.to_string().to_uppercase());
        let _ = writeln!(out);

        let mut list: Vec<&Bout> = bouts.get(weapon).iter().collect();
        if list.is_empty() {
            let _ = writeln!(out, "No bouts recorded.");
            continue;
        }

        list.sort_by(|a, b| b.date.cmp(&a.date));
        for bout in list {
            write_bout(&mut out, bout, names, offset);
        }
    }

    out
}
