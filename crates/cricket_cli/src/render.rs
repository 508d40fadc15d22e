//! Plain-text rendering for terminal output.

use cricket_core::{Fixture, MatchResult, PointsTable, Scorecard, SetupSummary, TournamentStatus};
use std::fmt::Write;

pub fn setup_summary(summary: &SetupSummary) -> String {
    format!(
        "Tournament '{}' set up: {} teams, {} overs per innings, {} fixtures",
        summary.name,
        summary.teams.len(),
        summary.overs,
        summary.fixtures
    )
}

pub fn status(status: &TournamentStatus) -> String {
    match &status.name {
        Some(name) if status.is_setup => format!(
            "{name}: {:?} ({} played, {} remaining)",
            status.phase, status.matches_played, status.matches_remaining
        ),
        _ => "No tournament set up.".to_string(),
    }
}

pub fn fixtures(fixtures: &[Fixture]) -> String {
    if fixtures.is_empty() {
        return "No fixtures remaining.".to_string();
    }

    fixtures
        .iter()
        .enumerate()
        .map(|(i, fixture)| format!("{:>3}. {}", i + 1, fixture))
        .collect::<Vec<_>>()
        .join("\n")
}

fn innings_line(team: &str, scorecard: &Scorecard) -> String {
    let extras = &scorecard.extras;
    format!(
        "  {:<20} {:>12}  RR {:.2}  4s {} 6s {}  extras {} (w {}, nb {}, b {}, lb {})",
        team,
        scorecard.summary(),
        scorecard.run_rate(),
        scorecard.breakdown.fours,
        scorecard.breakdown.sixes,
        extras.total(),
        extras.wides,
        extras.noballs,
        extras.byes,
        extras.legbyes
    )
}

pub fn match_result(result: &MatchResult) -> String {
    let mut out = format!("Match {}: {} vs {}\n", result.match_number, result.team1, result.team2);
    out.push_str(&innings_line(&result.team1, &result.scorecard1));
    out.push('\n');
    out.push_str(&innings_line(&result.team2, &result.scorecard2));
    out.push('\n');
    out.push_str(&format!("  {}", result.headline()));
    out
}

pub fn points_table(table: &PointsTable) -> String {
    let mut out = format!("{} ({} overs)\n", table.tournament_name, table.overs);
    let _ = writeln!(
        out,
        "{:<4}{:<20}{:>4}{:>4}{:>4}{:>4}{:>5}{:>9}",
        "#", "Team", "P", "W", "L", "T", "Pts", "NRR"
    );

    for (rank, (team, entry)) in table.table.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4}{:<20}{:>4}{:>4}{:>4}{:>4}{:>5}{:>+9.3}",
            rank + 1,
            team,
            entry.played,
            entry.won,
            entry.lost,
            entry.tied(),
            entry.points,
            entry.nrr
        );
    }

    out.trim_end().to_string()
}
