//! Points table and net run rate.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::{Result, TournamentError};
use crate::innings::Scorecard;
use crate::TeamId;

pub const POINTS_FOR_WIN: u32 = 2;
pub const POINTS_FOR_TIE: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub points: u32,
    pub runs_for: u32,
    /// Fractional overs faced (balls / 6)
    pub overs_for: f64,
    pub runs_against: u32,
    /// Fractional overs bowled (balls / 6)
    pub overs_against: f64,
    #[serde(default)]
    pub nrr: f64,
}

impl StandingsEntry {
    pub fn tied(&self) -> u32 {
        self.played.saturating_sub(self.won + self.lost)
    }

    fn record_innings(&mut self, batting: &Scorecard, bowling: &Scorecard) {
        self.played += 1;
        self.runs_for += batting.runs;
        self.overs_for += batting.overs();
        self.runs_against += bowling.runs;
        self.overs_against += bowling.overs();
    }

    fn refresh_nrr(&mut self) {
        self.nrr =
            net_run_rate(self.runs_for, self.overs_for, self.runs_against, self.overs_against);
    }
}

/// Runs per over scored minus runs per over conceded, to 3 decimals.
///
/// Zero overs on either side yields 0.0 instead of dividing by zero.
pub fn net_run_rate(runs_for: u32, overs_for: f64, runs_against: u32, overs_against: f64) -> f64 {
    if overs_for == 0.0 || overs_against == 0.0 {
        return 0.0;
    }

    let rate_for = runs_for as f64 / overs_for;
    let rate_against = runs_against as f64 / overs_against;
    round3(rate_for - rate_against)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Strictly more runs wins; equal totals are a tie (`None`).
pub fn decide_winner(
    team1: &str,
    scorecard1: &Scorecard,
    team2: &str,
    scorecard2: &Scorecard,
) -> Option<TeamId> {
    match scorecard1.runs.cmp(&scorecard2.runs) {
        Ordering::Greater => Some(team1.to_string()),
        Ordering::Less => Some(team2.to_string()),
        Ordering::Equal => None,
    }
}

/// Table order: points desc, NRR desc, team name asc.
pub fn compare_rows(a: (&TeamId, &StandingsEntry), b: (&TeamId, &StandingsEntry)) -> Ordering {
    b.1.points
        .cmp(&a.1.points)
        .then_with(|| b.1.nrr.total_cmp(&a.1.nrr))
        .then_with(|| a.0.cmp(b.0))
}

/// Per-team statistics keyed by team identifier.
///
/// Never stored sorted; `rank` derives the table order on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Standings {
    entries: BTreeMap<TeamId, StandingsEntry>,
}

impl Standings {
    /// One zeroed entry per team.
    pub fn new(teams: &[TeamId]) -> Self {
        Self {
            entries: teams.iter().map(|t| (t.clone(), StandingsEntry::default())).collect(),
        }
    }

    pub fn get(&self, team: &str) -> Option<&StandingsEntry> {
        self.entries.get(team)
    }

    pub fn contains(&self, team: &str) -> bool {
        self.entries.contains_key(team)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TeamId, &StandingsEntry)> {
        self.entries.iter()
    }

    pub fn total_played(&self) -> u32 {
        self.entries.values().map(|e| e.played).sum()
    }

    /// Fold one completed match into the table.
    ///
    /// Both teams must already have entries; otherwise nothing changes.
    pub fn apply_result(
        &mut self,
        team1: &str,
        scorecard1: &Scorecard,
        team2: &str,
        scorecard2: &Scorecard,
    ) -> Result<()> {
        for team in [team1, team2] {
            if !self.entries.contains_key(team) {
                return Err(TournamentError::UnknownTeam(team.to_string()));
            }
        }

        if let Some(entry) = self.entries.get_mut(team1) {
            entry.record_innings(scorecard1, scorecard2);
        }
        if let Some(entry) = self.entries.get_mut(team2) {
            entry.record_innings(scorecard2, scorecard1);
        }

        match decide_winner(team1, scorecard1, team2, scorecard2) {
            Some(winner) => {
                let loser = if winner == team1 { team2 } else { team1 };
                if let Some(entry) = self.entries.get_mut(&winner) {
                    entry.won += 1;
                    entry.points += POINTS_FOR_WIN;
                }
                if let Some(entry) = self.entries.get_mut(loser) {
                    entry.lost += 1;
                }
            }
            None => {
                for team in [team1, team2] {
                    if let Some(entry) = self.entries.get_mut(team) {
                        entry.points += POINTS_FOR_TIE;
                    }
                }
            }
        }

        self.entries.values_mut().for_each(StandingsEntry::refresh_nrr);
        Ok(())
    }

    /// Rows in table order.
    pub fn rank(&self) -> Vec<(TeamId, StandingsEntry)> {
        let mut rows: Vec<_> = self.entries.iter().collect();
        rows.sort_by(|a, b| compare_rows(*a, *b));
        rows.into_iter().map(|(team, entry)| (team.clone(), entry.clone())).collect()
    }
}
