//! Tournament state
//!
//! `TournamentState` owns everything one tournament needs between requests:
//! its config, the fixtures still to play, the points table and the result
//! log. The store loads it at the start of a request and saves it at the end.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::config::TournamentConfig;
use crate::error::{Result, TournamentError};
use crate::innings::{simulate_innings, Scorecard};
use crate::schedule::{generate_schedule, Fixture};
use crate::standings::{decide_winner, Standings, StandingsEntry};
use crate::TeamId;

/// One completed match, appended to the result log and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 1-based position in the result log
    #[serde(default)]
    pub match_number: u32,
    pub team1: TeamId,
    pub scorecard1: Scorecard,
    pub team2: TeamId,
    pub scorecard2: Scorecard,
    /// `None` for a tie
    pub winner: Option<TeamId>,
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
}

impl MatchResult {
    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }

    /// Winning margin in runs, 0 for a tie.
    pub fn margin(&self) -> u32 {
        self.scorecard1.runs.abs_diff(self.scorecard2.runs)
    }

    pub fn headline(&self) -> String {
        match &self.winner {
            Some(winner) => format!("{winner} won by {} runs", self.margin()),
            None => "Match tied".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    /// Nothing persisted
    Unset,
    /// Set up, no match played yet
    Configured,
    /// Some matches played, fixtures remain
    InProgress,
    /// Schedule exhausted
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TournamentState {
    pub config: TournamentConfig,
    pub schedule: VecDeque<Fixture>,
    pub standings: Standings,
    pub results: Vec<MatchResult>,
}

impl TournamentState {
    /// Fresh tournament: full round-robin, zeroed table, empty log.
    pub fn setup(config: TournamentConfig) -> Self {
        let schedule: VecDeque<Fixture> = generate_schedule(&config.teams).into();
        let standings = Standings::new(&config.teams);

        log::info!(
            "Tournament '{}' set up: {} teams, {} overs, {} fixtures",
            config.name,
            config.teams.len(),
            config.overs,
            schedule.len()
        );

        Self { config, schedule, standings, results: Vec::new() }
    }

    pub fn phase(&self) -> TournamentPhase {
        if self.schedule.is_empty() {
            TournamentPhase::Complete
        } else if self.results.is_empty() {
            TournamentPhase::Configured
        } else {
            TournamentPhase::InProgress
        }
    }

    pub fn remaining(&self) -> usize {
        self.schedule.len()
    }

    pub fn next_fixture(&self) -> Option<&Fixture> {
        self.schedule.front()
    }

    /// Play the next fixture: two innings, winner, table update, log entry.
    pub fn simulate_next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<MatchResult> {
        let fixture = self.next_fixture().cloned().ok_or(TournamentError::NoMatchesRemaining)?;

        let scorecard1 = simulate_innings(self.config.overs, rng);
        let scorecard2 = simulate_innings(self.config.overs, rng);

        self.standings.apply_result(fixture.team1(), &scorecard1, fixture.team2(), &scorecard2)?;
        self.schedule.pop_front();

        let winner = decide_winner(fixture.team1(), &scorecard1, fixture.team2(), &scorecard2);
        let Fixture(team1, team2) = fixture;
        let result = MatchResult {
            match_number: self.results.len() as u32 + 1,
            team1,
            scorecard1,
            team2,
            scorecard2,
            winner,
            played_at: Some(Utc::now()),
        };

        log::info!(
            "Match {}: {} {} v {} {} - {}",
            result.match_number,
            result.team1,
            result.scorecard1.summary(),
            result.team2,
            result.scorecard2.summary(),
            result.headline()
        );

        self.results.push(result.clone());
        Ok(result)
    }

    pub fn ranked_standings(&self) -> Vec<(TeamId, StandingsEntry)> {
        self.standings.rank()
    }

    /// Structural checks run on every load.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        self.config.validate().map_err(|e| e.to_string())?;

        if self.standings.len() != self.config.teams.len() {
            return Err(format!(
                "points table has {} teams, config has {}",
                self.standings.len(),
                self.config.teams.len()
            ));
        }

        if let Some(missing) = self.config.teams.iter().find(|t| !self.standings.contains(t)) {
            return Err(format!("team '{missing}' missing from points table"));
        }

        if let Some((team, entry)) =
            self.standings.iter().find(|(_, e)| e.won + e.lost > e.played)
        {
            return Err(format!(
                "team '{team}' has {} wins and {} losses in {} matches",
                entry.won, entry.lost, entry.played
            ));
        }

        let played = self.standings.total_played() as usize;
        if played != 2 * self.results.len() {
            return Err(format!(
                "points table records {played} appearances for {} results",
                self.results.len()
            ));
        }

        if let Some(stray) = self
            .schedule
            .iter()
            .find(|f| !self.standings.contains(f.team1()) || !self.standings.contains(f.team2()))
        {
            return Err(format!("fixture '{stray}' names a team outside the tournament"));
        }

        // Played and pending fixtures together cover each pairing at most once
        let fixtures: Vec<Fixture> = self
            .results
            .iter()
            .map(|r| Fixture::new(r.team1.clone(), r.team2.clone()))
            .chain(self.schedule.iter().cloned())
            .collect();
        for (i, fixture) in fixtures.iter().enumerate() {
            if fixture.team1() == fixture.team2() {
                return Err(format!("fixture '{fixture}' pairs a team with itself"));
            }
            if fixtures[i + 1..].iter().any(|other| fixture.same_pairing(other)) {
                return Err(format!("fixture '{fixture}' appears more than once"));
            }
        }

        Ok(())
    }
}
