//! Request-level orchestration.
//!
//! Every operation loads state from the store, runs the pure logic and saves
//! the result back. Mutating operations take `&mut self`, so a single owner
//! serialises the pop-fixture-then-update-table sequence.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ServiceConfig, TournamentConfig};
use crate::error::{Result, TournamentError};
use crate::schedule::Fixture;
use crate::standings::StandingsEntry;
use crate::store::TournamentStore;
use crate::tournament::{MatchResult, TournamentPhase, TournamentState};
use crate::TeamId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupRequest {
    pub name: String,
    pub overs: u32,
    pub teams: Vec<TeamId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupSummary {
    pub name: String,
    pub overs: u32,
    pub teams: Vec<TeamId>,
    pub fixtures: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentStatus {
    pub is_setup: bool,
    pub name: Option<String>,
    pub phase: TournamentPhase,
    pub matches_played: usize,
    pub matches_remaining: usize,
}

impl TournamentStatus {
    fn unset() -> Self {
        Self {
            is_setup: false,
            name: None,
            phase: TournamentPhase::Unset,
            matches_played: 0,
            matches_remaining: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsTable {
    pub tournament_name: String,
    pub overs: u32,
    /// Ranked rows as `[team, entry]` pairs
    pub table: Vec<(TeamId, StandingsEntry)>,
}

pub struct TournamentService {
    store: TournamentStore,
    rng: ChaCha8Rng,
}

impl TournamentService {
    pub fn new(config: ServiceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { store: TournamentStore::new(config.data_dir), rng }
    }

    pub fn store(&self) -> &TournamentStore {
        &self.store
    }

    pub fn status(&self) -> Result<TournamentStatus> {
        let Some(state) = self.store.load()? else {
            return Ok(TournamentStatus::unset());
        };

        Ok(TournamentStatus {
            is_setup: true,
            name: Some(state.config.name.clone()),
            phase: state.phase(),
            matches_played: state.results.len(),
            matches_remaining: state.remaining(),
        })
    }

    /// Start a new tournament, replacing any existing one.
    pub fn setup(&mut self, request: SetupRequest) -> Result<SetupSummary> {
        let config = TournamentConfig::new(&request.name, request.overs, &request.teams)?;

        if self.store.is_configured() {
            log::warn!("Replacing existing tournament in {:?}", self.store.data_dir());
        }

        let state = TournamentState::setup(config);
        self.store.save(&state)?;

        Ok(SetupSummary {
            name: state.config.name.clone(),
            overs: state.config.overs,
            teams: state.config.teams.clone(),
            fixtures: state.remaining(),
        })
    }

    /// Fixtures still to be played, in playing order.
    pub fn schedule(&self) -> Result<Vec<Fixture>> {
        let state = self.load_configured()?;
        Ok(state.schedule.into_iter().collect())
    }

    pub fn simulate_next(&mut self) -> Result<MatchResult> {
        let mut state = self.load_configured()?;
        let result = state.simulate_next(&mut self.rng)?;
        self.store.save(&state)?;

        if state.phase() == TournamentPhase::Complete {
            log::info!("Tournament '{}' complete after {} matches", state.config.name, result.match_number);
        }
        Ok(result)
    }

    /// Simulate up to `count` matches, stopping early when the schedule runs out.
    pub fn simulate_many(&mut self, count: usize) -> Result<Vec<MatchResult>> {
        let mut state = self.load_configured()?;
        if state.remaining() == 0 {
            return Err(TournamentError::NoMatchesRemaining);
        }

        let mut played = Vec::new();
        while played.len() < count && state.remaining() > 0 {
            played.push(state.simulate_next(&mut self.rng)?);
        }

        self.store.save(&state)?;
        Ok(played)
    }

    pub fn points_table(&self) -> Result<PointsTable> {
        let state = self.load_configured()?;
        Ok(PointsTable {
            table: state.ranked_standings(),
            tournament_name: state.config.name,
            overs: state.config.overs,
        })
    }

    pub fn results(&self) -> Result<Vec<MatchResult>> {
        Ok(self.load_configured()?.results)
    }

    /// Discard all tournament data. Safe to call when nothing exists.
    pub fn reset(&mut self) -> Result<()> {
        let removed = self.store.clear()?;
        log::info!("Tournament reset ({} files removed)", removed);
        Ok(())
    }

    fn load_configured(&self) -> Result<TournamentState> {
        self.store.load()?.ok_or(TournamentError::NotConfigured)
    }
}
