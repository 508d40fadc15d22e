//! Tournament and service configuration.
//!
//! `TournamentConfig` is the immutable description of one tournament and is
//! persisted alongside its state. `ServiceConfig` tells the orchestration
//! layer where that state lives and how to seed the simulator.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use crate::error::{Result, TournamentError};
use crate::TeamId;

pub const DATA_DIR_ENV: &str = "CRICKET_DATA_DIR";
pub const SEED_ENV: &str = "CRICKET_SEED";
pub const DEFAULT_DATA_DIR: &str = "data";

/// Minimum number of teams for a round-robin.
pub const MIN_TEAMS: usize = 2;

/// Longest innings accepted, matching a one-day international.
pub const MAX_OVERS: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub name: String,
    /// Overs per innings
    pub overs: u32,
    /// Team identifiers in setup order
    pub teams: Vec<TeamId>,
}

impl TournamentConfig {
    /// Build a validated config. Names are trimmed before checks.
    pub fn new(name: &str, overs: u32, teams: &[String]) -> Result<Self> {
        let config = Self {
            name: name.trim().to_string(),
            overs,
            teams: teams.iter().map(|t| t.trim().to_string()).collect(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(TournamentError::InvalidConfig("tournament name is empty".to_string()));
        }

        if self.overs == 0 {
            return Err(TournamentError::InvalidConfig(
                "overs per innings must be at least 1".to_string(),
            ));
        }

        if self.overs > MAX_OVERS {
            return Err(TournamentError::InvalidConfig(format!(
                "overs per innings must be at most {MAX_OVERS}, got {}",
                self.overs
            )));
        }

        if self.teams.len() < MIN_TEAMS {
            return Err(TournamentError::InvalidConfig(format!(
                "need at least {MIN_TEAMS} teams, got {}",
                self.teams.len()
            )));
        }

        let mut seen = HashSet::new();
        for team in &self.teams {
            if team.is_empty() {
                return Err(TournamentError::InvalidConfig("team name is empty".to_string()));
            }
            if !seen.insert(team.as_str()) {
                return Err(TournamentError::InvalidConfig(format!("duplicate team '{team}'")));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Directory holding the tournament JSON files
    pub data_dir: PathBuf,
    /// Fixed simulator seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from(DEFAULT_DATA_DIR), seed: None }
    }
}

impl ServiceConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Read `CRICKET_DATA_DIR` and `CRICKET_SEED`, falling back to defaults.
    ///
    /// An explicit `data_dir` or `seed` wins, and the matching variable is
    /// never read, so a malformed `CRICKET_SEED` cannot block `--seed`.
    pub fn from_env_with_overrides(data_dir: Option<PathBuf>, seed: Option<u64>) -> Result<Self> {
        Self::resolve(|key| env::var(key).ok(), data_dir, seed)
    }

    fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        data_dir: Option<PathBuf>,
        seed: Option<u64>,
    ) -> Result<Self> {
        let mut config = Self::default();

        match data_dir {
            Some(dir) => config.data_dir = dir,
            None => {
                if let Some(dir) = lookup(DATA_DIR_ENV) {
                    let dir = dir.trim();
                    if !dir.is_empty() {
                        config.data_dir = PathBuf::from(dir);
                    }
                }
            }
        }

        config.seed = match seed {
            Some(seed) => Some(seed),
            None => match lookup(SEED_ENV) {
                Some(raw) => parse_seed(&raw)?,
                None => None,
            },
        };

        Ok(config)
    }
}

fn parse_seed(raw: &str) -> Result<Option<u64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<u64>().map(Some).map_err(|e| {
        TournamentError::InvalidConfig(format!("{SEED_ENV}='{raw}' is not a valid seed: {e}"))
    })
}
