use super::error::StoreError;
use super::{ALL_FILES, CONFIG_FILE, POINTS_TABLE_FILE, RESULTS_FILE, SCHEDULE_FILE};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::VecDeque;
use std::fs::{self, remove_file, rename, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::TournamentConfig;
use crate::schedule::Fixture;
use crate::standings::Standings;
use crate::tournament::{MatchResult, TournamentState};

/// Owns the tournament files inside one data directory.
#[derive(Debug, Clone)]
pub struct TournamentStore {
    data_dir: PathBuf,
}

impl TournamentStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// A tournament exists once its config file does.
    pub fn is_configured(&self) -> bool {
        self.path(CONFIG_FILE).exists()
    }

    /// Load the full state, or `None` when no tournament has been set up.
    pub fn load(&self) -> Result<Option<TournamentState>, StoreError> {
        let Some(config) = self.read_optional::<TournamentConfig>(CONFIG_FILE)? else {
            return Ok(None);
        };

        let schedule: VecDeque<Fixture> = self.read_required(SCHEDULE_FILE)?;
        let standings: Standings = self.read_required(POINTS_TABLE_FILE)?;
        let results: Vec<MatchResult> = self.read_required(RESULTS_FILE)?;

        let state = TournamentState { config, schedule, standings, results };
        state.check_invariants().map_err(StoreError::Inconsistent)?;

        log::debug!(
            "Loaded tournament '{}' from {:?} ({} fixtures left, {} results)",
            state.config.name,
            self.data_dir,
            state.schedule.len(),
            state.results.len()
        );
        Ok(Some(state))
    }

    /// Write all four files. Each file is replaced atomically; the set is not.
    pub fn save(&self, state: &TournamentState) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)?;

        self.write_json(CONFIG_FILE, &state.config)?;
        self.write_json(SCHEDULE_FILE, &state.schedule)?;
        self.write_json(RESULTS_FILE, &state.results)?;
        self.write_json(POINTS_TABLE_FILE, &state.standings)?;

        log::debug!("Saved tournament '{}' to {:?}", state.config.name, self.data_dir);
        Ok(())
    }

    /// Remove every tournament file that exists. Missing files are fine.
    pub fn clear(&self) -> Result<usize, StoreError> {
        let mut removed = 0;

        for name in ALL_FILES {
            match remove_file(self.path(name)) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::Io(e)),
            }
        }

        if removed > 0 {
            log::info!("Removed {} tournament files from {:?}", removed, self.data_dir);
        }
        Ok(removed)
    }

    // Private helper methods

    fn path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    fn read_optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StoreError> {
        let path = self.path(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Json { path: path.display().to_string(), source })
    }

    fn read_required<T: DeserializeOwned>(&self, name: &str) -> Result<T, StoreError> {
        self.read_optional(name)?
            .ok_or_else(|| StoreError::FileNotFound { path: self.path(name).display().to_string() })
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path(name);
        let data = serde_json::to_vec_pretty(value)
            .map_err(|source| StoreError::Json { path: path.display().to_string(), source })?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }

        rename(&temp_path, &path)?;

        log::debug!("Wrote {} bytes to {:?}", data.len(), path);
        Ok(())
    }
}
