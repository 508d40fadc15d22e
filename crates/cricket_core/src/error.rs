use thiserror::Error;

use crate::store::StoreError;

pub mod error_codes {
    pub const NOT_CONFIGURED: &str = "NOT_CONFIGURED";
    pub const NO_MATCHES_REMAINING: &str = "NO_MATCHES_REMAINING";
    pub const INVALID_CONFIG: &str = "INVALID_CONFIG";
    pub const UNKNOWN_TEAM: &str = "UNKNOWN_TEAM";
    pub const STORAGE_FAILURE: &str = "STORAGE_FAILURE";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
}

#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("No tournament has been set up")]
    NotConfigured,

    #[error("No matches left in the schedule")]
    NoMatchesRemaining,

    #[error("Invalid tournament config: {0}")]
    InvalidConfig(String),

    #[error("Team not in points table: {0}")]
    UnknownTeam(String),

    #[error("Storage failure: {0}")]
    Store(#[from] StoreError),
}

impl TournamentError {
    /// Stable machine-readable code for API envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            TournamentError::NotConfigured => error_codes::NOT_CONFIGURED,
            TournamentError::NoMatchesRemaining => error_codes::NO_MATCHES_REMAINING,
            TournamentError::InvalidConfig(_) => error_codes::INVALID_CONFIG,
            TournamentError::UnknownTeam(_) => error_codes::UNKNOWN_TEAM,
            TournamentError::Store(_) => error_codes::STORAGE_FAILURE,
        }
    }

    /// Whether the caller can fix the failure by changing its request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, TournamentError::Store(_) | TournamentError::UnknownTeam(_))
    }
}

pub type Result<T> = std::result::Result<T, TournamentError>;
