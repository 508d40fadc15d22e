//! # cricket_core - Round-Robin Cricket Tournament Engine
//!
//! Runs a single round-robin limited-overs tournament:
//! circle-method fixtures, randomised ball-by-ball innings, and a points
//! table ranked by points then net run rate.
//!
//! ## Features
//! - Deterministic when seeded (same seed = same tournament)
//! - Flat JSON persistence, one file per piece of state
//! - JSON API envelopes for hosting behind any transport

pub mod api;
pub mod config;
pub mod error;
pub mod innings;
pub mod schedule;
pub mod service;
pub mod standings;
pub mod store;
pub mod tournament;


/// Opaque team identifier, unique within a tournament.
pub type TeamId = String;

// Re-export main API functions
pub use api::{
    points_table_json, reset_json, results_json, schedule_json, setup_json, simulate_next_json,
    status_json, ApiError, ApiResponse,
};
pub use config::{ServiceConfig, TournamentConfig};
pub use error::{Result, TournamentError};
pub use innings::{simulate_innings, BallOutcome, OutcomeTable, Scorecard};
pub use schedule::{generate_schedule, Fixture};
pub use service::{PointsTable, SetupRequest, SetupSummary, TournamentService, TournamentStatus};
pub use standings::{net_run_rate, Standings, StandingsEntry};
pub use store::{StoreError, TournamentStore};
pub use tournament::{MatchResult, TournamentPhase, TournamentState};
