// Flat-file persistence for tournament state
// Four pretty-printed JSON files, each written atomically

pub mod error;
pub mod manager;

pub use error::StoreError;
pub use manager::TournamentStore;

pub const CONFIG_FILE: &str = "tournament_config.json";
pub const SCHEDULE_FILE: &str = "match_schedule.json";
pub const RESULTS_FILE: &str = "match_results.json";
pub const POINTS_TABLE_FILE: &str = "points_table.json";

/// Every file the store owns, in write order.
pub const ALL_FILES: [&str; 4] = [CONFIG_FILE, SCHEDULE_FILE, RESULTS_FILE, POINTS_TABLE_FILE];
