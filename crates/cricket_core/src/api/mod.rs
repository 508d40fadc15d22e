pub mod tournament_json;

pub use tournament_json::{
    points_table_json, reset_json, results_json, schedule_json, setup_json, simulate_next_json,
    status_json, ApiError, ApiResponse, Message, API_VERSION,
};
