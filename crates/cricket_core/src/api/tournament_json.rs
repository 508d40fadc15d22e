//! JSON API for tournament operations
//!
//! Each function takes the request as a JSON string (where one is needed)
//! and returns an `ApiResponse` envelope as a JSON string, so any transport
//! can host the endpoints without touching the domain types.

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{error_codes, TournamentError};
use crate::schedule::Fixture;
use crate::service::{PointsTable, SetupRequest, SetupSummary, TournamentService};
use crate::tournament::MatchResult;
use crate::TeamId;

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string() }
    }
}

impl From<&TournamentError> for ApiError {
    fn from(err: &TournamentError) -> Self {
        Self::new(err.code(), &err.to_string())
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

/// Setup payload as sent by clients. `overs` may arrive as a number or a
/// numeric string.
#[derive(Debug, Deserialize)]
struct SetupPayload {
    name: String,
    overs: OversValue,
    teams: Vec<TeamId>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OversValue {
    Number(i64),
    Text(String),
}

impl OversValue {
    fn parse(&self) -> Result<u32, String> {
        let raw = match self {
            OversValue::Number(n) => *n,
            OversValue::Text(s) => {
                s.trim().parse::<i64>().map_err(|_| format!("overs '{s}' is not a number"))?
            }
        };
        if raw < 1 {
            return Err(format!("overs per innings must be at least 1, got {raw}"));
        }
        u32::try_from(raw).map_err(|_| format!("overs {raw} is too large"))
    }
}

fn to_json<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        error!("Failed to serialise API response: {}", e);
        "{}".to_string()
    })
}

fn respond<T: Serialize>(operation: &str, result: Result<T, TournamentError>) -> String {
    match result {
        Ok(data) => to_json(&ApiResponse::success(data)),
        Err(err) => {
            if err.is_client_error() {
                warn!("{} rejected: {}", operation, err);
            } else {
                error!("{} failed: {}", operation, err);
            }
            to_json::<T>(&ApiResponse::error(ApiError::from(&err)))
        }
    }
}

fn invalid_request<T: Serialize>(message: String) -> String {
    warn!("Invalid request: {}", message);
    to_json::<T>(&ApiResponse::error(ApiError::new(error_codes::INVALID_REQUEST, &message)))
}

/// Returns JSON string containing ApiResponse<TournamentStatus>
pub fn status_json(service: &TournamentService) -> String {
    respond("status", service.status())
}

/// Set up a tournament from a JSON string `{ "name", "overs", "teams" }`.
///
/// Returns JSON string containing ApiResponse<SetupSummary>
pub fn setup_json(service: &mut TournamentService, request_json: &str) -> String {
    info!("Processing tournament setup request");

    let payload: SetupPayload = match serde_json::from_str(request_json) {
        Ok(payload) => payload,
        Err(e) => return invalid_request::<SetupSummary>(format!("Invalid JSON format: {e}")),
    };

    let overs = match payload.overs.parse() {
        Ok(overs) => overs,
        Err(message) => {
            let err = TournamentError::InvalidConfig(message);
            return respond::<SetupSummary>("setup", Err(err));
        }
    };

    let request = SetupRequest { name: payload.name, overs, teams: payload.teams };
    respond("setup", service.setup(request))
}

/// Returns JSON string containing ApiResponse<Vec<Fixture>>
pub fn schedule_json(service: &TournamentService) -> String {
    respond::<Vec<Fixture>>("schedule", service.schedule())
}

/// Returns JSON string containing ApiResponse<MatchResult>
pub fn simulate_next_json(service: &mut TournamentService) -> String {
    respond::<MatchResult>("simulate_next", service.simulate_next())
}

/// Returns JSON string containing ApiResponse<PointsTable>
pub fn points_table_json(service: &TournamentService) -> String {
    respond::<PointsTable>("points_table", service.points_table())
}

/// Returns JSON string containing ApiResponse<Vec<MatchResult>>
pub fn results_json(service: &TournamentService) -> String {
    respond::<Vec<MatchResult>>("results", service.results())
}

/// Returns JSON string containing ApiResponse<Message>
pub fn reset_json(service: &mut TournamentService) -> String {
    let result = service
        .reset()
        .map(|()| Message { message: "System has been reset successfully.".to_string() });
    respond("reset", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use crate::service::TournamentStatus;
    use serde_json::Value;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> TournamentService {
        TournamentService::new(ServiceConfig::new(dir.path()).with_seed(1))
    }

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_status_envelope() {
        let dir = TempDir::new().unwrap();
        let response: ApiResponse<TournamentStatus> =
            serde_json::from_str(&status_json(&service(&dir))).unwrap();

        assert!(response.success);
        assert_eq!(response.schema_version, API_VERSION);
        assert!(!response.data.unwrap().is_setup);
    }

    #[test]
    fn test_setup_accepts_string_overs() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(&dir);

        let value =
            parse(&setup_json(&mut svc, r#"{"name":"Cup","overs":"5","teams":["A","B","C"]}"#));
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["overs"], 5);
        assert_eq!(value["data"]["fixtures"], 3);
    }

    #[test]
    fn test_setup_rejects_bad_input() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(&dir);

        let value = parse(&setup_json(&mut svc, "not json"));
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], error_codes::INVALID_REQUEST);

        let value = parse(&setup_json(&mut svc, r#"{"name":"Cup","overs":0,"teams":["A","B"]}"#));
        assert_eq!(value["error"]["code"], error_codes::INVALID_CONFIG);

        let value = parse(&setup_json(&mut svc, r#"{"name":"Cup","overs":5,"teams":["A"]}"#));
        assert_eq!(value["error"]["code"], error_codes::INVALID_CONFIG);
    }

    #[test]
    fn test_setup_rejects_oversized_innings() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(&dir);

        let request = r#"{"name":"Cup","overs":1000000000,"teams":["A","B"]}"#;
        let value = parse(&setup_json(&mut svc, request));
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], error_codes::INVALID_CONFIG);

        let value = parse(&simulate_next_json(&mut svc));
        assert_eq!(value["error"]["code"], error_codes::NOT_CONFIGURED);
    }

    #[test]
    fn test_simulate_reports_structured_errors() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(&dir);

        let value = parse(&simulate_next_json(&mut svc));
        assert_eq!(value["error"]["code"], error_codes::NOT_CONFIGURED);

        setup_json(&mut svc, r#"{"name":"Cup","overs":2,"teams":["A","B"]}"#);
        let value = parse(&simulate_next_json(&mut svc));
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["team1"], "A");
        assert_eq!(value["data"]["team2"], "B");

        let value = parse(&simulate_next_json(&mut svc));
        assert_eq!(value["error"]["code"], error_codes::NO_MATCHES_REMAINING);
    }

    #[test]
    fn test_points_table_rows_are_pairs() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(&dir);
        setup_json(&mut svc, r#"{"name":"Cup","overs":2,"teams":["B","A"]}"#);

        let value = parse(&points_table_json(&svc));
        assert_eq!(value["data"]["tournament_name"], "Cup");
        let rows = value["data"]["table"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        // Nothing played yet: name order breaks the tie
        assert_eq!(rows[0][0], "A");
        assert_eq!(rows[0][1]["points"], 0);
    }

    #[test]
    fn test_reset_twice_is_safe() {
        let dir = TempDir::new().unwrap();
        let mut svc = service(&dir);
        setup_json(&mut svc, r#"{"name":"Cup","overs":2,"teams":["A","B"]}"#);

        assert_eq!(parse(&reset_json(&mut svc))["success"], true);
        assert_eq!(parse(&reset_json(&mut svc))["success"], true);
        assert_eq!(parse(&status_json(&svc))["data"]["is_setup"], false);
        assert_eq!(parse(&results_json(&svc))["error"]["code"], error_codes::NOT_CONFIGURED);
        assert_eq!(parse(&schedule_json(&svc))["error"]["code"], error_codes::NOT_CONFIGURED);
    }
}
