//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::planner::RankedStop;

/// Request to search for still-reachable stations.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Start station id or display name.
    pub start_station: String,

    /// Target station id or display name.
    pub target_station: Option<String>,

    /// Raw target coordinate, used when the destination is not a
    /// station. Both fields must be present together.
    pub target_lat: Option<f64>,
    pub target_lon: Option<f64>,

    /// Query time "HH:MM" (hours 0-29 accepted). Defaults to now.
    pub current_time: Option<String>,
}

/// Echo of the validated search condition.
#[derive(Debug, Serialize)]
pub struct SearchCondition {
    pub start: String,
    pub target: String,
    pub time: String,
}

/// Response for a reachability search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub status: String,

    /// Whether the best candidate effectively reaches the target
    /// (within walking distance).
    pub is_target_reachable: bool,

    /// True when the explore limit bounded the search: the candidate
    /// list is valid but possibly incomplete.
    pub truncated: bool,

    pub search_condition: SearchCondition,

    /// Reachable stations, ordered per the configured ranking policy.
    /// Empty means nothing is reachable tonight — a successful answer,
    /// not an error.
    pub candidates: Vec<RankedStop>,
}

/// Structured error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_with_optional_fields_absent() {
        let req: SearchRequest = serde_json::from_str(
            r#"{"start_station":"渋谷","target_station":"横浜","current_time":"24:40"}"#,
        )
        .unwrap();

        assert_eq!(req.start_station, "渋谷");
        assert_eq!(req.target_station.as_deref(), Some("横浜"));
        assert_eq!(req.target_lat, None);
        assert_eq!(req.target_lon, None);
        assert_eq!(req.current_time.as_deref(), Some("24:40"));
    }

    #[test]
    fn request_deserializes_coordinate_target() {
        let req: SearchRequest = serde_json::from_str(
            r#"{"start_station":"渋谷","target_lat":35.51,"target_lon":139.63}"#,
        )
        .unwrap();

        assert_eq!(req.target_station, None);
        assert_eq!(req.target_lat, Some(35.51));
        assert_eq!(req.current_time, None);
    }

    #[test]
    fn response_serializes_expected_shape() {
        let response = SearchResponse {
            status: "success".to_string(),
            is_target_reachable: false,
            truncated: false,
            search_condition: SearchCondition {
                start: "渋谷".to_string(),
                target: "横浜".to_string(),
                time: "24:40".to_string(),
            },
            candidates: vec![RankedStop {
                station: "菊名".to_string(),
                arrival_time: "25:03".to_string(),
                distance_to_target_km: 4.95,
                leg_count: 5,
                estimated_fare: 3500,
                stop_id: "Kikuna".to_string(),
            }],
        };

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["is_target_reachable"], false);
        assert_eq!(body["truncated"], false);
        assert_eq!(body["search_condition"]["start"], "渋谷");
        assert_eq!(body["search_condition"]["time"], "24:40");

        let candidate = &body["candidates"][0];
        assert_eq!(candidate["station"], "菊名");
        assert_eq!(candidate["arrival_time"], "25:03");
        assert_eq!(candidate["distance_to_target_km"], 4.95);
        assert_eq!(candidate["leg_count"], 5);
        assert_eq!(candidate["estimated_fare"], 3500);
        assert_eq!(candidate["stop_id"], "Kikuna");
    }

    #[test]
    fn error_body_carries_the_message() {
        let body = serde_json::to_value(ErrorResponse {
            error: "station '札幌' is not in the loaded data".to_string(),
        })
        .unwrap();
        assert_eq!(body["error"], "station '札幌' is not in the loaded data");
    }
}
