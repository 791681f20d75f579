use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::logic::{IncidentFilter, ReferenceFilter};
use crate::model::{CrimeCode, Incident, Neighborhood};
use crate::store::Store;

pub type AppState<S> = Arc<S>;

/// Error responses are plain text of the form `Error: <message>`.
pub type TextError = (StatusCode, String);

fn text_error(status: StatusCode, message: impl std::fmt::Display) -> TextError {
    (status, format!("Error: {}", message))
}

fn missing_fields() -> TextError {
    text_error(StatusCode::BAD_REQUEST, "Missing required fields")
}

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct CodeResponse {
    pub code: i64,
    pub description: String,
}

impl From<CrimeCode> for CodeResponse {
    fn from(code: CrimeCode) -> Self {
        Self {
            code: code.code,
            description: code.incident_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NeighborhoodResponse {
    pub id: i64,
    pub name: String,
}

impl From<Neighborhood> for NeighborhoodResponse {
    fn from(neighborhood: Neighborhood) -> Self {
        Self {
            id: neighborhood.neighborhood_number,
            name: neighborhood.neighborhood_name,
        }
    }
}

/// Incident row with the stored date_time split back into its date and
/// time parts.
#[derive(Debug, Serialize)]
pub struct IncidentResponse {
    pub case_number: String,
    pub date: String,
    pub time: String,
    pub code: i64,
    pub incident: String,
    pub police_grid: i64,
    pub neighborhood_number: i64,
    pub block: String,
}

impl From<Incident> for IncidentResponse {
    fn from(incident: Incident) -> Self {
        Self {
            date: incident.date().to_string(),
            time: incident.time().to_string(),
            case_number: incident.case_number,
            code: incident.code,
            incident: incident.incident,
            police_grid: incident.police_grid,
            neighborhood_number: incident.neighborhood_number,
            block: incident.block,
        }
    }
}

pub async fn list_codes<S: Store>(
    State(store): State<AppState<S>>,
    Query(filter): Query<ReferenceFilter>,
) -> Result<Json<Vec<CodeResponse>>, TextError> {
    log::debug!("GET /codes query: {:?}", filter);

    match store.list_codes(&filter).await {
        Ok(codes) => Ok(Json(codes.into_iter().map(CodeResponse::from).collect())),
        Err(e) => Err(text_error(StatusCode::BAD_REQUEST, e)),
    }
}

pub async fn list_neighborhoods<S: Store>(
    State(store): State<AppState<S>>,
    Query(filter): Query<ReferenceFilter>,
) -> Result<Json<Vec<NeighborhoodResponse>>, TextError> {
    log::debug!("GET /neighborhoods query: {:?}", filter);

    match store.list_neighborhoods(&filter).await {
        Ok(neighborhoods) => Ok(Json(
            neighborhoods
                .into_iter()
                .map(NeighborhoodResponse::from)
                .collect(),
        )),
        Err(e) => Err(text_error(StatusCode::BAD_REQUEST, e)),
    }
}

pub async fn list_incidents<S: Store>(
    State(store): State<AppState<S>>,
    Query(filter): Query<IncidentFilter>,
) -> Result<Json<Vec<IncidentResponse>>, TextError> {
    log::debug!("GET /incidents query: {:?}", filter);

    match store.list_incidents(&filter).await {
        Ok(incidents) => Ok(Json(
            incidents.into_iter().map(IncidentResponse::from).collect(),
        )),
        Err(e) => Err(text_error(StatusCode::BAD_REQUEST, e)),
    }
}

pub async fn create_incident<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(body): RequestJson<Value>,
) -> Result<String, TextError> {
    log::debug!("PUT /new-incident body: {}", body);

    let incident = parse_new_incident(&body)?;
    match store.insert_incident(&incident).await {
        Ok(true) => Ok("Successfully added new incident".to_string()),
        Ok(false) => Err(text_error(
            StatusCode::CONFLICT,
            "Case number already exists.",
        )),
        Err(e) => Err(text_error(StatusCode::INTERNAL_SERVER_ERROR, e)),
    }
}

pub async fn remove_incident<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(body): RequestJson<Value>,
) -> Result<String, TextError> {
    log::debug!("DELETE /remove-incident body: {}", body);

    // An absent case_number flows through as an empty string and matches
    // no rows, surfacing as the not-found outcome.
    let case_number = truthy_string(&body, "case_number").unwrap_or_default();
    match store.delete_incident(&case_number).await {
        Ok(true) => Ok("Successfully deleted incident".to_string()),
        Ok(false) => Err(text_error(
            StatusCode::NOT_FOUND,
            "Case number does not exist.",
        )),
        Err(e) => Err(text_error(StatusCode::INTERNAL_SERVER_ERROR, e)),
    }
}

fn parse_new_incident(body: &Value) -> Result<Incident, TextError> {
    let case_number = require_string(body, "case_number")?;
    let date = require_string(body, "date")?;
    let time = require_string(body, "time")?;
    let code = require_integer(body, "code")?;
    let incident = require_string(body, "incident")?;
    let police_grid = require_integer(body, "police_grid")?;
    let neighborhood_number = require_integer(body, "neighborhood_number")?;
    let block = require_string(body, "block")?;

    Ok(Incident {
        case_number,
        date_time: Incident::combine_date_time(&date, &time),
        code,
        incident,
        police_grid,
        neighborhood_number,
        block,
    })
}

/// Field value as a string if it is present and truthy. Missing, null,
/// empty-string and zero values all count as absent.
fn truthy_string(body: &Value, field: &str) -> Option<String> {
    match body.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn require_string(body: &Value, field: &str) -> Result<String, TextError> {
    truthy_string(body, field).ok_or_else(missing_fields)
}

fn require_integer(body: &Value, field: &str) -> Result<i64, TextError> {
    let raw = require_string(body, field)?;
    raw.parse::<i64>().map_err(|_| {
        text_error(
            StatusCode::BAD_REQUEST,
            format!("Field '{}' must be an integer", field),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_new_incident_accepts_complete_body() {
        let body = json!({
            "case_number": "24000100",
            "date": "2024-02-03",
            "time": "14:05:00",
            "code": 300,
            "incident": "Robbery",
            "police_grid": "92",
            "neighborhood_number": 6,
            "block": "4XX UNIVERSITY AVE"
        });

        let incident = parse_new_incident(&body).expect("valid body");
        assert_eq!(incident.case_number, "24000100");
        assert_eq!(incident.date_time, "2024-02-03T14:05:00");
        assert_eq!(incident.code, 300);
        // Numeric strings coerce for integer-typed columns.
        assert_eq!(incident.police_grid, 92);
    }

    #[test]
    fn parse_new_incident_rejects_missing_and_falsy_fields() {
        let missing = json!({
            "case_number": "24000101",
            "date": "2024-02-03",
            "time": "14:05:00",
            "code": 300,
            "incident": "Robbery",
            "police_grid": 92,
            "neighborhood_number": 6
        });
        let err = parse_new_incident(&missing).expect_err("missing block");
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1, "Error: Missing required fields");

        let empty = json!({
            "case_number": "",
            "date": "2024-02-03",
            "time": "14:05:00",
            "code": 300,
            "incident": "Robbery",
            "police_grid": 92,
            "neighborhood_number": 6,
            "block": "4XX UNIVERSITY AVE"
        });
        let err = parse_new_incident(&empty).expect_err("empty case number");
        assert_eq!(err.1, "Error: Missing required fields");

        let zero_code = json!({
            "case_number": "24000102",
            "date": "2024-02-03",
            "time": "14:05:00",
            "code": 0,
            "incident": "Robbery",
            "police_grid": 92,
            "neighborhood_number": 6,
            "block": "4XX UNIVERSITY AVE"
        });
        let err = parse_new_incident(&zero_code).expect_err("zero code is falsy");
        assert_eq!(err.1, "Error: Missing required fields");
    }

    #[test]
    fn parse_new_incident_rejects_non_numeric_identifiers() {
        let body = json!({
            "case_number": "24000103",
            "date": "2024-02-03",
            "time": "14:05:00",
            "code": "auto-theft",
            "incident": "Auto Theft",
            "police_grid": 92,
            "neighborhood_number": 6,
            "block": "4XX UNIVERSITY AVE"
        });
        let err = parse_new_incident(&body).expect_err("non-numeric code");
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert_eq!(err.1, "Error: Field 'code' must be an integer");
    }

    #[test]
    fn responses_reshape_storage_rows() {
        let neighborhood = Neighborhood {
            neighborhood_number: 7,
            neighborhood_name: "Thomas/Dale (Frogtown)".to_string(),
        };
        let response = NeighborhoodResponse::from(neighborhood);
        assert_eq!(response.id, 7);
        assert_eq!(response.name, "Thomas/Dale (Frogtown)");

        let incident = Incident {
            case_number: "24000104".to_string(),
            date_time: "2024-02-03T14:05:00".to_string(),
            code: 300,
            incident: "Robbery".to_string(),
            police_grid: 92,
            neighborhood_number: 6,
            block: "4XX UNIVERSITY AVE".to_string(),
        };
        let response = IncidentResponse::from(incident);
        assert_eq!(response.date, "2024-02-03");
        assert_eq!(response.time, "14:05:00");
    }
}
