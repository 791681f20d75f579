use serde::{Deserialize, Serialize};

/// Read-only reference row from the `Neighborhoods` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    pub neighborhood_number: i64,
    pub neighborhood_name: String,
}

/// Read-only reference row from the `Codes` table, mapping a crime code
/// to its incident type description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeCode {
    pub code: i64,
    pub incident_type: String,
}
