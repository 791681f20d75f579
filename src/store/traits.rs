use crate::logic::{IncidentFilter, ReferenceFilter};
use crate::model::{CrimeCode, Incident, Neighborhood};
use anyhow::Result;

/// Read-only access to the reference tables (crime codes, neighborhoods).
#[async_trait::async_trait]
pub trait ReferenceStore: Send + Sync {
    /// List crime codes, optionally restricted to a set of code ids,
    /// ordered ascending by code.
    async fn list_codes(&self, filter: &ReferenceFilter) -> Result<Vec<CrimeCode>>;
    /// List neighborhoods, optionally restricted to a set of
    /// neighborhood numbers, ordered ascending by number.
    async fn list_neighborhoods(&self, filter: &ReferenceFilter) -> Result<Vec<Neighborhood>>;
}

/// Read/write access to the `Incidents` table.
#[async_trait::async_trait]
pub trait IncidentStore: Send + Sync {
    /// List incidents matching the filter, ordered descending by
    /// date_time, bounded by the filter's row limit.
    async fn list_incidents(&self, filter: &IncidentFilter) -> Result<Vec<Incident>>;
    /// Insert the incident if its case number is not already present.
    /// Returns `Ok(false)` when a row with the same case number exists.
    async fn insert_incident(&self, incident: &Incident) -> Result<bool>;
    /// Delete the incident with the given case number if present.
    /// Returns `Ok(false)` when no row matched.
    async fn delete_incident(&self, case_number: &str) -> Result<bool>;
}

pub trait Store: ReferenceStore + IncidentStore + Send + Sync {}
impl<T: ReferenceStore + IncidentStore + Send + Sync> Store for T {}
