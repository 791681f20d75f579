use axum::{
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::store::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Reference data
        .route("/codes", get(handlers::list_codes::<S>))
        .route("/neighborhoods", get(handlers::list_neighborhoods::<S>))
        // Incidents
        .route("/incidents", get(handlers::list_incidents::<S>))
        .route("/new-incident", put(handlers::create_incident::<S>))
        .route("/remove-incident", delete(handlers::remove_incident::<S>))
}
