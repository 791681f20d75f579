pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export filter and predicate types
pub use logic::{IncidentFilter, ReferenceFilter, SqlPredicate, DEFAULT_ROW_LIMIT};

// Export all model types
pub use model::*;

// Export store types
pub use store::{IncidentStore, ReferenceStore, SqliteStore, Store};
