use serde::Deserialize;

/// Default and maximum number of rows returned by the incident listing.
pub const DEFAULT_ROW_LIMIT: i64 = 9999;

/// Accumulates AND-composed filter conditions with positional `?`
/// placeholders. Caller-supplied values are only ever collected as bound
/// parameters; the rendered SQL fragment contains nothing but column
/// names and placeholder markers.
#[derive(Debug, Default)]
pub struct SqlPredicate {
    conditions: Vec<String>,
    params: Vec<String>,
}

impl SqlPredicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `column IN (?,?,...)` with one placeholder per comma-separated
    /// id, binding each id in split order.
    pub fn id_list(&mut self, column: &str, csv: &str) {
        let ids: Vec<&str> = csv.split(',').collect();
        let placeholders = vec!["?"; ids.len()].join(",");
        self.conditions.push(format!("{} IN ({})", column, placeholders));
        self.params.extend(ids.into_iter().map(String::from));
    }

    /// Add an inclusive lower bound on the date portion of a column.
    pub fn date_at_least(&mut self, column: &str, date: &str) {
        self.conditions.push(format!("DATE({}) >= DATE(?)", column));
        self.params.push(date.to_string());
    }

    /// Add an inclusive upper bound on the date portion of a column.
    pub fn date_at_most(&mut self, column: &str, date: &str) {
        self.conditions.push(format!("DATE({}) <= DATE(?)", column));
        self.params.push(date.to_string());
    }

    /// Render the `WHERE ...` clause, or an empty string when no
    /// conditions were added.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Parameters to bind, in placeholder order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Query parameters accepted by the reference-data listings
/// (`/codes`, `/neighborhoods`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceFilter {
    /// Comma-separated list of identifiers to restrict the listing to.
    pub id: Option<String>,
}

impl ReferenceFilter {
    pub fn predicate(&self, column: &str) -> SqlPredicate {
        let mut predicate = SqlPredicate::new();
        if let Some(ids) = non_empty(&self.id) {
            predicate.id_list(column, ids);
        }
        predicate
    }
}

/// Query parameters accepted by `/incidents`. All filters compose via
/// logical AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncidentFilter {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub code: Option<String>,
    pub grid: Option<String>,
    pub neighborhood: Option<String>,
    /// Kept as a raw string so a malformed value coerces to the default
    /// instead of failing query-string extraction.
    pub limit: Option<String>,
}

impl IncidentFilter {
    pub fn predicate(&self) -> SqlPredicate {
        let mut predicate = SqlPredicate::new();
        if let Some(date) = non_empty(&self.start_date) {
            predicate.date_at_least("date_time", date);
        }
        if let Some(date) = non_empty(&self.end_date) {
            predicate.date_at_most("date_time", date);
        }
        if let Some(ids) = non_empty(&self.code) {
            predicate.id_list("code", ids);
        }
        if let Some(ids) = non_empty(&self.grid) {
            predicate.id_list("police_grid", ids);
        }
        if let Some(ids) = non_empty(&self.neighborhood) {
            predicate.id_list("neighborhood_number", ids);
        }
        predicate
    }

    /// Row limit as a bounded integer. Absent, non-numeric, and
    /// non-positive values fall back to the default; larger values are
    /// capped at it. This is the only caller-influenced value that ends
    /// up in query text rather than a bind parameter.
    pub fn row_limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|n| *n > 0)
            .map(|n| n.min(DEFAULT_ROW_LIMIT))
            .unwrap_or(DEFAULT_ROW_LIMIT)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
