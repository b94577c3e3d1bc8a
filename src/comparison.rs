use crate::models::estimate::RentEstimate;
use dashmap::DashMap;

/// Rows kept per comparison list; the oldest row is dropped beyond this
pub const MAX_ROWS: usize = 20;

fn location_key(location: &str) -> String {
    location.trim().to_lowercase()
}

/// Estimates side by side, at most one row per requested location.
///
/// Rows are keyed on `query_location`, not the source's display name, so
/// "Austin, TX" and "Dallas, TX" stay apart even when a source reports both
/// as "Texas". Keys match case-insensitively, ignoring surrounding whitespace.
#[derive(Debug, Clone, Default)]
pub struct ComparisonTable {
    rows: Vec<RentEstimate>,
}

impl ComparisonTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the row for `estimate.query_location`.
    ///
    /// A replaced row keeps its position. Returns true on replacement.
    pub fn upsert(&mut self, estimate: RentEstimate) -> bool {
        let key = location_key(&estimate.query_location);
        if let Some(existing) = self
            .rows
            .iter_mut()
            .find(|row| location_key(&row.query_location) == key)
        {
            *existing = estimate;
            return true;
        }

        if self.rows.len() >= MAX_ROWS {
            self.rows.remove(0);
        }
        self.rows.push(estimate);
        false
    }

    /// Remove the row for `location`. Returns true if one was removed.
    pub fn remove(&mut self, location: &str) -> bool {
        let key = location_key(location);
        let before = self.rows.len();
        self.rows.retain(|row| location_key(&row.query_location) != key);
        self.rows.len() != before
    }

    pub fn get(&self, location: &str) -> Option<&RentEstimate> {
        let key = location_key(location);
        self.rows
            .iter()
            .find(|row| location_key(&row.query_location) == key)
    }

    pub fn rows(&self) -> &[RentEstimate] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Comparison tables keyed by client session
#[derive(Debug, Default)]
pub struct ComparisonStore {
    sessions: DashMap<String, ComparisonTable>,
}

impl ComparisonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert into a session's table, creating it on first use. Returns the rows after the change.
    pub fn upsert(&self, session: &str, estimate: RentEstimate) -> Vec<RentEstimate> {
        let mut table = self.sessions.entry(session.to_string()).or_default();
        let replaced = table.upsert(estimate);
        tracing::debug!(session = session, replaced, rows = table.len(), "Updated comparison table");
        table.rows().to_vec()
    }

    pub fn remove(&self, session: &str, location: &str) -> Vec<RentEstimate> {
        match self.sessions.get_mut(session) {
            Some(mut table) => {
                table.remove(location);
                table.rows().to_vec()
            }
            None => Vec::new(),
        }
    }

    pub fn rows(&self, session: &str) -> Vec<RentEstimate> {
        self.sessions
            .get(session)
            .map(|table| table.rows().to_vec())
            .unwrap_or_default()
    }

    /// Drop a session's table entirely
    pub fn clear(&self, session: &str) -> bool {
        self.sessions.remove(session).is_some()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
