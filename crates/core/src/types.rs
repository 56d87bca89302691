//! Core conventions for the gridsim workspace.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// Sentinel for "no liquidity constraint" on a size grid.
pub const UNLIMITED_SIZE: f64 = f64::INFINITY;

/// Convert a timestamp label to a UTC datetime (epoch on overflow).
#[inline]
pub fn ts_to_datetime(ts_ms: TimestampMs) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ts_ms).unwrap_or_default()
}

/// The fixed, ordered set of securities a run operates over.
///
/// Column order is established once and preserved; all per-security state is
/// accessed positionally, with this table translating labels to positions.
#[derive(Debug, Clone)]
pub struct Universe {
    labels: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl Universe {
    /// Create a universe from ordered security labels.
    pub fn new(labels: Vec<String>) -> Self {
        let lookup = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
        Self { labels, lookup }
    }

    /// Number of securities.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Ordered security labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Column position of a security label.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.lookup.get(label).copied()
    }

    /// Label at a column position.
    pub fn label(&self, position: usize) -> Option<&str> {
        self.labels.get(position).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ts_to_datetime() {
        // 2024-01-01 00:00:00 UTC
        let dt = ts_to_datetime(1704067200000);
        assert_eq!(dt.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_universe_lookup() {
        let universe = Universe::new(vec!["AAA".to_string(), "BBB".to_string()]);

        assert_eq!(universe.len(), 2);
        assert_eq!(universe.position("BBB"), Some(1));
        assert_eq!(universe.position("ZZZ"), None);
        assert_eq!(universe.label(0), Some("AAA"));
        assert_eq!(universe.label(9), None);
    }

    #[test]
    fn test_unlimited_size_dominates() {
        assert!(UNLIMITED_SIZE > 1e300);
        assert_eq!(1234.5_f64.min(UNLIMITED_SIZE), 1234.5);
    }
}
