//! Per-metric counters over decoded series.

use std::collections::BTreeMap;
use std::fmt;

use crate::point::DecodedPoint;

/// Value counts per metric and the overall time range they cover
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesStats {
    counts: BTreeMap<String, usize>,
    oldest: Option<i64>,
    newest: Option<i64>,
}

impl SeriesStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a decoded series of `metric`
    ///
    /// Counts accumulate across calls for the same metric. The time range uses the
    /// smallest and largest timestamps seen, whatever the series' sort order.
    pub fn update(&mut self, metric: &str, points: &[DecodedPoint]) {
        *self.counts.entry(metric.to_owned()).or_default() += points.len();

        for ts in points.iter().map(|p| p.ts) {
            self.oldest = Some(self.oldest.map_or(ts, |o| o.min(ts)));
            self.newest = Some(self.newest.map_or(ts, |n| n.max(ts)));
        }
    }

    /// Number of distinct metrics
    #[must_use]
    pub fn total_metrics(&self) -> usize {
        self.counts.len()
    }

    /// Number of values over all metrics
    #[must_use]
    pub fn total_values(&self) -> usize {
        self.counts.values().sum()
    }

    #[must_use]
    pub fn count(&self, metric: &str) -> Option<usize> {
        self.counts.get(metric).copied()
    }

    #[must_use]
    pub const fn oldest(&self) -> Option<i64> {
        self.oldest
    }

    #[must_use]
    pub const fn newest(&self) -> Option<i64> {
        self.newest
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl fmt::Display for SeriesStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} metrics, {} values", self.total_metrics(), self.total_values())?;
        if let (Some(oldest), Some(newest)) = (self.oldest, self.newest) {
            write!(f, ", oldest @ {oldest}, newest @ {newest}")?;
        }
        Ok(())
    }
}
