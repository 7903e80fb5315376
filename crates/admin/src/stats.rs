//! Aggregation shapes for the dashboard and order detail views.
//!
//! The database does the heavy lifting (GROUP BY month, labeled facet
//! subqueries); this module owns the calendar-year window computation and the
//! in-process reshaping of aggregate rows into view-ready structures.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use cartloom_core::OrderStatus;

/// Inclusive UTC bounds of one calendar year.
///
/// Spans `[Jan 1 00:00:00.000, Dec 31 23:59:59.999]` of the requested year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl YearWindow {
    /// Window for the given year, or the current year when the input is
    /// absent or not a plausible calendar year.
    #[must_use]
    pub fn for_year(year: Option<i32>) -> Self {
        let year = year
            .filter(|y| (1..=9998).contains(y))
            .unwrap_or_else(|| Utc::now().year());

        // Infallible for the clamped range above.
        let start = NaiveDate::from_ymd_opt(year, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid start of year");
        let end = NaiveDate::from_ymd_opt(year, 12, 31)
            .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
            .expect("valid end of year");

        Self {
            start: Utc.from_utc_datetime(&start),
            end: Utc.from_utc_datetime(&end),
        }
    }

    /// The calendar year this window covers.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.start.year()
    }
}

/// One `(month, count)` aggregate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct MonthCount {
    /// Calendar month, 1-12.
    pub month: i32,
    /// Records created in that month.
    pub count: i64,
}

/// Per-month record counts for one calendar year.
///
/// Keyed by month-number-as-text ("1".."12"). Months with zero records are
/// absent from the map; [`Self::count_for`] treats missing keys as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyBuckets(HashMap<String, i64>);

impl MonthlyBuckets {
    /// Reshape grouped aggregate rows into the month map.
    #[must_use]
    pub fn from_rows(rows: Vec<MonthCount>) -> Self {
        Self(
            rows.into_iter()
                .map(|row| (row.month.to_string(), row.count))
                .collect(),
        )
    }

    /// Count for a month (1-12), zero when absent.
    #[must_use]
    pub fn count_for(&self, month: u32) -> i64 {
        self.0.get(&month.to_string()).copied().unwrap_or(0)
    }

    /// Number of months with at least one record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no month has any records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The full twelve-month series, in calendar order, zeros included.
    #[must_use]
    pub fn series(&self) -> Vec<MonthPoint> {
        (1..=12)
            .map(|month| MonthPoint {
                month,
                count: self.count_for(month),
            })
            .collect()
    }
}

/// One point of the twelve-month dashboard series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthPoint {
    pub month: u32,
    pub count: i64,
}

/// Which facet of a status-partitioned order query a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetLabel {
    /// Orders whose status is exactly `pending`.
    Active,
    /// Everything else.
    History,
}

impl FacetLabel {
    /// The facet an order with this status lands in.
    #[must_use]
    pub const fn for_status(status: OrderStatus) -> Self {
        if status.is_pending() {
            Self::Active
        } else {
            Self::History
        }
    }
}

impl std::str::FromStr for FacetLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "history" => Ok(Self::History),
            _ => Err(format!("invalid facet label: {s}")),
        }
    }
}

/// Two independently paginated result lists produced from one filtered set.
#[derive(Debug, Clone, Default)]
pub struct Facets<T> {
    pub active: Vec<T>,
    pub history: Vec<T>,
}

impl<T> Facets<T> {
    /// Split labeled rows into their facets, preserving per-facet order.
    #[must_use]
    pub fn partition(items: Vec<(FacetLabel, T)>) -> Self {
        let mut facets = Self {
            active: Vec::new(),
            history: Vec::new(),
        };
        for (label, item) in items {
            match label {
                FacetLabel::Active => facets.active.push(item),
                FacetLabel::History => facets.history.push(item),
            }
        }
        facets
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use chrono::Timelike;

    use super::*;

    #[test]
    fn year_window_spans_the_whole_year() {
        let window = YearWindow::for_year(Some(2025));
        assert_eq!(window.year(), 2025);
        assert_eq!(window.start.month(), 1);
        assert_eq!(window.start.day(), 1);
        assert_eq!(window.start.num_seconds_from_midnight(), 0);
        assert_eq!(window.end.month(), 12);
        assert_eq!(window.end.day(), 31);
        assert_eq!(window.end.hour(), 23);
        assert_eq!(window.end.minute(), 59);
        assert_eq!(window.end.second(), 59);
        assert!(window.start < window.end);
    }

    #[test]
    fn implausible_years_fall_back_to_current() {
        let current = Utc::now().year();
        assert_eq!(YearWindow::for_year(None).year(), current);
        assert_eq!(YearWindow::for_year(Some(0)).year(), current);
        assert_eq!(YearWindow::for_year(Some(-5)).year(), current);
        assert_eq!(YearWindow::for_year(Some(10_000)).year(), current);
    }

    #[test]
    fn buckets_contain_exactly_the_months_with_records() {
        let buckets = MonthlyBuckets::from_rows(vec![
            MonthCount { month: 1, count: 4 },
            MonthCount { month: 3, count: 1 },
            MonthCount { month: 12, count: 9 },
        ]);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets.count_for(1), 4);
        assert_eq!(buckets.count_for(3), 1);
        assert_eq!(buckets.count_for(12), 9);
        // Missing keys read as zero.
        assert_eq!(buckets.count_for(2), 0);
        assert_eq!(buckets.count_for(7), 0);
    }

    #[test]
    fn empty_buckets_read_zero_everywhere() {
        let buckets = MonthlyBuckets::from_rows(vec![]);
        assert!(buckets.is_empty());
        for month in 1..=12 {
            assert_eq!(buckets.count_for(month), 0);
        }
    }

    #[test]
    fn series_fills_all_twelve_months_in_order() {
        let buckets = MonthlyBuckets::from_rows(vec![MonthCount { month: 5, count: 2 }]);
        let series = buckets.series();
        assert_eq!(series.len(), 12);
        assert_eq!(series.first().unwrap().month, 1);
        assert_eq!(series.last().unwrap().month, 12);
        assert_eq!(series.iter().map(|p| p.count).sum::<i64>(), 2);
    }

    #[test]
    fn facet_label_tracks_pending_exactly() {
        assert_eq!(
            FacetLabel::for_status(OrderStatus::Pending),
            FacetLabel::Active
        );
        for status in [
            OrderStatus::Accepted,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Returned,
        ] {
            assert_eq!(FacetLabel::for_status(status), FacetLabel::History);
        }
    }

    #[test]
    fn facet_label_parses_the_sql_labels() {
        assert_eq!(FacetLabel::from_str("active").unwrap(), FacetLabel::Active);
        assert_eq!(
            FacetLabel::from_str("history").unwrap(),
            FacetLabel::History
        );
        assert!(FacetLabel::from_str("archived").is_err());
    }

    #[test]
    fn partition_is_disjoint_and_lossless() {
        let items = vec![
            (FacetLabel::Active, 1),
            (FacetLabel::History, 2),
            (FacetLabel::Active, 3),
            (FacetLabel::History, 4),
            (FacetLabel::History, 5),
        ];
        let facets = Facets::partition(items);
        assert_eq!(facets.active, vec![1, 3]);
        assert_eq!(facets.history, vec![2, 4, 5]);
        assert_eq!(facets.active.len() + facets.history.len(), 5);
    }
}
