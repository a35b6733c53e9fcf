//! Most-added analytics dashboard.

use stockroom_core::analytics::AnalyticsRecord;

/// Rows shown in the "top products" card.
pub const TOP_COUNT: usize = 5;

/// One ranked table row.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRow<'a> {
    /// 1-based position.
    pub rank: usize,
    pub name: &'a str,
    pub sku: &'a str,
    pub count: i64,
    /// Share of all counted products, in percent.
    pub percent_of_total: f64,
    /// Bar width relative to the largest row, `0.0..=1.0`.
    pub bar_ratio: f64,
}

/// The analytics report as the dashboard presents it.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsDashboard {
    records: Vec<AnalyticsRecord>,
}

impl AnalyticsDashboard {
    /// Wrap a report that the server already sorted by count.
    #[must_use]
    pub const fn new(records: Vec<AnalyticsRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.records.iter().map(|r| r.count).sum()
    }

    #[must_use]
    pub fn top(&self) -> Option<&AnalyticsRecord> {
        self.records.first()
    }

    #[must_use]
    pub fn top_five(&self) -> &[AnalyticsRecord] {
        let end = self.records.len().min(TOP_COUNT);
        self.records.get(..end).unwrap_or_default()
    }

    /// Ranked rows with their proportions.
    #[must_use]
    pub fn rows(&self) -> Vec<DashboardRow<'_>> {
        let total = self.total();
        let max = self.records.iter().map(|r| r.count).max().unwrap_or(0);

        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| DashboardRow {
                rank: i + 1,
                name: &r.key.name,
                sku: &r.key.sku,
                count: r.count,
                percent_of_total: ratio(r.count, total) * 100.0,
                bar_ratio: ratio(r.count, max),
            })
            .collect()
    }
}

#[allow(clippy::cast_precision_loss)] // counts are far below 2^52
fn ratio(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    part as f64 / whole as f64
}
