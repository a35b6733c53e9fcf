//! "Most added" analytics over the catalog.
//!
//! Products are grouped by their `(name, sku)` pair and counted. Rows are
//! ordered by count, highest first; equal counts keep first-seen order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number of rows returned by the most-added report.
pub const MOST_ADDED_LIMIT: usize = 10;

/// Identity a product is grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GroupKey {
    pub name: String,
    pub sku: String,
}

/// One row of the most-added report.
///
/// The group key is serialized as `_id` for compatibility with existing
/// dashboard clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AnalyticsRecord {
    #[serde(rename = "_id")]
    pub key: GroupKey,
    pub count: i64,
}

impl AnalyticsRecord {
    /// Build a record from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, sku: impl Into<String>, count: i64) -> Self {
        Self {
            key: GroupKey {
                name: name.into(),
                sku: sku.into(),
            },
            count,
        }
    }
}

/// Count `(name, sku)` pairs and return the `limit` largest groups.
///
/// Input order matters only for ties: groups seen first rank first.
///
/// ```
/// use stockroom_core::analytics::{AnalyticsRecord, tally};
///
/// let rows = tally([("A", "1"), ("A", "1"), ("B", "2")], 10);
/// assert_eq!(
///     rows,
///     vec![AnalyticsRecord::new("A", "1", 2), AnalyticsRecord::new("B", "2", 1)]
/// );
/// ```
pub fn tally<'a, I>(entries: I, limit: usize) -> Vec<AnalyticsRecord>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut index: HashMap<(&'a str, &'a str), usize> = HashMap::new();
    let mut groups: Vec<((&'a str, &'a str), i64)> = Vec::new();

    for entry in entries {
        match index.get(&entry) {
            Some(&position) => {
                if let Some(group) = groups.get_mut(position) {
                    group.1 += 1;
                }
            }
            None => {
                index.insert(entry, groups.len());
                groups.push((entry, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups.truncate(limit);

    groups
        .into_iter()
        .map(|((name, sku), count)| AnalyticsRecord::new(name, sku, count))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sorted_descending() {
        let rows = tally(
            [("B", "2"), ("A", "1"), ("A", "1"), ("C", "3"), ("A", "1"), ("C", "3")],
            10,
        );
        let counts: Vec<i64> = rows.iter().map(|r| r.count).collect();
        assert_eq!(counts, vec![3, 2, 1]);
        assert_eq!(rows[0].key.name, "A");
        assert_eq!(rows[2].key.name, "B");
    }

    #[test]
    fn test_counts_sum_to_input_size() {
        let entries = [("A", "1"), ("B", "2"), ("A", "1"), ("D", "4"), ("E", "5")];
        let rows = tally(entries, 10);
        assert_eq!(rows.iter().map(|r| r.count).sum::<i64>(), 5);
    }

    #[test]
    fn test_same_name_different_sku_are_distinct() {
        let rows = tally([("A", "1"), ("A", "2")], 10);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.count == 1));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let rows = tally([("Z", "9"), ("A", "1")], 10);
        assert_eq!(rows[0].key.name, "Z");
        assert_eq!(rows[1].key.name, "A");
    }

    #[test]
    fn test_limit_truncates() {
        let names: Vec<String> = (0..15).map(|i| format!("P{i}")).collect();
        let rows = tally(names.iter().map(|n| (n.as_str(), n.as_str())), MOST_ADDED_LIMIT);
        assert_eq!(rows.len(), 10);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(tally(std::iter::empty(), 10).is_empty());
    }

    #[test]
    fn test_wire_shape_uses_underscore_id() {
        let json = serde_json::to_value(AnalyticsRecord::new("A", "1", 2)).unwrap();
        assert_eq!(json["_id"]["name"], "A");
        assert_eq!(json["_id"]["sku"], "1");
        assert_eq!(json["count"], 2);
    }
}
