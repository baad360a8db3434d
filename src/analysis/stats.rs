//! Descriptive statistics over the loaded dataset

use crate::models::{Record, FIELD_CATEGORY, FIELD_INDUSTRY, FIELD_SOURCE};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label used when a categorical column is absent or blank
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Label → count, in first-seen order
pub type FrequencyTable = IndexMap<String, usize>;

/// Aggregated statistics for one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub total_apps: usize,
    pub categories: FrequencyTable,
    pub industries: FrequencyTable,
    pub sources: FrequencyTable,
    pub avg_features_per_app: f64,
    pub feature_counts: Vec<usize>,
}

/// Build the statistics summary for a set of records
pub fn basic_statistics(records: &[Record]) -> StatisticsSummary {
    let mut summary = StatisticsSummary {
        total_apps: records.len(),
        ..Default::default()
    };

    let mut total_features = 0usize;
    for record in records {
        tally(&mut summary.categories, record.field_or(FIELD_CATEGORY, UNKNOWN_LABEL));
        tally(&mut summary.industries, record.field_or(FIELD_INDUSTRY, UNKNOWN_LABEL));
        tally(&mut summary.sources, record.field_or(FIELD_SOURCE, UNKNOWN_LABEL));

        let count = record.feature_list().len();
        total_features += count;
        summary.feature_counts.push(count);
    }

    summary.avg_features_per_app = if records.is_empty() {
        0.0
    } else {
        round2(total_features as f64 / records.len() as f64)
    };

    summary
}

fn tally(table: &mut FrequencyTable, label: &str) {
    *table.entry(label.to_string()).or_insert(0) += 1;
}

/// Most frequent label. Ties go to the label seen first.
pub fn most_common(table: &FrequencyTable) -> Option<(&str, usize)> {
    let mut best: Option<(&str, usize)> = None;
    for (label, &count) in table {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((label.as_str(), count));
        }
    }
    best
}

/// Round to two decimals, ties to even
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FIELD_FEATURES;

    fn app(category: &str, industry: &str, features: &str) -> Record {
        Record::new()
            .with(FIELD_CATEGORY, category)
            .with(FIELD_INDUSTRY, industry)
            .with(FIELD_SOURCE, "catalog")
            .with(FIELD_FEATURES, features)
    }

    #[test]
    fn test_counts_sum_to_total() {
        let records = vec![
            app("Internal Tool", "Retail", "auth, search"),
            app("Customer Portal", "Health", ""),
            app("Internal Tool", "", "api"),
            Record::new(),
        ];
        let stats = basic_statistics(&records);

        assert_eq!(stats.total_apps, 4);
        for table in [&stats.categories, &stats.industries, &stats.sources] {
            assert_eq!(table.values().sum::<usize>(), stats.total_apps);
        }
        assert_eq!(stats.categories["Internal Tool"], 2);
        assert_eq!(stats.categories[UNKNOWN_LABEL], 1);
        assert_eq!(stats.industries[UNKNOWN_LABEL], 2);
    }

    #[test]
    fn test_feature_average() {
        let records = vec![
            app("a", "b", "auth, search, api"),
            app("a", "b", "auth"),
            app("a", "b", " , "),
        ];
        let stats = basic_statistics(&records);
        assert_eq!(stats.feature_counts, vec![3, 1, 0]);
        assert_eq!(stats.avg_features_per_app, 1.33);
    }

    #[test]
    fn test_empty_dataset() {
        let stats = basic_statistics(&[]);
        assert_eq!(stats.total_apps, 0);
        assert_eq!(stats.avg_features_per_app, 0.0);
        assert!(stats.categories.is_empty());
        assert!(most_common(&stats.categories).is_none());
    }

    #[test]
    fn test_most_common_tie_goes_to_first_seen() {
        let mut table = FrequencyTable::new();
        table.insert("Zeta".to_string(), 2);
        table.insert("Alpha".to_string(), 3);
        table.insert("Beta".to_string(), 3);
        assert_eq!(most_common(&table), Some(("Alpha", 3)));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(4.0), 4.0);
    }
}
