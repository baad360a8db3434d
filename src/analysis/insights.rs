//! Human-readable findings from the aggregated dataset

use super::stats::{most_common, StatisticsSummary};
use crate::models::ScoredRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Insight lines plus the time they were produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInsights {
    pub generated_at: DateTime<Utc>,
    pub total_apps: usize,
    pub insights: Vec<String>,
}

/// Build the ordered insight lines.
///
/// Lines whose underlying aggregate is missing (no categories, no scored
/// records) are skipped rather than printed with placeholder values.
pub fn generate_insights(
    stats: &StatisticsSummary,
    scored: &[ScoredRecord],
    high_threshold: f64,
) -> Vec<String> {
    let mut insights = vec![format!("Total applications analyzed: {}", stats.total_apps)];

    if let Some((category, count)) = most_common(&stats.categories) {
        insights.push(format!("Most common category: {} ({} apps)", category, count));
    }

    if let Some((industry, count)) = most_common(&stats.industries) {
        insights.push(format!("Most common industry: {} ({} apps)", industry, count));
    }

    insights.push(format!(
        "Average features per app: {:.2}",
        stats.avg_features_per_app
    ));

    if !scored.is_empty() {
        let total: f64 = scored.iter().map(|s| s.complexity_score).sum();
        let average = total / scored.len() as f64;
        insights.push(format!("Average complexity score: {:.2}/10", average));

        let high = scored
            .iter()
            .filter(|s| s.complexity_score >= high_threshold)
            .count();
        let percent = high as f64 / scored.len() as f64 * 100.0;
        insights.push(format!(
            "High complexity apps (score >= {:.1}): {} ({:.1}%)",
            high_threshold, high, percent
        ));
    }

    if let Some((source, _)) = most_common(&stats.sources) {
        insights.push(format!("Primary data source: {}", source));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::scoring::score_records;
    use crate::analysis::stats::basic_statistics;
    use crate::models::{Record, FIELD_CATEGORY, FIELD_FEATURES, FIELD_INDUSTRY, FIELD_SOURCE};

    fn app(category: &str, industry: &str, features: &str) -> Record {
        Record::new()
            .with(FIELD_CATEGORY, category)
            .with(FIELD_INDUSTRY, industry)
            .with(FIELD_SOURCE, "catalog")
            .with(FIELD_FEATURES, features)
    }

    #[test]
    fn test_insight_order_and_content() {
        let records = vec![
            app("Internal Tool", "Retail", "payments, ai, api, integrations"),
            app("Customer Portal", "Health", "search"),
            app("Internal Tool", "Health", ""),
        ];
        let stats = basic_statistics(&records);
        let scored = score_records(&records);
        let insights = generate_insights(&stats, &scored, 7.0);

        assert_eq!(
            insights,
            vec![
                "Total applications analyzed: 3".to_string(),
                "Most common category: Internal Tool (2 apps)".to_string(),
                "Most common industry: Health (2 apps)".to_string(),
                "Average features per app: 1.67".to_string(),
                "Average complexity score: 3.33/10".to_string(),
                "High complexity apps (score >= 7.0): 1 (33.3%)".to_string(),
                "Primary data source: catalog".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_aggregates_are_skipped() {
        let stats = basic_statistics(&[]);
        let insights = generate_insights(&stats, &[], 7.0);
        assert_eq!(
            insights,
            vec![
                "Total applications analyzed: 0".to_string(),
                "Average features per app: 0.00".to_string(),
            ]
        );
    }
}
