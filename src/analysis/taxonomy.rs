//! Rule-based taxonomy of scored apps
//!
//! Rules are checked in order and the first match wins, so a description
//! mentioning both "alternative" and "customer" lands in SaaS Alternatives.

use crate::models::{Record, ScoredRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The five fixed taxonomy buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaxonomyBucket {
    #[serde(rename = "Business Automation")]
    BusinessAutomation,
    #[serde(rename = "Customer Tools")]
    CustomerTools,
    #[serde(rename = "Data Management")]
    DataManagement,
    #[serde(rename = "Personal Projects")]
    PersonalProjects,
    #[serde(rename = "SaaS Alternatives")]
    SaasAlternatives,
}

impl TaxonomyBucket {
    pub const ALL: [TaxonomyBucket; 5] = [
        TaxonomyBucket::BusinessAutomation,
        TaxonomyBucket::CustomerTools,
        TaxonomyBucket::DataManagement,
        TaxonomyBucket::PersonalProjects,
        TaxonomyBucket::SaasAlternatives,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxonomyBucket::BusinessAutomation => "Business Automation",
            TaxonomyBucket::CustomerTools => "Customer Tools",
            TaxonomyBucket::DataManagement => "Data Management",
            TaxonomyBucket::PersonalProjects => "Personal Projects",
            TaxonomyBucket::SaasAlternatives => "SaaS Alternatives",
        }
    }
}

impl std::fmt::Display for TaxonomyBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the classification chain
#[derive(Debug)]
pub struct TaxonomyRule {
    pub bucket: TaxonomyBucket,
    /// Exact category values that select this bucket
    pub categories: &'static [&'static str],
    /// Lower-case substrings of the description that select this bucket
    pub keywords: &'static [&'static str],
}

impl TaxonomyRule {
    fn matches(&self, category: &str, description: &str) -> bool {
        self.categories.iter().any(|c| *c == category)
            || self.keywords.iter().any(|k| description.contains(k))
    }
}

/// Ordered chain; order is priority
pub static TAXONOMY_RULES: &[TaxonomyRule] = &[
    TaxonomyRule {
        bucket: TaxonomyBucket::SaasAlternatives,
        categories: &[],
        keywords: &["replace", "alternative", "instead of"],
    },
    TaxonomyRule {
        bucket: TaxonomyBucket::BusinessAutomation,
        categories: &["Internal Tool"],
        keywords: &["admin", "management", "dashboard"],
    },
    TaxonomyRule {
        bucket: TaxonomyBucket::CustomerTools,
        categories: &["Customer Portal"],
        keywords: &["customer", "client", "user"],
    },
    TaxonomyRule {
        bucket: TaxonomyBucket::DataManagement,
        categories: &[],
        keywords: &["data", "database", "analytics"],
    },
];

/// Bucket for records no rule matches
pub const FALLBACK_BUCKET: TaxonomyBucket = TaxonomyBucket::PersonalProjects;

/// Classify a record into exactly one bucket
pub fn classify(record: &Record) -> TaxonomyBucket {
    let category = record.category().trim();
    let description = record.description().to_lowercase();

    TAXONOMY_RULES
        .iter()
        .find(|rule| rule.matches(category, &description))
        .map(|rule| rule.bucket)
        .unwrap_or(FALLBACK_BUCKET)
}

/// Scored records partitioned by bucket; every bucket is always present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    buckets: BTreeMap<TaxonomyBucket, Vec<ScoredRecord>>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            buckets: TaxonomyBucket::ALL.iter().map(|b| (*b, Vec::new())).collect(),
        }
    }
}

impl Taxonomy {
    pub fn bucket(&self, bucket: TaxonomyBucket) -> &[ScoredRecord] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Record count per bucket
    pub fn summary(&self) -> BTreeMap<TaxonomyBucket, usize> {
        self.buckets.iter().map(|(b, apps)| (*b, apps.len())).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaxonomyBucket, &[ScoredRecord])> {
        self.buckets.iter().map(|(b, apps)| (*b, apps.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Partition scored records, preserving input order within each bucket
pub fn build_taxonomy(scored: &[ScoredRecord]) -> Taxonomy {
    let mut taxonomy = Taxonomy::default();
    for app in scored {
        taxonomy
            .buckets
            .entry(classify(&app.record))
            .or_default()
            .push(app.clone());
    }
    taxonomy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FIELD_CATEGORY, FIELD_DESCRIPTION, FIELD_NAME};

    fn app(category: &str, description: &str) -> Record {
        Record::new()
            .with(FIELD_CATEGORY, category)
            .with(FIELD_DESCRIPTION, description)
    }

    #[test]
    fn test_rule_chain() {
        assert_eq!(
            classify(&app("", "An alternative to expensive CRMs for customers")),
            TaxonomyBucket::SaasAlternatives
        );
        assert_eq!(
            classify(&app("", "We built a dashboard for admin management")),
            TaxonomyBucket::BusinessAutomation
        );
        assert_eq!(
            classify(&app("Internal Tool", "Track customer data")),
            TaxonomyBucket::BusinessAutomation
        );
        assert_eq!(
            classify(&app("Customer Portal", "Self-service booking")),
            TaxonomyBucket::CustomerTools
        );
        assert_eq!(
            classify(&app("", "Clean up DATABASE exports")),
            TaxonomyBucket::DataManagement
        );
        assert_eq!(
            classify(&app("Hobby", "Plan my garden beds")),
            TaxonomyBucket::PersonalProjects
        );
        assert_eq!(classify(&Record::new()), TaxonomyBucket::PersonalProjects);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let record = app("Customer Portal", "Replace your helpdesk");
        let first = classify(&record);
        assert_eq!(first, TaxonomyBucket::SaasAlternatives);
        assert_eq!(classify(&record), first);
    }

    #[test]
    fn test_every_record_in_exactly_one_bucket() {
        let scored: Vec<ScoredRecord> = ["alternative", "admin", "client", "data", "garden"]
            .iter()
            .enumerate()
            .map(|(i, d)| ScoredRecord {
                record: app("", d).with(FIELD_NAME, format!("app-{}", i)),
                complexity_score: 0.0,
            })
            .collect();

        let taxonomy = build_taxonomy(&scored);
        assert_eq!(taxonomy.total(), scored.len());
        for bucket in TaxonomyBucket::ALL {
            assert_eq!(taxonomy.bucket(bucket).len(), 1, "{}", bucket);
        }
    }

    #[test]
    fn test_empty_taxonomy_lists_all_buckets() {
        let taxonomy = build_taxonomy(&[]);
        let summary = taxonomy.summary();
        assert_eq!(summary.len(), 5);
        assert!(summary.values().all(|&n| n == 0));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["SaaS Alternatives"], 0);
    }
}
