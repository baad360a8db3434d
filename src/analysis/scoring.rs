//! Heuristic complexity scoring
//!
//! A record's raw score is the sum of its feature weights plus the weights
//! of every keyword phrase found in its description. The raw sum maps onto
//! a 0-10 scale with `min(raw / 20 * 10, 10)`, rounded to two decimals.
//! Keyword matching is plain substring search, so short phrases like "ai"
//! also hit inside longer words ("maintain", "email").

use super::stats::round2;
use crate::models::{Record, ScoredRecord};
use tracing::debug;

/// Weight per known feature token
pub static FEATURE_WEIGHTS: &[(&str, u32)] = &[
    ("authentication", 2),
    ("database", 3),
    ("dashboard", 3),
    ("api", 4),
    ("payments", 5),
    ("analytics", 3),
    ("notifications", 2),
    ("file upload", 2),
    ("search", 2),
    ("reporting", 3),
    ("integrations", 4),
    ("workflow", 4),
    ("ai", 5),
    ("real-time", 4),
];

/// Weight per description phrase
pub static KEYWORD_WEIGHTS: &[(&str, u32)] = &[
    ("machine learning", 5),
    ("artificial intelligence", 5),
    ("ai", 4),
    ("automation", 4),
    ("real-time", 4),
    ("payment", 4),
    ("workflow", 3),
    ("integration", 3),
    ("analytics", 3),
];

/// Weight for a feature token missing from the table
pub const DEFAULT_FEATURE_WEIGHT: u32 = 1;

/// Raw score that maps to the top of the scale
pub const RAW_SCORE_CEILING: f64 = 20.0;

pub const MAX_SCORE: f64 = 10.0;

/// Weight of a single feature token (case-insensitive)
pub fn feature_weight(token: &str) -> u32 {
    let token = token.trim().to_lowercase();
    FEATURE_WEIGHTS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, weight)| *weight)
        .unwrap_or(DEFAULT_FEATURE_WEIGHT)
}

/// Sum of keyword weights found in a description
pub fn keyword_weight(description: &str) -> u32 {
    let description = description.to_lowercase();
    KEYWORD_WEIGHTS
        .iter()
        .filter(|(phrase, _)| description.contains(phrase))
        .map(|(_, weight)| weight)
        .sum()
}

/// Unscaled complexity of a record
pub fn raw_complexity(record: &Record) -> u32 {
    let features: u32 = record.feature_list().into_iter().map(feature_weight).sum();
    features + keyword_weight(record.description())
}

/// Map a raw sum onto the 0-10 scale
pub fn normalize(raw: u32) -> f64 {
    let scaled = (raw as f64 / RAW_SCORE_CEILING * MAX_SCORE).min(MAX_SCORE);
    round2(scaled.max(0.0))
}

pub fn complexity_score(record: &Record) -> f64 {
    normalize(raw_complexity(record))
}

/// Score every record, leaving the originals untouched
pub fn score_records(records: &[Record]) -> Vec<ScoredRecord> {
    records
        .iter()
        .map(|record| {
            let complexity_score = complexity_score(record);
            debug!("Scored '{}': {:.2}", record.name(), complexity_score);
            ScoredRecord::new(record.clone(), complexity_score)
        })
        .collect()
}
