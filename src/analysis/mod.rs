//! Dataset analysis pipeline
//!
//! This module handles:
//! - Frequency statistics over categorical fields
//! - Heuristic complexity scoring
//! - Insight generation
//! - Taxonomy classification
//! - Persisting results as JSON

mod insights;
mod report;
mod scoring;
mod stats;
mod taxonomy;

pub use insights::*;
pub use report::*;
pub use scoring::*;
pub use stats::*;
pub use taxonomy::*;

use crate::models::{Record, ScoredRecord};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything one analysis run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub statistics: StatisticsSummary,
    pub scored: Vec<ScoredRecord>,
    pub insights: AnalysisInsights,
    pub taxonomy: Taxonomy,
}

/// Run statistics, scoring, insights and taxonomy over loaded records
pub fn run_analysis(records: &[Record], high_threshold: f64) -> AnalysisResults {
    info!("Analyzing {} records", records.len());

    let statistics = basic_statistics(records);
    let scored = score_records(records);
    let lines = generate_insights(&statistics, &scored, high_threshold);
    let taxonomy = build_taxonomy(&scored);

    AnalysisResults {
        insights: AnalysisInsights {
            generated_at: Utc::now(),
            total_apps: statistics.total_apps,
            insights: lines,
        },
        statistics,
        scored,
        taxonomy,
    }
}
