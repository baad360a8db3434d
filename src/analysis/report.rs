//! Persistence of analysis results as JSON files

use super::stats::StatisticsSummary;
use super::taxonomy::{Taxonomy, TaxonomyBucket};
use super::AnalysisResults;
use crate::error::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const STATISTICS_FILE: &str = "basic_statistics.json";
pub const SCORED_FILE: &str = "scored_applications.json";
pub const INSIGHTS_FILE: &str = "analysis_insights.json";
pub const TAXONOMY_FILE: &str = "app_taxonomy.json";

/// Shape of `app_taxonomy.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyReport {
    pub summary: BTreeMap<TaxonomyBucket, usize>,
    pub taxonomy: Taxonomy,
}

/// Where each result file was written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPaths {
    pub statistics: PathBuf,
    pub scored: PathBuf,
    pub insights: PathBuf,
    pub taxonomy: PathBuf,
}

impl ReportPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            statistics: dir.join(STATISTICS_FILE),
            scored: dir.join(SCORED_FILE),
            insights: dir.join(INSIGHTS_FILE),
            taxonomy: dir.join(TAXONOMY_FILE),
        }
    }
}

/// Write all four result files into `output_dir`, creating it if needed
pub fn write_report(output_dir: &Path, results: &AnalysisResults) -> Result<ReportPaths> {
    std::fs::create_dir_all(output_dir)?;
    let paths = ReportPaths::in_dir(output_dir);

    write_json(&paths.statistics, &results.statistics)?;
    write_json(&paths.scored, &results.scored)?;
    write_json(&paths.insights, &results.insights)?;
    write_json(
        &paths.taxonomy,
        &TaxonomyReport {
            summary: results.taxonomy.summary(),
            taxonomy: results.taxonomy.clone(),
        },
    )?;

    info!("Saved analysis results to {}", output_dir.display());
    Ok(paths)
}

/// Read back a statistics file
pub fn read_statistics(path: &Path) -> Result<StatisticsSummary> {
    read_json(path)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    debug!("Writing {}", path.display());
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
