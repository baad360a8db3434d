//! Analyze command implementation

use crate::analysis::{run_analysis, write_report, AnalysisResults, FrequencyTable, ReportPaths};
use crate::config::Config;
use crate::dataset::load_records;
use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Overrides for an analysis run
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// How an analysis run ended
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalyzeOutcome {
    /// The dataset was missing or empty; nothing was written
    NoData { input: PathBuf },
    Completed {
        results: Box<AnalysisResults>,
        paths: ReportPaths,
    },
}

/// Load the dataset, analyze it, and persist the results
pub fn cmd_analyze(config: &Config, options: AnalyzeOptions) -> Result<AnalyzeOutcome> {
    let input = options.input.unwrap_or_else(|| config.input_path());
    let output_dir = options.output_dir.unwrap_or_else(|| config.output_dir());

    let records = load_records(&input)?;
    if records.is_empty() {
        warn!("No records to analyze in {}", input.display());
        return Ok(AnalyzeOutcome::NoData { input });
    }

    let results = run_analysis(&records, config.analysis.high_complexity_threshold);
    let paths = write_report(&output_dir, &results)?;
    info!("Analysis complete: {} apps", results.statistics.total_apps);

    Ok(AnalyzeOutcome::Completed {
        results: Box::new(results),
        paths,
    })
}

/// Print the analysis report to console
pub fn print_analysis_report(outcome: &AnalyzeOutcome, examples: usize) {
    let (results, paths) = match outcome {
        AnalyzeOutcome::NoData { input } => {
            println!("{}", no_data_message(input));
            return;
        }
        AnalyzeOutcome::Completed { results, paths } => (results, paths),
    };

    println!("\n📊 App Template Analysis\n");

    println!("💡 Key Insights:");
    for insight in &results.insights.insights {
        println!("  • {}", insight);
    }

    let total = results.statistics.total_apps;
    println!("\n📂 Category Distribution:");
    print_distribution(&results.statistics.categories, total);

    println!("\n🏭 Industry Distribution:");
    print_distribution(&results.statistics.industries, total);

    println!("\n🗂  App Taxonomy:");
    for (bucket, apps) in results.taxonomy.iter() {
        println!("  {}: {} apps", bucket, apps.len());
        let names: Vec<&str> = apps.iter().take(examples).map(|a| a.name()).collect();
        if !names.is_empty() {
            println!("    e.g. {}", names.join(", "));
        }
    }

    println!("\n💾 Results saved:");
    for path in [&paths.statistics, &paths.scored, &paths.insights, &paths.taxonomy] {
        println!("  {}", path.display());
    }
}

/// Console line for a run that found nothing to analyze
pub fn no_data_message(input: &Path) -> String {
    format!("❌ No data available for analysis ({})", input.display())
}

fn print_distribution(table: &FrequencyTable, total: usize) {
    for (label, count) in table {
        println!("  {}: {} ({:.1}%)", label, count, percentage(*count, total));
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{read_statistics, TaxonomyBucket};
    use tempfile::TempDir;

    fn config_in(tmp: &TempDir) -> Config {
        let mut config = Config::default();
        config.paths.base_dir = tmp.path().to_path_buf();
        config
    }

    fn write_dataset(config: &Config, content: &str) {
        let input = config.input_path();
        std::fs::create_dir_all(input.parent().unwrap()).unwrap();
        std::fs::write(input, content).unwrap();
    }

    #[test]
    fn test_header_only_dataset_stops_early() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(&tmp);
        write_dataset(&config, "name,category,industry,source,features,description\n");

        let outcome = cmd_analyze(&config, AnalyzeOptions::default()).unwrap();
        assert!(matches!(outcome, AnalyzeOutcome::NoData { .. }));
        assert!(!config.output_dir().exists());
    }

    #[test]
    fn test_missing_dataset_stops_early() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(&tmp);
        let outcome = cmd_analyze(&config, AnalyzeOptions::default()).unwrap();

        let AnalyzeOutcome::NoData { input } = outcome else {
            panic!("expected no data");
        };
        assert_eq!(input, config.input_path());

        let message = no_data_message(&input);
        assert!(message.starts_with("❌ No data available for analysis"));
        assert!(message.contains("base44_apps.csv"));
    }

    #[test]
    fn test_full_pipeline() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(&tmp);
        write_dataset(
            &config,
            "name,category,industry,source,features,description\n\
             Ledger,Internal Tool,Finance,catalog,\"authentication, database, dashboard\",Invoices\n\
             Portal,Customer Portal,Retail,catalog,search,Self-service bookings\n\
             Notes,,,manual,,Plan my week\n",
        );

        let outcome = cmd_analyze(&config, AnalyzeOptions::default()).unwrap();
        let AnalyzeOutcome::Completed { results, paths } = outcome else {
            panic!("expected a completed analysis");
        };

        assert_eq!(results.statistics.total_apps, 3);
        assert_eq!(results.scored[0].complexity_score, 4.0);
        assert_eq!(results.taxonomy.total(), 3);
        assert_eq!(
            results.taxonomy.bucket(TaxonomyBucket::CustomerTools)[0].name(),
            "Portal"
        );
        assert_eq!(read_statistics(&paths.statistics).unwrap(), results.statistics);
        assert!(paths.statistics.starts_with(config.output_dir()));
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(1, 0), 0.0);
    }
}
