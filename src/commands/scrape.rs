//! Scrape command implementation

use crate::config::Config;
use crate::crawl::{
    inspect_raw, probe_document, save_raw_page, DynamicReason, Fetcher, ProbeOutcome,
    RawDiagnostics, SpaFramework,
};
use crate::dataset::write_records;
use crate::error::Result;
use crate::models::Record;
use crate::parse::extract_candidates;
use crate::progress::add_spinner;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Overrides for a scrape run
#[derive(Debug, Clone, Default)]
pub struct ScrapeOptions {
    /// Fetch this URL instead of the configured one
    pub url: Option<String>,
    /// Write extracted candidates to the dataset CSV
    pub export: bool,
}

/// How the scrape ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScrapeStatus {
    /// The request failed; nothing was saved
    FetchFailed { error: String },
    /// The page needs client-side rendering
    DynamicContent {
        reason: DynamicReason,
        frameworks: Vec<SpaFramework>,
    },
    /// Catalog cards were found in the static markup
    Candidates { count: usize },
}

/// Result of a scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeReport {
    pub url: String,
    pub http_status: Option<u16>,
    pub content_type: Option<String>,
    pub raw_output: Option<String>,
    pub status: ScrapeStatus,
    pub records: Vec<Record>,
    pub diagnostics: Option<RawDiagnostics>,
    pub exported_to: Option<String>,
}

impl ScrapeReport {
    pub fn failed(&self) -> bool {
        matches!(self.status, ScrapeStatus::FetchFailed { .. })
    }
}

/// Fetch the catalog page once, save it, and probe it for content.
///
/// Network failures are reported through [`ScrapeStatus::FetchFailed`];
/// only local failures (writing the side file or export) are errors.
pub async fn cmd_scrape(config: &Config, options: ScrapeOptions) -> Result<ScrapeReport> {
    let url = options.url.unwrap_or_else(|| config.scrape.url.clone());
    info!("Scraping {}", url);

    let fetcher = Fetcher::new(&config.scrape)?;
    let spinner = add_spinner(format!("Fetching {}", url));
    let fetched = fetcher.fetch(&url).await;
    spinner.finish_and_clear();

    let page = match fetched {
        Ok(page) => page,
        Err(e) if e.is_network() => {
            warn!("Fetch failed: {}", e);
            return Ok(ScrapeReport {
                url,
                http_status: None,
                content_type: None,
                raw_output: None,
                status: ScrapeStatus::FetchFailed {
                    error: e.to_string(),
                },
                records: Vec::new(),
                diagnostics: None,
                exported_to: None,
            });
        }
        Err(e) => return Err(e),
    };

    let raw_path = config.raw_output_path();
    save_raw_page(&raw_path, &page.body)?;

    let mut report = ScrapeReport {
        url: page.url.clone(),
        http_status: Some(page.status),
        content_type: page.content_type.clone(),
        raw_output: Some(raw_path.display().to_string()),
        status: ScrapeStatus::Candidates { count: 0 },
        records: Vec::new(),
        diagnostics: None,
        exported_to: None,
    };

    let document = page.document();
    match probe_document(&document) {
        ProbeOutcome::Dynamic { reason, frameworks } => {
            warn!("Page requires dynamic rendering: {}", reason);
            report.diagnostics = Some(inspect_raw(&page.body));
            report.status = ScrapeStatus::DynamicContent { reason, frameworks };
        }
        ProbeOutcome::Candidates(elements) => {
            info!("Found {} candidate elements", elements.len());
            report.status = ScrapeStatus::Candidates {
                count: elements.len(),
            };
            report.records = extract_candidates(&elements, &page.url);
        }
    }

    if options.export && !report.records.is_empty() {
        let path = config.input_path();
        write_records(&path, &report.records)?;
        report.exported_to = Some(path.display().to_string());
    }

    Ok(report)
}

/// Print scrape results to console
pub fn print_scrape_report(report: &ScrapeReport, sample: usize) {
    println!("\n🔍 Catalog scrape: {}\n", report.url);

    if let ScrapeStatus::FetchFailed { error } = &report.status {
        println!("❌ Error fetching page: {}", error);
        return;
    }

    if let Some(status) = report.http_status {
        println!(
            "  HTTP {} ({})",
            status,
            report.content_type.as_deref().unwrap_or("unknown content type")
        );
    }

    match &report.status {
        ScrapeStatus::FetchFailed { .. } => {}
        ScrapeStatus::DynamicContent { reason, frameworks } => {
            println!("⚠️  Page requires dynamic rendering ({})", reason);
            if !frameworks.is_empty() {
                let names: Vec<String> = frameworks.iter().map(|f| f.to_string()).collect();
                println!("   Frameworks: {}", names.join(", "));
            }
        }
        ScrapeStatus::Candidates { count } => {
            println!("✓ Found {} candidate elements", count);
            println!("  Extracted records: {}", report.records.len());
            for record in report.records.iter().take(sample) {
                if record.url().is_empty() {
                    println!("  • {}", record.name());
                } else {
                    println!("  • {} ({})", record.name(), record.url());
                }
            }
        }
    }

    if let Some(path) = &report.raw_output {
        println!("\n💾 Raw page saved to {}", path);
    }
    if let Some(path) = &report.exported_to {
        println!("💾 Records exported to {}", path);
    }
    if let Some(diagnostics) = &report.diagnostics {
        print_diagnostics(diagnostics);
    }
}

/// Print raw-page diagnostics to console
pub fn print_diagnostics(diagnostics: &RawDiagnostics) {
    println!("\n🧪 Page diagnostics\n");
    println!(
        "  Title: {}",
        diagnostics.title.as_deref().unwrap_or("(none)")
    );
    println!("  HTML size: {} bytes", diagnostics.html_bytes);
    println!("  Text content: {} characters", diagnostics.text_chars);
    println!("  Script tags: {}", diagnostics.script_count);

    if !diagnostics.api_paths.is_empty() {
        println!("  API paths:");
        for path in diagnostics.api_paths.iter().take(10) {
            println!("    - {}", path);
        }
    }

    if !diagnostics.findings.is_empty() {
        println!("\n  Findings:");
        for finding in &diagnostics.findings {
            println!("  • {}", finding);
        }
    }
}
