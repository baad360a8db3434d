//! Default values for configuration

/// Default catalog page to scrape
pub fn default_scrape_url() -> String {
    std::env::var("APPATLAS_CATALOG_URL")
        .unwrap_or_else(|_| "https://base44.com/templates".to_string())
}

/// Default user agent (a common desktop Chrome build)
pub fn default_scrape_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

/// Default Accept-Language header
pub fn default_scrape_accept_language() -> String {
    "en-US,en;q=0.5".to_string()
}

/// Default request timeout in seconds
pub fn default_scrape_timeout() -> u64 {
    10
}

/// Default side file for the raw response body
pub fn default_scrape_raw_output() -> String {
    "raw_base44_page.html".to_string()
}

/// Default number of candidates printed after a scrape
pub fn default_scrape_candidate_sample() -> usize {
    5
}

/// Default dataset location
pub fn default_analysis_input() -> String {
    "data/raw/base44_apps.csv".to_string()
}

/// Default output directory for analysis results
pub fn default_analysis_output_dir() -> String {
    "data/processed".to_string()
}

/// Default score at which an app counts as high complexity
pub fn default_high_complexity_threshold() -> f64 {
    7.0
}

/// Default number of example names per taxonomy bucket in the console report
pub fn default_taxonomy_examples() -> usize {
    3
}
