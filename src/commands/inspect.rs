//! Inspect command implementation

use crate::config::Config;
use crate::crawl::{inspect_raw, RawDiagnostics};
use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::info;

/// Run the raw-text diagnostic on a previously saved page
pub fn cmd_inspect(config: &Config, file: Option<PathBuf>) -> Result<RawDiagnostics> {
    let path = file.unwrap_or_else(|| config.raw_output_path());
    if !path.exists() {
        return Err(Error::Other(format!(
            "Raw page not found: {} (run 'appatlas scrape' first)",
            path.display()
        )));
    }

    info!("Inspecting {}", path.display());
    let html = std::fs::read_to_string(&path)?;
    Ok(inspect_raw(&html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_inspect_saved_page() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.paths.base_dir = tmp.path().to_path_buf();
        std::fs::write(
            config.raw_output_path(),
            r#"<html><body><div id="__next"></div><script id="__NEXT_DATA__">{}</script></body></html>"#,
        )
        .unwrap();

        let diagnostics = cmd_inspect(&config, None).unwrap();
        assert!(diagnostics.minimal_static_content);
        assert_eq!(diagnostics.script_count, 1);
        assert!(diagnostics
            .frameworks
            .contains(&crate::crawl::SpaFramework::NextJs));
    }

    #[test]
    fn test_inspect_missing_file() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.html");
        assert!(cmd_inspect(&Config::default(), Some(missing)).is_err());
    }
}
