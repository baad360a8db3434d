//! HTML text extraction and catalog card parsing

use super::normalize_whitespace;
use crate::models::{
    Record, FIELD_CATEGORY, FIELD_DESCRIPTION, FIELD_FEATURES, FIELD_ID, FIELD_INDUSTRY,
    FIELD_NAME, FIELD_SOURCE, FIELD_URL,
};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Source label given to records extracted from the live catalog
pub const SCRAPE_SOURCE: &str = "catalog_scrape";

/// Elements whose text never reaches the reader
const HIDDEN_TAGS: [&str; 5] = ["script", "style", "noscript", "template", "head"];

/// Visible text of the document body, whitespace-normalized
pub fn visible_text(document: &Html) -> String {
    let root = Selector::parse("body")
        .ok()
        .and_then(|s| document.select(&s).next())
        .unwrap_or_else(|| document.root_element());

    let mut out = String::new();
    collect_text(root, &mut out);
    normalize_whitespace(&out)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(el) = ElementRef::wrap(child) {
            let name = el.value().name();
            if !HIDDEN_TAGS.iter().any(|t| *t == name) {
                collect_text(el, out);
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        }
    }
}

/// Document `<title>`, if any
pub fn page_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|e| normalize_whitespace(&e.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

/// Plain text rendering of raw HTML, used where no tree is kept around
pub fn plain_text(raw_html: &str) -> String {
    let text = html2text::from_read(raw_html.as_bytes(), 80).unwrap_or_default();
    normalize_whitespace(&text)
}

/// Text of the first descendant matching `selector`
fn first_text(element: &ElementRef<'_>, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    element
        .select(&selector)
        .map(|e| normalize_whitespace(&e.text().collect::<String>()))
        .find(|t| !t.is_empty())
}

fn first_href(element: &ElementRef<'_>) -> Option<String> {
    if element.value().name() == "a" {
        if let Some(href) = element.value().attr("href") {
            return Some(href.to_string());
        }
    }
    let selector = Selector::parse("a[href]").ok()?;
    element
        .select(&selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

/// Short stable id derived from a record's url or name
pub fn record_id(key: &str) -> String {
    blake3::hash(key.as_bytes()).to_hex().as_str()[..16].to_string()
}

/// Build a record from one catalog card element.
///
/// Returns `None` when no name can be found.
pub fn extract_candidate(element: &ElementRef<'_>, base: Option<&Url>) -> Option<Record> {
    let name = first_text(element, "h1, h2, h3, h4, h5, h6")
        .or_else(|| first_text(element, "[class*=\"title\"], [class*=\"name\"]"))
        .or_else(|| {
            element
                .value()
                .attr("title")
                .or_else(|| element.value().attr("aria-label"))
                .map(normalize_whitespace)
        })
        .filter(|n| !n.is_empty())?;

    let url = first_href(element)
        .map(|href| match base {
            Some(base) => base
                .join(&href)
                .map(|u| u.to_string())
                .unwrap_or(href),
            None => href,
        })
        .unwrap_or_default();

    let description = first_text(element, "p, [class*=\"description\"]").unwrap_or_default();
    let category = first_text(element, "[class*=\"category\"], [class*=\"tag\"]").unwrap_or_default();

    let id = record_id(if url.is_empty() { &name } else { &url });

    Some(
        Record::new()
            .with(FIELD_ID, id)
            .with(FIELD_NAME, name)
            .with(FIELD_URL, url)
            .with(FIELD_DESCRIPTION, description)
            .with(FIELD_CATEGORY, category)
            .with(FIELD_INDUSTRY, "")
            .with(FIELD_FEATURES, "")
            .with(FIELD_SOURCE, SCRAPE_SOURCE),
    )
}

/// Extract records from candidate elements, dropping unnamed and duplicate ones
pub fn extract_candidates(elements: &[ElementRef<'_>], page_url: &str) -> Vec<Record> {
    let base = Url::parse(page_url).ok();
    let mut seen = HashSet::new();

    elements
        .iter()
        .filter_map(|el| extract_candidate(el, base.as_ref()))
        .filter(|record| seen.insert(record.id().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_skips_scripts() {
        let html = Html::parse_document(
            r#"<html><head><title>T</title><style>.a{}</style></head>
               <body><div id="root"></div><script>window.x = 1;</script></body></html>"#,
        );
        assert_eq!(visible_text(&html), "");
        assert_eq!(page_title(&html).as_deref(), Some("T"));
    }

    #[test]
    fn test_visible_text_keeps_content() {
        let html = Html::parse_document("<body><h1>Hello</h1><p>there   friend</p></body>");
        assert_eq!(visible_text(&html), "Hello there friend");
    }

    #[test]
    fn test_extract_candidate_fields() {
        let html = Html::parse_document(
            r#"<body><div class="template-card">
                 <a href="/templates/crm"><h3>Simple CRM</h3></a>
                 <p>Track leads and clients</p>
                 <span class="tag">Sales</span>
               </div></body>"#,
        );
        let selector = Selector::parse(".template-card").unwrap();
        let card = html.select(&selector).next().unwrap();
        let base = Url::parse("https://catalog.example/templates").unwrap();

        let record = extract_candidate(&card, Some(&base)).unwrap();
        assert_eq!(record.name(), "Simple CRM");
        assert_eq!(record.url(), "https://catalog.example/templates/crm");
        assert_eq!(record.description(), "Track leads and clients");
        assert_eq!(record.category(), "Sales");
        assert_eq!(record.field(FIELD_SOURCE), Some(SCRAPE_SOURCE));
        assert_eq!(record.id(), record_id("https://catalog.example/templates/crm"));
    }

    #[test]
    fn test_extract_candidates_dedupes_and_drops_unnamed() {
        let html = Html::parse_document(
            r#"<body>
                 <div class="card"><h2>One</h2></div>
                 <div class="card"><h2>One</h2></div>
                 <div class="card"><span>no heading</span></div>
               </body>"#,
        );
        let selector = Selector::parse(".card").unwrap();
        let cards: Vec<ElementRef> = html.select(&selector).collect();

        let records = extract_candidates(&cards, "https://catalog.example/");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "One");
        assert_eq!(records[0].url(), "");
    }

    #[test]
    fn test_record_id_is_stable() {
        assert_eq!(record_id("abc"), record_id("abc"));
        assert_eq!(record_id("abc").len(), 16);
        assert_ne!(record_id("abc"), record_id("abd"));
    }
}
