//! Page capability probing
//!
//! Decides whether a catalog page carries its content in the initial
//! response or only renders it client-side. Two independent entry points:
//! - [`probe_document`] works on a parsed tree and returns candidate
//!   card elements when it finds any
//! - [`inspect_raw`] works on raw HTML text (e.g. the saved side file)
//!   and reports framework signatures, API paths and text volume
//!
//! Both share only [`MIN_STATIC_TEXT_CHARS`] and [`FRAMEWORK_SIGNATURES`].

use crate::parse::{plain_text, visible_text};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

/// Below this many characters of plain text a page counts as mostly empty
pub const MIN_STATIC_TEXT_CHARS: usize = 500;

/// Class-name fragments that mark catalog cards
pub const CANDIDATE_CLASS_WORDS: [&str; 4] = ["template", "app", "card", "item"];

/// Ids client-side frameworks mount into
pub const MOUNT_POINT_IDS: [&str; 4] = ["root", "app", "__next", "__nuxt"];

/// Known client frameworks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpaFramework {
    React,
    Vue,
    Angular,
    NextJs,
    Nuxt,
    Svelte,
}

impl std::fmt::Display for SpaFramework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpaFramework::React => write!(f, "React"),
            SpaFramework::Vue => write!(f, "Vue"),
            SpaFramework::Angular => write!(f, "Angular"),
            SpaFramework::NextJs => write!(f, "Next.js"),
            SpaFramework::Nuxt => write!(f, "Nuxt"),
            SpaFramework::Svelte => write!(f, "Svelte"),
        }
    }
}

/// Lower-case substrings that betray each framework
pub static FRAMEWORK_SIGNATURES: &[(SpaFramework, &[&str])] = &[
    (SpaFramework::React, &["react", "data-reactroot"]),
    (SpaFramework::Vue, &["vue", "data-v-"]),
    (SpaFramework::Angular, &["angular", "ng-version"]),
    (SpaFramework::NextJs, &["__next_data__", "_next/static"]),
    (SpaFramework::Nuxt, &["__nuxt", "/_nuxt/"]),
    (SpaFramework::Svelte, &["svelte"]),
];

/// Substrings hinting that content arrives through an API call
pub static API_PATH_MARKERS: &[&str] = &["/api/", "/graphql", "/v1/", "/rest/"];

static API_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"/api/[A-Za-z0-9_\-/.]+"#).expect("valid api path regex"));
static SCRIPT_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<script\b").expect("valid script regex"));
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"));

/// Frameworks whose signatures occur in `html`
pub fn detect_frameworks(html: &str) -> Vec<SpaFramework> {
    let html_lower = html.to_lowercase();
    FRAMEWORK_SIGNATURES
        .iter()
        .filter(|(_, signatures)| signatures.iter().any(|s| html_lower.contains(s)))
        .map(|(framework, _)| *framework)
        .collect()
}

/// Why a page was judged to need client-side rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DynamicReason {
    /// A framework mount point exists and the page has no visible text
    EmptyMountPoint { id: String },
    /// Nothing looks like a catalog card
    NoCandidates,
}

impl std::fmt::Display for DynamicReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DynamicReason::EmptyMountPoint { id } => {
                write!(f, "empty #{} mount point and no visible text", id)
            }
            DynamicReason::NoCandidates => write!(f, "no template/app/card/item elements found"),
        }
    }
}

/// Result of probing a parsed document
#[derive(Debug)]
pub enum ProbeOutcome<'a> {
    /// Content must be rendered client-side
    Dynamic {
        reason: DynamicReason,
        frameworks: Vec<SpaFramework>,
    },
    /// Tentative catalog cards found in the static markup
    Candidates(Vec<ElementRef<'a>>),
}

impl ProbeOutcome<'_> {
    pub fn needs_js_rendering(&self) -> bool {
        matches!(self, ProbeOutcome::Dynamic { .. })
    }
}

/// Probe a parsed document for statically present catalog content
pub fn probe_document(document: &Html) -> ProbeOutcome<'_> {
    let text = visible_text(document);

    if text.is_empty() {
        if let Some(id) = find_mount_point(document) {
            debug!("Found empty #{} mount point", id);
            return ProbeOutcome::Dynamic {
                reason: DynamicReason::EmptyMountPoint { id },
                frameworks: detect_frameworks(&document.html()),
            };
        }
    }

    let candidates = find_candidates(document);
    debug!("Found {} candidate elements", candidates.len());

    if candidates.is_empty() {
        ProbeOutcome::Dynamic {
            reason: DynamicReason::NoCandidates,
            frameworks: detect_frameworks(&document.html()),
        }
    } else {
        ProbeOutcome::Candidates(candidates)
    }
}

fn find_mount_point(document: &Html) -> Option<String> {
    MOUNT_POINT_IDS.iter().find_map(|id| {
        let selector = Selector::parse(&format!("[id=\"{}\"]", id)).ok()?;
        document.select(&selector).next().map(|_| id.to_string())
    })
}

/// Elements whose class attribute contains any candidate word
pub fn find_candidates(document: &Html) -> Vec<ElementRef<'_>> {
    let selector_text = CANDIDATE_CLASS_WORDS
        .iter()
        .map(|w| format!("[class*=\"{}\"]", w))
        .collect::<Vec<_>>()
        .join(", ");

    let Ok(selector) = Selector::parse(&selector_text) else {
        return Vec::new();
    };
    document.select(&selector).collect()
}

/// Findings from scanning raw HTML text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDiagnostics {
    pub title: Option<String>,
    pub html_bytes: usize,
    pub text_chars: usize,
    pub script_count: usize,
    pub frameworks: Vec<SpaFramework>,
    pub api_markers: Vec<String>,
    pub api_paths: Vec<String>,
    pub minimal_static_content: bool,
    pub findings: Vec<String>,
}

impl RawDiagnostics {
    /// Whether the page most likely needs a browser to show its content
    pub fn needs_js_rendering(&self) -> bool {
        self.minimal_static_content && (!self.frameworks.is_empty() || self.script_count > 0)
    }
}

/// Scan raw HTML without building a tree
pub fn inspect_raw(html: &str) -> RawDiagnostics {
    let html_lower = html.to_lowercase();
    let mut diagnostics = RawDiagnostics {
        html_bytes: html.len(),
        ..Default::default()
    };

    diagnostics.title = TITLE_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| crate::parse::normalize_whitespace(m.as_str()))
        .filter(|t| !t.is_empty());

    diagnostics.script_count = SCRIPT_TAG_RE.find_iter(html).count();

    diagnostics.frameworks = detect_frameworks(html);
    for framework in &diagnostics.frameworks {
        diagnostics
            .findings
            .push(format!("{} signatures detected", framework));
    }

    diagnostics.api_markers = API_PATH_MARKERS
        .iter()
        .filter(|m| html_lower.contains(*m))
        .map(|m| m.to_string())
        .collect();

    let mut paths: Vec<String> = API_PATH_RE
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect();
    paths.sort();
    paths.dedup();
    diagnostics.api_paths = paths;

    if !diagnostics.api_markers.is_empty() {
        diagnostics.findings.push(format!(
            "API references found: {}",
            diagnostics.api_markers.join(", ")
        ));
    }

    diagnostics.text_chars = plain_text(html).chars().count();
    diagnostics.minimal_static_content = diagnostics.text_chars < MIN_STATIC_TEXT_CHARS;
    if diagnostics.minimal_static_content {
        diagnostics.findings.push(format!(
            "Minimal static content: {} characters of text (< {})",
            diagnostics.text_chars, MIN_STATIC_TEXT_CHARS
        ));
    }

    if diagnostics.needs_js_rendering() {
        diagnostics.findings.push(
            "Content is rendered client-side; a headless browser is needed to load it"
                .to_string(),
        );
    }

    diagnostics
}
