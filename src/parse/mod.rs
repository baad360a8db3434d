//! HTML parsing and text extraction
//!
//! This module handles:
//! - Visible text extraction from a parsed document tree
//! - Plain text extraction from raw HTML
//! - Turning catalog card elements into dataset records

mod html;

pub use html::*;

/// Collapse runs of whitespace into single spaces and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
