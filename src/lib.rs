//! appatlas: scrape an app-template catalog and analyze the collected dataset
//!
//! The pipeline runs ingest → normalize → score → classify → persist → report:
//! - [`crawl`] fetches the catalog page and probes it for static content
//! - [`dataset`] loads the collected records from CSV
//! - [`analysis`] computes statistics, complexity scores, insights and taxonomy
//! - [`commands`] wires the steps into CLI commands

pub mod analysis;
pub mod commands;
pub mod config;
pub mod crawl;
pub mod dataset;
pub mod error;
pub mod models;
pub mod parse;
pub mod progress;
