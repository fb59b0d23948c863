//! # News Dashboard
//!
//! A news dashboard that fetches articles from a newsapi.org-style REST API
//! and renders them as cards in a static HTML page.
//!
//! ## Features
//!
//! - Top headlines filtered by country and category
//! - Full-text search, which takes precedence over the filters
//! - Country and category selects populated from JSON lookup files
//! - Toast notifications for errors and empty results
//! - Interactive mode: keep submitting the form from stdin
//!
//! ## Architecture
//!
//! Components, leaf-first:
//! 1. [`http`]: JSON HTTP client with a single-result outcome per request
//! 2. [`news`]: Query URL construction and the [`news::NewsApi`] seam
//! 3. [`lookups`]: Countries and categories lists
//! 4. [`ui`], [`loader`], [`render`]: The page model, busy overlay and cards
//! 5. [`controller`]: Initial-load and submit triggers
//! 6. [`outputs`]: Writing the page to disk

pub mod cli;
pub mod config;
pub mod controller;
pub mod http;
pub mod loader;
pub mod lookups;
pub mod models;
pub mod news;
pub mod outputs;
pub mod render;
pub mod ui;
pub mod utils;
