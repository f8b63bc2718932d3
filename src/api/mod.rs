//! Upstream plugin-directory API
//!
//! This module contains everything that talks to the remote API:
//! - HTTP client construction
//! - The "popular" catalog listing (one page at a time)
//! - Per-plugin detail records
//!
//! Both request kinds make exactly one attempt and surface failures as
//! `CatalogError`; deciding what a failure means for the run is left to the
//! harvest coordinator.

mod client;
mod details;
mod lister;

pub use client::{build_http_client, ApiClient};
pub use details::{fetch_plugin_details, DetailRecord, DETAIL_FIELDS};
pub use lister::{fetch_page, ListingEntry};
