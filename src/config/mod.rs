//! Configuration module for Plugin-Catalog
//!
//! This module handles loading, clamping, and validating the JSON
//! configuration file that describes the upstream API and run limits.
//!
//! # Example
//!
//! ```no_run
//! use plugin_catalog::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config/config.json")).unwrap();
//! println!("Will request {} pages", config.total_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, MAX_REQUEST_LIMIT};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
