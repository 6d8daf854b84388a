//! Configuration management for the fencing ladder
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values for scoring and storage.

pub mod app;
pub mod scoring;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings, StorageSettings};
pub use scoring::ScoringConfig;
