//! Configuration module for docgrade
//!
//! This module handles:
//! - Project-level configuration (docgrade.toml)
//! - Role priority overrides
//! - Grade thresholds and project aggregation
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, AggregationConfig, CliDefaults, ProjectConfig,
    RolesConfig, CONFIG_FILE_NAME, JSON_CONFIG_FILE_NAME,
};
