//! Project-level configuration support
//!
//! Loads per-project configuration from `docgrade.toml` or `.docgraderc.json`
//! in the project directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # docgrade.toml
//!
//! [roles]
//! default_priority = 0
//!
//! [roles.priorities]
//! with-doc = 4
//! without-code-example = 0
//!
//! [grades]
//! a = 6
//! b = 3
//! c = 0
//!
//! [aggregation]
//! root_weight = 1.0
//! member_weight = 2.0
//! include_nodoc = false
//!
//! [defaults]
//! format = "text"
//! workers = 8
//! fail_under = "B"
//! ```

use crate::roles::{PriorityTable, RoleCatalog};
use crate::scoring::{GradeThresholds, Scorer, WeightedAverage};
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Preferred config file name
pub const CONFIG_FILE_NAME: &str = "docgrade.toml";

/// JSON alternative, checked after the TOML file
pub const JSON_CONFIG_FILE_NAME: &str = ".docgraderc.json";

/// Project-level configuration loaded from docgrade.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Role priority overrides
    #[serde(default)]
    pub roles: RolesConfig,

    /// Grade tier thresholds
    #[serde(default)]
    pub grades: GradeThresholds,

    /// Project score rollup
    #[serde(default)]
    pub aggregation: AggregationConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Role weight configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RolesConfig {
    /// Weight for roles without an explicit entry (default: 0)
    #[serde(default)]
    pub default_priority: Option<i32>,

    /// Per-role weights, keyed by role name in any casing
    #[serde(default)]
    pub priorities: HashMap<String, i32>,
}

/// Weights for the project score
#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    /// Weight of root entities (default: 1.0)
    #[serde(default = "default_root_weight")]
    pub root_weight: f64,

    /// Weight of nested entities (default: 2.0)
    #[serde(default = "default_member_weight")]
    pub member_weight: f64,

    /// Count `nodoc` entities towards the project score (default: false)
    #[serde(default)]
    pub include_nodoc: bool,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            root_weight: default_root_weight(),
            member_weight: default_member_weight(),
            include_nodoc: false,
        }
    }
}

fn default_root_weight() -> f64 {
    1.0
}
fn default_member_weight() -> f64 {
    2.0
}

impl AggregationConfig {
    /// Weights must be non-negative and not both zero
    pub fn is_valid(&self) -> bool {
        self.root_weight >= 0.0
            && self.member_weight >= 0.0
            && self.root_weight + self.member_weight > 0.0
    }
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,

    /// Default number of workers
    #[serde(default)]
    pub workers: Option<usize>,

    /// Default number of entities listed in text output
    #[serde(default)]
    pub top: Option<usize>,

    /// Fail when the project grade is below this grade
    #[serde(default)]
    pub fail_under: Option<String>,
}

/// Load project configuration from the project directory.
///
/// Searches for configuration files in this order:
/// 1. `docgrade.toml`
/// 2. `.docgraderc.json`
///
/// Returns default configuration if no config file is found or the file
/// cannot be read.
pub fn load_project_config(project_dir: &Path) -> ProjectConfig {
    let toml_path = project_dir.join(CONFIG_FILE_NAME);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = project_dir.join(JSON_CONFIG_FILE_NAME);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load an explicitly named config file. Errors are returned, not swallowed.
///
/// `.json` files are read as JSON, everything else as TOML.
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        load_json_config(path)
    } else {
        load_toml_config(path)
    };
    config.with_context(|| format!("Failed to load config {}", path.display()))
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON file
fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}

impl ProjectConfig {
    /// Standard priorities with this config's overrides applied
    pub fn priority_table(&self) -> PriorityTable {
        let mut table = PriorityTable::standard();
        table.apply_overrides(self.roles.default_priority, &self.roles.priorities);
        table
    }

    pub fn catalog(&self) -> RoleCatalog {
        RoleCatalog::standard(&self.priority_table())
    }

    /// Scorer built from the effective catalog and thresholds
    pub fn scorer(&self) -> Scorer {
        Scorer::new(self.catalog(), self.grades)
    }

    /// Project aggregation policy; invalid weights fall back to defaults
    pub fn aggregator(&self) -> WeightedAverage {
        let agg = &self.aggregation;
        if !agg.is_valid() {
            warn!(
                "Invalid aggregation weights root={} member={}, using defaults",
                agg.root_weight, agg.member_weight
            );
            return WeightedAverage {
                include_nodoc: agg.include_nodoc,
                ..WeightedAverage::default()
            };
        }
        WeightedAverage {
            root_weight: agg.root_weight,
            member_weight: agg.member_weight,
            include_nodoc: agg.include_nodoc,
        }
    }
}
