//! Init command - write an example docgrade.toml

use anyhow::{Context, Result};
use console::style;
use docgrade::config::CONFIG_FILE_NAME;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# docgrade configuration

[roles]
# Weight for the documentation and code-example roles (WithDoc,
# WithoutDoc, WithCodeExample, WithoutCodeExample) unless listed below
default_priority = 0

[roles.priorities]
# Role names accept any casing: WithDoc, with_doc, with-doc
WithDoc = 4
WithoutDoc = -4
TaggedAsNodoc = -5
InRoot = 3
Public = 2
Protected = 1
Private = -2
WithCodeExample = 1
WithoutCodeExample = -1

[grades]
# A when score >= a, B when score >= b, C when score > c, otherwise U
a = 6
b = 3
c = 0

[aggregation]
# Project score is the weighted mean of entity scores
root_weight = 1.0
member_weight = 2.0
# Count entities marked nodoc towards the project score
include_nodoc = false

[defaults]
# Default output format (text, json)
format = "text"

# Entities listed in text output
# top = 20

# Fail when the project grade is below this grade
# fail_under = "C"
"#;

/// Run the init command
pub(super) fn run(path: &Path) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!(
            "{} Config already exists at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!(
        "\nNext: {}",
        style("docgrade grade <extractor-output.json>").bold()
    );
    Ok(())
}
