//! Roles command - show the effective role catalog

use super::resolve_config;
use anyhow::Result;
use console::style;
use docgrade::roles::{Evidence, Role, RoleCatalog};
use docgrade::scoring::GradeThresholds;
use serde_json::json;
use std::path::Path;

/// Run the roles command
pub(super) fn run(dir: &Path, config: Option<&Path>, as_json: bool) -> Result<()> {
    let config = resolve_config(dir, config)?;
    let scorer = config.scorer();

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&catalog_json(scorer.catalog(), scorer.thresholds()))?
        );
        return Ok(());
    }

    println!("\n{}\n", style("Role catalog").bold());
    println!(
        "  {:<20} {:<14} {:<8} {:>8}",
        style("ROLE").dim(),
        style("GROUP").dim(),
        style("KIND").dim(),
        style("PRIORITY").dim()
    );
    for role in scorer.catalog().roles() {
        let priority = format!("{:+}", role.priority());
        let priority = if role.priority() < 0 {
            style(priority).red()
        } else if role.priority() > 0 {
            style(priority).green()
        } else {
            style(priority).dim()
        };
        println!(
            "  {:<20} {:<14} {:<8} {:>8}",
            style(role.name()).cyan(),
            group_name(role),
            evidence_name(role.evidence()),
            priority
        );
    }

    let t = scorer.thresholds();
    println!(
        "\n{} A >= {}, B >= {}, C > {}, otherwise U\n",
        style("Grades:").bold(),
        t.a,
        t.b,
        t.c
    );
    Ok(())
}

fn group_name(role: &Role) -> &'static str {
    role.group().map(|g| g.name()).unwrap_or("-")
}

fn evidence_name(evidence: Evidence) -> &'static str {
    match evidence {
        Evidence::Present => "present",
        Evidence::Missing => "missing",
    }
}

fn catalog_json(catalog: &RoleCatalog, thresholds: &GradeThresholds) -> serde_json::Value {
    let roles: Vec<_> = catalog
        .roles()
        .iter()
        .map(|role| {
            json!({
                "name": role.name(),
                "group": role.group().map(|g| g.name()),
                "evidence": role.evidence(),
                "priority": role.priority(),
            })
        })
        .collect();

    json!({
        "roles": roles,
        "grades": { "a": thresholds.a, "b": thresholds.b, "c": thresholds.c },
    })
}
