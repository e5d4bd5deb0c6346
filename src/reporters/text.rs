//! Text (terminal) reporter with colors and formatting

use crate::models::{EntityReport, Evaluation, Grade};
use anyhow::Result;

/// Grade colors (ANSI escape codes)
fn grade_color(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "\x1b[32m", // Green
        Grade::B => "\x1b[92m", // Light green
        Grade::C => "\x1b[33m", // Yellow
        Grade::U => "\x1b[31m", // Red
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Warnings listed before the rest are summarized
const MAX_WARNINGS: usize = 10;

/// Render an evaluation as formatted terminal output.
///
/// Entities are listed worst first so the table doubles as a to-do list.
pub fn render(eval: &Evaluation, top: usize) -> Result<String> {
    let mut out = String::new();
    let project = &eval.project;

    // Header
    let grade_c = grade_color(project.grade);
    out.push_str(&format!("\n{BOLD}Documentation Grade{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Score: {BOLD}{:.2}{RESET}  Grade: {grade_c}{BOLD}{}{RESET}  Entities: {}",
        project.score, project.grade, project.entity_count
    ));
    if eval.skipped > 0 {
        out.push_str(&format!("  Skipped: {}", eval.skipped));
    }
    out.push_str("\n\n");

    // Distribution
    out.push_str(&format!("{BOLD}GRADES{RESET}\n "));
    for grade in Grade::ALL {
        out.push_str(&format!(
            " {}{}{RESET}: {}",
            grade_color(grade),
            grade,
            project.distribution.count(grade)
        ));
    }
    out.push_str("\n\n");

    if eval.entities.is_empty() {
        out.push_str(&format!("{DIM}No entities found.{RESET}\n"));
        return Ok(out);
    }

    // Worst entities first
    let mut ranked: Vec<&EntityReport> = eval.entities.iter().collect();
    ranked.sort_by(|a, b| {
        a.score
            .cmp(&b.score)
            .then_with(|| a.full_name.cmp(&b.full_name))
    });

    let shown = top.min(ranked.len());
    out.push_str(&format!(
        "{BOLD}ENTITIES{RESET} (lowest {} of {})\n",
        shown,
        ranked.len()
    ));
    for entity in ranked.iter().take(shown) {
        out.push_str(&format_entity(entity));
    }
    if ranked.len() > shown {
        out.push_str(&format!(
            "  {DIM}... {} more (use --top to show more){RESET}\n",
            ranked.len() - shown
        ));
    }

    if !eval.warnings.is_empty() {
        out.push_str(&format!(
            "\n{BOLD}WARNINGS{RESET} ({} total)\n",
            eval.warnings.len()
        ));
        for warning in eval.warnings.iter().take(MAX_WARNINGS) {
            out.push_str(&format!("  {DIM}!{RESET} {}\n", warning));
        }
        if eval.warnings.len() > MAX_WARNINGS {
            out.push_str(&format!(
                "  {DIM}... {} more{RESET}\n",
                eval.warnings.len() - MAX_WARNINGS
            ));
        }
    }

    Ok(out)
}

fn format_entity(entity: &EntityReport) -> String {
    let mut line = format!(
        "  {}{BOLD}{}{RESET} {:>4}  {}",
        grade_color(entity.grade),
        entity.grade,
        entity.score,
        entity.full_name
    );
    if entity.nodoc {
        line.push_str(&format!(" {DIM}[nodoc]{RESET}"));
    }
    if let Some(loc) = entity.source_locations.first() {
        line.push_str(&format!(" {DIM}{}{RESET}", loc));
    }
    if !entity.suggestions.is_empty() {
        line.push_str(&format!(
            "\n        {DIM}missing: {}{RESET}",
            entity.suggestions.join(", ")
        ));
    }
    line.push('\n');
    line
}
