//! Output reporters for docgrade evaluations
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::models::Evaluation;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Default number of entities listed by the text reporter
pub const DEFAULT_TOP: usize = 20;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render an evaluation in the specified format.
///
/// `top` limits the entity table of the text format; JSON always carries
/// every entity.
pub fn render(evaluation: &Evaluation, format: OutputFormat, top: usize) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(evaluation, top),
        OutputFormat::Json => json::render(evaluation),
    }
}
