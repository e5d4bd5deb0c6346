//! CLI command definitions and handlers

mod grade;
mod init;
mod roles;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docgrade::config::{load_config_file, load_project_config, ProjectConfig};
use docgrade::Grade;
use std::path::{Path, PathBuf};

/// Default for `--workers`; a project config value applies only when the flag is left at this
pub(crate) const DEFAULT_WORKERS: usize = 8;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Parse a grade letter (A, B, C, U)
fn parse_grade(s: &str) -> Result<Grade, String> {
    Grade::parse(s).ok_or_else(|| format!("'{}' is not a grade (A, B, C, U)", s))
}

/// docgrade - Documentation grades for extracted code entities
#[derive(Parser, Debug)]
#[command(name = "docgrade")]
#[command(
    version,
    about = "Grade documentation quality from documentation extractor output",
    long_about = "docgrade reads the entity records produced by a documentation \
extractor (for example `jsdoc -X`), evaluates a weighted role catalog against every \
entity and reports per-entity and project grades (A, B, C, U).",
    after_help = "\
Examples:
  jsdoc -X src > doclets.json
  docgrade grade doclets.json                    Grade and print the worst entities
  docgrade grade doclets.json --format json      JSON output for scripting
  docgrade grade doclets.json --fail-under B     Exit code 1 below grade B (CI mode)
  docgrade roles                                 Show the effective role weights
  docgrade init                                  Write an example docgrade.toml"
)]
pub struct Cli {
    /// Project directory holding docgrade.toml (default: current directory)
    #[arg(long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64)
    #[arg(long, global = true, default_value = "8", value_parser = parse_workers)]
    pub workers: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grade the entities of an extractor output file
    #[command(after_help = "\
Examples:
  docgrade grade doclets.json                      Text report, 20 worst entities
  docgrade grade doclets.json --top 50             Show 50 entities
  docgrade grade - < doclets.json                  Read records from stdin
  docgrade grade doclets.json -f json -o out.json  Write JSON to a file
  docgrade grade doclets.json --fail-under C       Exit code 1 if the project grade is U")]
    Grade {
        /// Extractor output: a JSON array of records or {\"docs\": [...]}; `-` reads stdin
        input: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Config file to use instead of the project directory's docgrade.toml
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Number of entities listed in text output
        #[arg(long)]
        top: Option<usize>,

        /// Exit with code 1 if the project grade is below this grade
        #[arg(long, value_parser = parse_grade)]
        fail_under: Option<Grade>,
    },

    /// List the role catalog with effective priorities
    Roles {
        /// Config file to use instead of the project directory's docgrade.toml
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a docgrade.toml config file with example settings
    Init,
}

/// Explicit config files are strict; the project directory lookup is lenient
pub(crate) fn resolve_config(dir: &Path, explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => load_config_file(path),
        None => Ok(load_project_config(dir)),
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => init::run(&cli.dir),

        Commands::Roles { config, json } => roles::run(&cli.dir, config.as_deref(), json),

        Commands::Grade {
            input,
            format,
            output,
            config,
            top,
            fail_under,
        } => grade::run(grade::GradeOptions {
            dir: cli.dir,
            input,
            format,
            output,
            config,
            top,
            fail_under,
            workers: cli.workers,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_workers() {
        assert_eq!(parse_workers("4"), Ok(4));
        assert!(parse_workers("0").is_err());
        assert!(parse_workers("65").is_err());
        assert!(parse_workers("many").is_err());
    }

    #[test]
    fn test_parse_grade_flag() {
        let cli = Cli::try_parse_from(["docgrade", "grade", "in.json", "--fail-under", "b"]).unwrap();
        match cli.command {
            Commands::Grade { fail_under, .. } => assert_eq!(fail_under, Some(Grade::B)),
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["docgrade", "grade", "in.json", "--fail-under", "F"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["docgrade", "roles", "--workers", "2", "--dir", "/tmp"]).unwrap();
        assert_eq!(cli.workers, 2);
        assert_eq!(cli.dir, PathBuf::from("/tmp"));
    }
}
