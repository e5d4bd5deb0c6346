//! Grade command - evaluate an extractor output file

use super::{resolve_config, DEFAULT_WORKERS};
use anyhow::{bail, Context, Result};
use console::style;
use docgrade::config::ProjectConfig;
use docgrade::reporters::{self, OutputFormat, DEFAULT_TOP};
use docgrade::{Evaluation, Grade, Pipeline};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Flags of one `grade` invocation
pub(super) struct GradeOptions {
    pub dir: PathBuf,
    pub input: PathBuf,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub top: Option<usize>,
    pub fail_under: Option<Grade>,
    pub workers: usize,
}

/// Effective settings after merging flags with project config defaults
#[derive(Debug, PartialEq)]
struct Settings {
    format: OutputFormat,
    top: usize,
    fail_under: Option<Grade>,
    workers: usize,
}

/// Flags win; config defaults fill in what was not given
fn apply_config_defaults(opts: &GradeOptions, config: &ProjectConfig) -> Result<Settings> {
    let defaults = &config.defaults;

    let format = match opts.format.as_deref().or(defaults.format.as_deref()) {
        Some(f) => OutputFormat::from_str(f)?,
        None => OutputFormat::default(),
    };

    let fail_under = match (opts.fail_under, defaults.fail_under.as_deref()) {
        (Some(g), _) => Some(g),
        (None, Some(s)) => match Grade::parse(s) {
            Some(g) => Some(g),
            None => bail!("Invalid fail_under '{}' in config (expected A, B, C or U)", s),
        },
        (None, None) => None,
    };

    let workers = if opts.workers == DEFAULT_WORKERS {
        defaults.workers.unwrap_or(opts.workers).clamp(1, 64)
    } else {
        opts.workers
    };

    Ok(Settings {
        format,
        top: opts.top.or(defaults.top).unwrap_or(DEFAULT_TOP),
        fail_under,
        workers,
    })
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read records from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Run the whole pipeline on a dedicated pool sized by `workers`
fn evaluate(config: &ProjectConfig, input: &str, workers: usize) -> Result<Evaluation> {
    let pipeline = Pipeline::default()
        .with_scorer(config.scorer())
        .with_aggregator(Box::new(config.aggregator()));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;
    debug!("Grading with {} workers", workers);

    let evaluation = pool.install(|| pipeline.run_input(input))?;
    Ok(evaluation)
}

/// Run the grade command
pub(super) fn run(opts: GradeOptions) -> Result<()> {
    let config = resolve_config(&opts.dir, opts.config.as_deref())?;
    let settings = apply_config_defaults(&opts, &config)?;

    let input = read_input(&opts.input)?;
    let evaluation = evaluate(&config, &input, settings.workers)
        .with_context(|| format!("Failed to grade {}", opts.input.display()))?;

    let output = reporters::render(&evaluation, settings.format, settings.top)?;

    if let Some(out_path) = &opts.output {
        std::fs::write(out_path, &output)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        // stderr keeps stdout clean for piping
        eprintln!(
            "Report written to: {}",
            style(out_path.display()).cyan()
        );
    } else {
        println!("{}", output);
    }

    check_fail_threshold(settings.fail_under, &evaluation);
    Ok(())
}

/// Exit with code 1 when the project grade is below the threshold
fn check_fail_threshold(fail_under: Option<Grade>, evaluation: &Evaluation) {
    if let Some(threshold) = fail_under {
        if evaluation.project.grade < threshold {
            eprintln!(
                "Failing due to --fail-under={}: project grade is {}",
                threshold, evaluation.project.grade
            );
            std::process::exit(1);
        }
    }
}
