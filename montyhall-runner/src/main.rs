mod logic;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use logic::{ExperimentPlan, resolve_seed_inputs, run_plan};
use montyhall_game::{
    DEFAULT_TRIAL_COUNT, ExperimentConfig, ExperimentError, ExperimentReport, ExperimentStyle,
    ensure_trial_count,
};
use util::split_csv;

/// `--style` value: one aggregation style, or every style in turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleArg {
    All,
    Only(ExperimentStyle),
}

impl StyleArg {
    fn styles(self) -> Vec<ExperimentStyle> {
        match self {
            Self::All => ExperimentStyle::ALL.to_vec(),
            Self::Only(style) => vec![style],
        }
    }
}

fn parse_style_arg(raw: &str) -> Result<StyleArg, ExperimentError> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(StyleArg::All);
    }
    raw.parse().map(StyleArg::Only)
}

#[derive(Debug, Parser)]
#[command(name = "montyhall", version)]
#[command(about = "Estimate Monty Hall switch/keep win rates by simulating many rounds")]
struct Args {
    /// Trials per strategy (interleaved runs play twice this many in total)
    #[arg(long)]
    trials: Option<u64>,

    /// Aggregation style: declarative, sequential, interleaved or all
    /// (pipeline, loop and imperative are accepted as aliases)
    #[arg(long, value_parser = parse_style_arg)]
    style: Option<StyleArg>,

    /// Seeds to run (comma-separated integers, 0x-hex, or `random`)
    #[arg(long)]
    seeds: Option<String>,

    /// JSON experiment config; explicit flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let plan = build_plan(&args)?;
    if args.report == "console" && args.output.is_none() {
        announce_banner();
    }

    let start_time = Instant::now();
    let reports = run_plan(&plan)?;
    write_reports(&args, &reports, start_time)?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn announce_banner() {
    println!("{}", "🚪 Monty Hall Simulator".bright_cyan().bold());
    println!("{}", "=======================".cyan());
}

fn load_file_config(path: &Path) -> Result<ExperimentConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    ExperimentConfig::from_json(&raw)
        .with_context(|| format!("failed to load config {}", path.display()))
}

fn build_plan(args: &Args) -> Result<ExperimentPlan> {
    let file_config = args.config.as_deref().map(load_file_config).transpose()?;

    let trial_count = args
        .trials
        .or(file_config.map(|c| c.trial_count))
        .unwrap_or(DEFAULT_TRIAL_COUNT);
    ensure_trial_count(trial_count).context("--trials must be at least 1")?;

    let styles = match (args.style, file_config) {
        (Some(style), _) => style.styles(),
        (None, Some(config)) => vec![config.style],
        (None, None) => StyleArg::All.styles(),
    };

    let seed_tokens = args.seeds.as_deref().map(split_csv).unwrap_or_default();
    let seeds = resolve_seed_inputs(&seed_tokens, file_config.and_then(|c| c.seed))?;
    for info in seeds.iter().filter(|info| info.from_entropy) {
        log::info!("drew seed {} from entropy", info.seed);
    }

    Ok(ExperimentPlan {
        trial_count,
        styles,
        seeds,
    })
}

fn write_reports(args: &Args, reports: &[ExperimentReport], start_time: Instant) -> Result<()> {
    let mut out = open_output(args.output.as_deref())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut out, reports)?,
        "markdown" => logic::reports::generate_markdown_report(&mut out, reports)?,
        "csv" => logic::reports::generate_csv_report(&mut out, reports)?,
        _ => {
            let duration = start_time.elapsed();
            logic::reports::generate_console_report(&mut out, reports, duration)?;
        }
    }

    out.flush().context("failed to flush report output")?;
    Ok(())
}

/// Buffered sink for the report: the `--output` file when given, else stdout.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(stdout().lock())));
    };
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
