mod evaluation;
mod reports;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::{LevelFilter, info, warn};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use evaluation::{EvaluationOptions, EvaluationResult, run_evaluation};
use util::{coerce_rounds, expand_presets, split_csv};
use xeme_core::{
    Base, Calculator, Configuration, DEFAULT_BASE, DEFAULT_BOUND, TransformMode, Variant,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DisplayMode {
    /// Quotient-folding modulo (the xeme transform)
    Modulo,
    /// Last digit only
    Digit,
    /// Raw wheel values
    Raw,
}

impl From<DisplayMode> for TransformMode {
    fn from(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Modulo => Self::Modulo,
            DisplayMode::Digit => Self::Digit,
            DisplayMode::Raw => Self::Raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "xeme", version)]
#[command(about = "Exact EV and house-edge calculator for xeme-ranked wager games")]
struct Args {
    /// Built-in games to evaluate (comma-separated: reme, jeme, leme, all)
    #[arg(long, default_value = "all")]
    presets: String,

    /// Evaluate a configuration JSON file instead of the built-in games
    #[arg(long)]
    config: Option<PathBuf>,

    /// Round counts (comma-separated); non-positive values count as 1
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    rounds: String,

    /// Size of the raw value space
    #[arg(long, default_value_t = DEFAULT_BOUND)]
    bound: u32,

    /// Modulus of the display transform
    #[arg(long, default_value_t = DEFAULT_BASE)]
    base: u32,

    /// Display transform used for weight keys and printed orders; with
    /// --config this replaces the mode stored in the file
    #[arg(long, value_enum)]
    mode: Option<DisplayMode>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Include the display-space tier tables
    #[arg(long)]
    show_orders: bool,

    /// Include each evaluated state as a configuration payload
    #[arg(long)]
    export_config: bool,

    /// List the built-in games and exit
    #[arg(long)]
    list_presets: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if maybe_list_presets(&args)? {
        return Ok(());
    }

    let base = Base::new(args.base)?;
    let rounds = coerce_rounds(&split_csv(&args.rounds));
    let options = EvaluationOptions {
        show_orders: args.show_orders,
        export_config: args.export_config,
    };

    let results = match &args.config {
        Some(path) => vec![evaluate_config_file(&args, path, base, &rounds, options)?],
        None => evaluate_presets(&args, base, &rounds, options)?,
    };

    write_reports(&args, &results)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}

fn maybe_list_presets(args: &Args) -> Result<bool> {
    if !args.list_presets {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available presets:")?;
    for variant in Variant::ALL {
        let overrides = variant
            .weight_overrides()
            .iter()
            .map(|(display, weight)| format!("{display}→{weight}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            output_target.writer(),
            "  {:6} - {} (pays {overrides}, others default)",
            variant.as_str(),
            variant.label()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn apply_mode(args: &Args, calc: &mut Calculator) {
    if let Some(mode) = args.mode {
        calc.set_mode(mode.into());
    }
}

/// The requested mode when it differs from the one a configuration file
/// stored.
fn mode_override(requested: Option<DisplayMode>, stored: TransformMode) -> Option<TransformMode> {
    requested.map(TransformMode::from).filter(|mode| *mode != stored)
}

fn evaluate_presets(
    args: &Args,
    base: Base,
    rounds: &[u32],
    options: EvaluationOptions,
) -> Result<Vec<EvaluationResult>> {
    let variants = expand_presets(&split_csv(&args.presets))?;
    let mut results = Vec::with_capacity(variants.len());
    for variant in variants {
        let mut calc = Calculator::with_preset(variant, args.bound, base)
            .with_context(|| format!("failed to build preset {variant}"))?;
        apply_mode(args, &mut calc);
        info!("evaluating preset {variant}");
        results.push(run_evaluation(variant.as_str(), &calc, rounds, options));
    }
    Ok(results)
}

fn evaluate_config_file(
    args: &Args,
    path: &Path,
    base: Base,
    rounds: &[u32],
    options: EvaluationOptions,
) -> Result<EvaluationResult> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = Configuration::from_json(&json)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let mut calc = Calculator::new(args.bound, base)?;
    calc.load_configuration(&config)
        .with_context(|| format!("failed to load {}", path.display()))?;
    if let Some(mode) = mode_override(args.mode, calc.mode()) {
        warn!(
            "--mode {mode} replaces mode {} stored in {}; weight keys follow the new mode",
            calc.mode(),
            path.display()
        );
        calc.set_mode(mode);
    }
    info!("evaluating configuration {}", path.display());
    let name = path
        .file_stem()
        .map_or_else(|| "config".to_string(), |stem| stem.to_string_lossy().into_owned());
    Ok(run_evaluation(&name, &calc, rounds, options))
}

fn write_reports(args: &Args, results: &[EvaluationResult]) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => reports::generate_json_report(&mut output_target, results)?,
        ReportFormat::Markdown => reports::generate_markdown_report(&mut output_target, results)?,
        ReportFormat::Console => {
            println!("{}", "🎰 Xeme Calculator".bright_cyan().bold());
            println!("{}", "==================".cyan());
            reports::generate_console_report(&mut output_target, results)?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
