use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use lagreg::format::render_markdown;
use lagreg::io::{read_csv, read_shift_map, results_to_json};
use lagreg::{
    Config, Lag, MissingShiftPolicy, PairwiseRegressionEngine, ResultFormatter, ShiftMap,
    TimeSeriesTable,
};

#[derive(Parser)]
#[command(name = "lagreg")]
#[command(about = "Pairwise OLS regression of lagged time series")]
#[command(version)]
struct Cli {
    /// CSV file whose first column is the time column
    csv: PathBuf,

    /// Series to regress, in order; each pair is fitted as earlier ~ later
    #[arg(short, long, value_delimiter = ',')]
    select: Vec<String>,

    /// Shift for a series as NAME=PERIODS (positive draws from the past)
    #[arg(long = "shift", value_name = "NAME=PERIODS", value_parser = parse_shift)]
    shifts: Vec<(String, i64)>,

    /// JSON object of shifts, applied before --shift
    #[arg(long, value_name = "FILE")]
    shift_file: Option<PathBuf>,

    /// Configuration file (.toml, .yaml, .yml or .json)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Treat series without a shift as unshifted instead of failing
    #[arg(long)]
    default_zero_shift: bool,

    /// Minimum aligned rows required to fit a pair
    #[arg(long)]
    min_observations: Option<usize>,

    /// Decimal places in markdown and text output
    #[arg(long)]
    precision: Option<usize>,

    /// Evaluate pairs on all cores
    #[arg(long)]
    parallel: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// List the series in the file and exit
    #[arg(long)]
    list: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
    Text,
}

fn parse_shift(s: &str) -> Result<(String, i64), String> {
    let (name, periods) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=PERIODS, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing series name in '{}'", s));
    }
    let periods = periods
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid shift for '{}': {}", name, e))?;
    Ok((name.to_string(), periods))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> lagreg::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if cli.default_zero_shift {
        config.engine.missing_shift = MissingShiftPolicy::DefaultZero;
    }
    if let Some(min_observations) = cli.min_observations {
        config.engine.min_observations = min_observations;
    }
    if let Some(precision) = cli.precision {
        config.format.precision = precision;
    }
    config.validate()?;

    let table = read_csv(&cli.csv)?;

    if cli.list {
        print_series(&table);
        return Ok(());
    }

    let mut shifts = match &cli.shift_file {
        Some(path) => read_shift_map(path)?,
        None => ShiftMap::new(),
    };
    for (name, periods) in &cli.shifts {
        shifts.insert(name.clone(), Lag(*periods));
    }

    let engine = PairwiseRegressionEngine::new(config.engine.clone())?;
    let results = if cli.parallel {
        engine.run_parallel(&cli.select, &table, &shifts)?
    } else {
        engine.run(&cli.select, &table, &shifts)?
    };

    let formatter = ResultFormatter::new(config.format.clone())?;
    match cli.format {
        OutputFormat::Markdown => print!("{}", render_markdown(&formatter.format_all(&results))),
        OutputFormat::Json => println!("{}", results_to_json(&results)?),
        OutputFormat::Text => {
            for record in formatter.format_all(&results) {
                println!("{}", record);
            }
        }
    }

    Ok(())
}

fn print_series(table: &TimeSeriesTable) {
    let width = table
        .series_names()
        .iter()
        .map(|name| name.len())
        .max()
        .unwrap_or(0);
    for name in table.series_names() {
        if let Some(series) = table.get_series(name) {
            let mean = series
                .mean()
                .map(|m| format!("{:.4}", m))
                .unwrap_or_else(|_| "-".to_string());
            println!(
                "{:<width$}  {:>6} valid  mean {}",
                name,
                series.valid_count(),
                mean,
                width = width
            );
        }
    }
}
