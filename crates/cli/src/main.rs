//! # cci
//!
//! Command-line interface for FAB construction cost index forecasts.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use data_facade::{
    load_csv_path, CatalogConfig, CatalogSource, DatasetSource, Frame, DEFAULT_DATA_DIR,
};
use report::{render_svg, run_forecast, to_csv, ChartOptions, ForecastReport};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use var_facade::{select_order, InformationCriterion, LagOrderSelection, VarConfig};

#[derive(Parser)]
#[command(name = "cci")]
#[command(about = "FAB CCI forecasting with vector autoregression", version, long_about = None)]
struct Cli {
    /// Directory holding the built-in datasets (tar1.csv .. tar8.csv)
    #[arg(long, global = true, env = "CCI_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Exactly one of a built-in dataset or a CSV file.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Built-in dataset key, label or number (see `cci datasets`)
    #[arg(short, long)]
    dataset: Option<String>,

    /// CSV file with a `date` column; the last column is forecast
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in datasets
    Datasets,

    /// Print information criteria for every lag order
    SelectOrder {
        #[command(flatten)]
        source: SourceArgs,

        /// Largest lag order compared
        #[arg(long, default_value_t = var_facade::DEFAULT_MAX_LAGS)]
        max_lags: usize,

        /// Header rename applied before loading (repeatable)
        #[arg(long = "alias", value_name = "RAW=NAME")]
        aliases: Vec<String>,
    },

    /// Forecast the last column of a dataset
    Forecast {
        #[command(flatten)]
        source: SourceArgs,

        /// Months to forecast
        #[arg(short, long, default_value_t = var_facade::DEFAULT_STEPS)]
        steps: usize,

        /// Largest lag order compared
        #[arg(long, default_value_t = var_facade::DEFAULT_MAX_LAGS)]
        max_lags: usize,

        /// Criterion used to choose the lag order (aic, bic, hqic, fpe)
        #[arg(short, long, default_value = "aic")]
        criterion: InformationCriterion,

        /// Forecast interval coverage
        #[arg(long, default_value_t = var_facade::DEFAULT_INTERVAL_LEVEL)]
        level: f64,

        /// Write the forecast CSV here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include interval bounds in the CSV
        #[arg(long)]
        intervals: bool,

        /// Write the actual vs. predicted chart (SVG) here
        #[arg(long)]
        chart: Option<PathBuf>,

        /// Print the full report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Header rename applied before loading (repeatable)
        #[arg(long = "alias", value_name = "RAW=NAME")]
        aliases: Vec<String>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,
    },
}

/// Catalog source over `data_dir` with the built-in and extra header renames.
fn catalog_source(data_dir: &Path, aliases: &[String]) -> Result<CatalogSource> {
    let mut builder = CatalogConfig::builder().data_dir(data_dir);
    for spec in aliases {
        builder = builder.alias_spec(spec)?;
    }
    Ok(CatalogSource::from_config(&builder.build()?))
}

/// Load the selected dataset and a label for it.
fn load_frame(source: &CatalogSource, args: &SourceArgs) -> Result<(Frame, String)> {
    match (&args.dataset, &args.input) {
        (Some(key), _) => {
            let entry = source.catalog().resolve(key)?;
            let frame = source
                .load(&entry.key)
                .with_context(|| format!("Failed to load dataset '{}'", entry.label))?;
            Ok((frame, entry.label.clone()))
        }
        (None, Some(path)) => {
            let frame = load_csv_path(path, source.aliases())
                .with_context(|| format!("Failed to load {}", path.display()))?;
            let label = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok((frame, label))
        }
        (None, None) => anyhow::bail!("either --dataset or --input is required"),
    }
}

fn run_datasets(data_dir: &Path) -> Result<()> {
    let source = catalog_source(data_dir, &[])?;
    println!("Data directory: {}", data_dir.display());
    println!("{:<26} {:<26} {:<10} {}", "KEY", "LABEL", "FILE", "AVAILABLE");
    for entry in source.entries() {
        println!(
            "{:<26} {:<26} {:<10} {}",
            entry.key,
            entry.label,
            entry.file_name(),
            if source.is_available(&entry.key) { "yes" } else { "no" }
        );
    }
    Ok(())
}

/// Criteria table with the minimum of each column starred.
fn format_selection(selection: &LagOrderSelection) -> String {
    let mut out = format!(
        "VAR order selection ({} observations, max lags {})\n{:>4} {:>12} {:>12} {:>12} {:>12}\n",
        selection.nobs, selection.max_lags, "lag", "AIC", "BIC", "FPE", "HQIC"
    );
    let cell = |value: f64, best: bool| format!("{:.4}{}", value, if best { "*" } else { " " });
    for row in &selection.table {
        out.push_str(&format!(
            "{:>4} {:>12} {:>12} {:>12} {:>12}\n",
            row.lag,
            cell(row.aic, row.lag == selection.aic),
            cell(row.bic, row.lag == selection.bic),
            cell(row.fpe, row.lag == selection.fpe),
            cell(row.hqic, row.lag == selection.hqic),
        ));
    }
    out
}

fn run_select_order(
    data_dir: &Path,
    args: &SourceArgs,
    max_lags: usize,
    aliases: &[String],
) -> Result<()> {
    let source = catalog_source(data_dir, aliases)?;
    let (frame, label) = load_frame(&source, args)?;
    println!("Loaded {} rows x {} columns from {}", frame.nobs(), frame.neqs(), label);

    let selection = select_order(frame.values(), max_lags)?;
    print!("{}", format_selection(&selection));
    Ok(())
}

fn print_report(report: &ForecastReport) {
    println!("Dataset: {}", report.dataset_label);
    println!("Optimal lag ({}): {}", report.criterion, report.lag_order);
    if !report.stable {
        println!("Warning: the fitted VAR is not stable");
    }
    println!("Forecast of '{}' ({} months):", report.target, report.steps());
    println!("  {:<10} {:>12} {:>12} {:>12}", "date", "forecast", "lower", "upper");
    for point in &report.forecast {
        println!(
            "  {:<10} {:>12.4} {:>12.4} {:>12.4}",
            point.date, point.value, point.lower, point.upper
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn run_forecast_command(
    data_dir: &Path,
    args: &SourceArgs,
    config: VarConfig,
    output: Option<&Path>,
    intervals: bool,
    chart: Option<&Path>,
    json: bool,
    aliases: &[String],
) -> Result<()> {
    let source = catalog_source(data_dir, aliases)?;
    let (frame, label) = load_frame(&source, args)?;
    debug!(dataset = %label, rows = frame.nobs(), columns = frame.neqs(), "input loaded");
    let report = run_forecast(&frame, &config, &label)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(path) = output {
        fs::write(path, to_csv(&report, intervals)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Forecast written to {}", path.display());
    }
    if let Some(path) = chart {
        fs::write(path, render_svg(&report, &ChartOptions::default())?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Chart written to {}", path.display());
    }
    Ok(())
}

fn run_serve(data_dir: PathBuf, host: String, port: u16) -> Result<()> {
    let mut config = cci_server::ServerConfig::from_env()?;
    config.data_dir = data_dir;
    config.host = host;
    config.port = port;

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(cci_server::serve(config))?;
    Ok(())
}

fn init_tracing(serving: bool) {
    let default = if serving {
        "cci_server=info,report=info,tower_http=info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Serve { .. }));

    let result = match cli.command {
        Commands::Datasets => run_datasets(&cli.data_dir),

        Commands::SelectOrder {
            source,
            max_lags,
            aliases,
        } => run_select_order(&cli.data_dir, &source, max_lags, &aliases),

        Commands::Forecast {
            source,
            steps,
            max_lags,
            criterion,
            level,
            output,
            intervals,
            chart,
            json,
            aliases,
        } => VarConfig::builder()
            .steps(steps)
            .max_lags(max_lags)
            .criterion(criterion)
            .interval_level(level)
            .build()
            .map_err(anyhow::Error::from)
            .and_then(|config| {
                run_forecast_command(
                    &cli.data_dir,
                    &source,
                    config,
                    output.as_deref(),
                    intervals,
                    chart.as_deref(),
                    json,
                    &aliases,
                )
            }),

        Commands::Serve { port, host } => run_serve(cli.data_dir, host, port),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
