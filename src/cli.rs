//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_bars::CsvBarSource;
use crate::adapters::ini_config::IniConfig;
use crate::adapters::text_report::{self, TextReport};
use crate::domain::bar::normalize;
use crate::domain::config::GridConfig;
use crate::domain::config_validation::validate_grid_config;
use crate::domain::engine::run_simulation;
use crate::domain::error::GridError;
use crate::ports::data_port::BarSource;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "gridtrader", about = "Grid trading strategy simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a simulation over a CSV price series
    Simulate {
        /// CSV file with DATE, OPEN, HIGH, LOW, CLOSE columns
        #[arg(short, long)]
        data: PathBuf,
        /// INI file overriding the default strategy parameters
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show date range and bar count for a CSV price series
    Info {
        #[arg(short, long)]
        data: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            data,
            config,
            output,
        } => run_simulate(&data, config.as_ref(), output.as_ref()),
        Command::Validate { config } => run_validate(&config),
        Command::Info { data } => run_info(&data),
    }
}

/// Load the grid config, falling back to defaults when no file is given.
pub fn load_grid_config(path: Option<&PathBuf>) -> Result<GridConfig, GridError> {
    let config = match path {
        Some(path) => {
            let adapter = IniConfig::from_file(path).map_err(|e| GridError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;
            GridConfig::from_config(&adapter)
        }
        None => GridConfig::default(),
    };
    validate_grid_config(&config)?;
    Ok(config)
}

fn fail(err: &GridError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

fn run_simulate(
    data_path: &PathBuf,
    config_path: Option<&PathBuf>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    let config = match load_grid_config(config_path) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    eprintln!("Loading price series from {}", data_path.display());
    let source = CsvBarSource::new(data_path);
    let raw = match source.fetch_bars() {
        Ok(raw) => raw,
        Err(e) => return fail(&e),
    };
    let bars = match normalize(&raw) {
        Ok(bars) => bars,
        Err(e) => return fail(&e),
    };
    eprintln!(
        "Simulating {} bars ({} to {})",
        bars.len(),
        bars[0].date,
        bars[bars.len() - 1].date
    );

    let report = match run_simulation(&bars, &config) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };
    for date in &report.loop_limit_dates {
        eprintln!("warning: pass cap reached on {date}, bar processing truncated");
    }

    match output_path {
        Some(path) => {
            if let Err(e) = TextReport.write(&report.summary, &path.display().to_string()) {
                return fail(&e);
            }
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", text_report::render(&report.summary)),
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    match load_grid_config(Some(config_path)) {
        Ok(_) => {
            eprintln!("{} is valid", config_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_info(data_path: &PathBuf) -> ExitCode {
    let source = CsvBarSource::new(data_path);
    let raw = match source.fetch_bars() {
        Ok(raw) => raw,
        Err(e) => return fail(&e),
    };
    let bars = match normalize(&raw) {
        Ok(bars) => bars,
        Err(e) => return fail(&e),
    };
    println!(
        "{}: {} bars, {} to {}",
        data_path.display(),
        bars.len(),
        bars[0].date,
        bars[bars.len() - 1].date
    );
    ExitCode::SUCCESS
}
