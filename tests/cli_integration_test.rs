//! End-to-end tests driving the CLI layer: argument parsing, config
//! loading, the simulate pipeline and the exit-code mapping.
//!
//! ExitCode doesn't implement PartialEq, so assertions go through the
//! Debug representation.

use clap::Parser;
use gridtrader::cli::{load_grid_config, run, Cli};
use gridtrader::domain::error::GridError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const GOOD_CSV: &str = "DATE,OPEN,HIGH,LOW,CLOSE\n\
    2024-01-03,\"1,000.00\",\"1,000.00\",997.50,\"1,000.00\"\n\
    2024-01-02,\"1,000.00\",\"1,050.00\",\"1,000.00\",\"1,040.00\"\n\
    2024-01-01,\"1,000.00\",\"1,000.00\",\"1,000.00\",\"1,000.00\"\n";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run_args(args: &[&str]) -> String {
    let mut argv = vec!["gridtrader"];
    argv.extend_from_slice(args);
    let code = run(Cli::parse_from(argv));
    format!("{:?}", code)
}

fn s(path: &Path) -> String {
    path.display().to_string()
}

mod simulate {
    use super::*;

    #[test]
    fn writes_report_file_and_exits_clean() {
        let dir = TempDir::new().unwrap();
        let data = write_file(&dir, "series.csv", GOOD_CSV);
        let output = dir.path().join("report.txt");

        let code = run_args(&["simulate", "--data", &s(&data), "--output", &s(&output)]);
        assert_eq!(code, "ExitCode(0)");

        let report = fs::read_to_string(&output).unwrap();
        assert!(report.contains("Grid Simulation Report"));
        assert!(report.contains("2024-01-01 to 2024-01-03"));
        assert!(report.contains("SELL"));
        assert!(report.contains("500.00"));
    }

    #[test]
    fn honors_a_config_override() {
        let dir = TempDir::new().unwrap();
        let data = write_file(&dir, "series.csv", GOOD_CSV);
        // Raising the base threshold to 10% keeps the day-2 high below the
        // sell target, so the seed lot never closes.
        let config = write_file(&dir, "grid.ini", "[grid]\nbase_threshold = 0.10\n");
        let output = dir.path().join("report.txt");

        let code = run_args(&[
            "simulate",
            "--data",
            &s(&data),
            "--config",
            &s(&config),
            "--output",
            &s(&output),
        ]);
        assert_eq!(code, "ExitCode(0)");

        let report = fs::read_to_string(&output).unwrap();
        assert!(!report.contains("SELL"));
        assert!(report.contains("Open lots:"));
    }

    #[test]
    fn missing_data_file_maps_to_data_exit_code() {
        let dir = TempDir::new().unwrap();
        let code = run_args(&["simulate", "--data", &s(&dir.path().join("nope.csv"))]);
        assert_eq!(code, "ExitCode(3)");
    }

    #[test]
    fn malformed_price_maps_to_parse_exit_code() {
        let dir = TempDir::new().unwrap();
        let data = write_file(
            &dir,
            "bad.csv",
            "DATE,OPEN,HIGH,LOW,CLOSE\n2024-01-01,100,1x0,90,105\n",
        );
        let code = run_args(&["simulate", "--data", &s(&data)]);
        assert_eq!(code, "ExitCode(4)");
    }

    #[test]
    fn header_only_series_maps_to_empty_series_exit_code() {
        let dir = TempDir::new().unwrap();
        let data = write_file(&dir, "empty.csv", "DATE,OPEN,HIGH,LOW,CLOSE\n");
        let code = run_args(&["simulate", "--data", &s(&data)]);
        assert_eq!(code, "ExitCode(5)");
    }

    #[test]
    fn invalid_config_value_maps_to_config_exit_code() {
        let dir = TempDir::new().unwrap();
        let data = write_file(&dir, "series.csv", GOOD_CSV);
        let config = write_file(&dir, "bad.ini", "[grid]\nbase_threshold = 1.5\n");
        let code = run_args(&["simulate", "--data", &s(&data), "--config", &s(&config)]);
        assert_eq!(code, "ExitCode(2)");
    }
}

mod validate {
    use super::*;

    #[test]
    fn accepts_a_well_formed_file() {
        let dir = TempDir::new().unwrap();
        let config = write_file(
            &dir,
            "grid.ini",
            "[grid]\nnotional_per_lot = 20000\nmax_open_lots = 8\n",
        );
        assert_eq!(run_args(&["validate", "--config", &s(&config)]), "ExitCode(0)");
    }

    #[test]
    fn rejects_out_of_range_values() {
        let dir = TempDir::new().unwrap();
        let config = write_file(&dir, "grid.ini", "[grid]\nmax_open_lots = 0\n");
        assert_eq!(run_args(&["validate", "--config", &s(&config)]), "ExitCode(2)");
    }

    #[test]
    fn rejects_a_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.ini");
        assert_eq!(run_args(&["validate", "--config", &s(&path)]), "ExitCode(2)");
    }
}

mod info {
    use super::*;

    #[test]
    fn reports_series_shape() {
        let dir = TempDir::new().unwrap();
        let data = write_file(&dir, "series.csv", GOOD_CSV);
        assert_eq!(run_args(&["info", "--data", &s(&data)]), "ExitCode(0)");
    }

    #[test]
    fn fails_on_malformed_dates() {
        let dir = TempDir::new().unwrap();
        let data = write_file(
            &dir,
            "bad.csv",
            "DATE,OPEN,HIGH,LOW,CLOSE\n01/15/2024,100,110,90,105\n",
        );
        assert_eq!(run_args(&["info", "--data", &s(&data)]), "ExitCode(4)");
    }
}

mod config_loading {
    use super::*;

    #[test]
    fn no_file_yields_defaults() {
        let config = load_grid_config(None).unwrap();
        assert!((config.notional_per_lot - 10_000.0).abs() < f64::EPSILON);
        assert!((config.base_threshold - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.max_open_lots, 5);
        assert_eq!(config.max_passes_per_bar, 20);
    }

    #[test]
    fn file_overrides_merge_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "grid.ini",
            "[grid]\nbase_threshold = 0.03\nrecovery_rally_multiplier = 1.10\n",
        );
        let config = load_grid_config(Some(&path)).unwrap();

        assert!((config.base_threshold - 0.03).abs() < f64::EPSILON);
        assert!((config.recovery_rally_multiplier - 1.10).abs() < f64::EPSILON);
        // Everything else stays default.
        assert!((config.threshold_four_plus_lots - 0.20).abs() < f64::EPSILON);
        assert_eq!(config.max_open_lots, 5);
    }

    #[test]
    fn missing_file_is_a_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.ini");
        let err = load_grid_config(Some(&path)).unwrap_err();
        assert!(matches!(err, GridError::ConfigParse { .. }));
    }

    #[test]
    fn out_of_range_value_names_section_and_key() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "grid.ini", "[grid]\nfalling_market_multiplier = 1.2\n");
        let err = load_grid_config(Some(&path)).unwrap_err();
        match err {
            GridError::ConfigInvalid { section, key, .. } => {
                assert_eq!(section, "grid");
                assert_eq!(key, "falling_market_multiplier");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
