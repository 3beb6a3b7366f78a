pub mod csv_bars;
pub mod ini_config;
pub mod text_report;
