//! Configuration validation, run before any simulation starts.

use crate::domain::config::GridConfig;
use crate::domain::error::GridError;

pub fn validate_grid_config(config: &GridConfig) -> Result<(), GridError> {
    validate_notional(config)?;
    validate_thresholds(config)?;
    validate_limits(config)?;
    validate_multipliers(config)?;
    validate_roi_base(config)?;
    Ok(())
}

fn invalid(key: &str, reason: &str) -> GridError {
    GridError::ConfigInvalid {
        section: "grid".to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_notional(config: &GridConfig) -> Result<(), GridError> {
    if config.notional_per_lot <= 0.0 {
        return Err(invalid("notional_per_lot", "notional_per_lot must be positive"));
    }
    Ok(())
}

fn validate_thresholds(config: &GridConfig) -> Result<(), GridError> {
    let checks = [
        ("base_threshold", config.base_threshold),
        ("threshold_three_lots", config.threshold_three_lots),
        ("threshold_four_plus_lots", config.threshold_four_plus_lots),
    ];
    for (key, value) in checks {
        if value <= 0.0 || value >= 1.0 {
            return Err(invalid(key, "threshold must be between 0 and 1 exclusive"));
        }
    }
    Ok(())
}

fn validate_limits(config: &GridConfig) -> Result<(), GridError> {
    if config.max_open_lots == 0 {
        return Err(invalid("max_open_lots", "max_open_lots must be at least 1"));
    }
    if config.max_passes_per_bar == 0 {
        return Err(invalid(
            "max_passes_per_bar",
            "max_passes_per_bar must be at least 1",
        ));
    }
    Ok(())
}

fn validate_multipliers(config: &GridConfig) -> Result<(), GridError> {
    if config.recovery_rally_multiplier <= 1.0 {
        return Err(invalid(
            "recovery_rally_multiplier",
            "recovery_rally_multiplier must be greater than 1",
        ));
    }
    if config.falling_market_multiplier <= 0.0 || config.falling_market_multiplier >= 1.0 {
        return Err(invalid(
            "falling_market_multiplier",
            "falling_market_multiplier must be between 0 and 1 exclusive",
        ));
    }
    Ok(())
}

fn validate_roi_base(config: &GridConfig) -> Result<(), GridError> {
    if config.roi_normalization_base <= 0.0 {
        return Err(invalid(
            "roi_normalization_base",
            "roi_normalization_base must be positive",
        ));
    }
    Ok(())
}
