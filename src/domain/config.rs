//! Simulation constants as typed configuration.

use crate::ports::config_port::ConfigPort;

/// All tunables of the grid strategy. Defaults match the production
/// parameter set; everything can be overridden from an INI file through
/// [`GridConfig::from_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Notional spent per buy; shares = floor(notional / price).
    pub notional_per_lot: f64,
    /// Buy/sell move with at most two lots open.
    pub base_threshold: f64,
    /// Buy move with exactly three lots open.
    pub threshold_three_lots: f64,
    /// Buy move with four or more lots open.
    pub threshold_four_plus_lots: f64,
    /// Hard cap on concurrently open lots; blocks buying only.
    pub max_open_lots: usize,
    /// Safety cap on sell/buy passes within one bar.
    pub max_passes_per_bar: usize,
    /// Close must exceed reference times this to re-anchor in a rally
    /// with no open lots. Historical revisions disagree between 1.05 and
    /// 1.10, hence configurable.
    pub recovery_rally_multiplier: f64,
    /// Close below reference times this re-anchors the reference while
    /// lots are open.
    pub falling_market_multiplier: f64,
    /// Fixed divisor for the annualized ROI figure.
    pub roi_normalization_base: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            notional_per_lot: 10_000.0,
            base_threshold: 0.05,
            threshold_three_lots: 0.10,
            threshold_four_plus_lots: 0.20,
            max_open_lots: 5,
            max_passes_per_bar: 20,
            recovery_rally_multiplier: 1.05,
            falling_market_multiplier: 0.80,
            roi_normalization_base: 35_000.0,
        }
    }
}

impl GridConfig {
    /// Threshold for the next buy, from the current open-lot count.
    /// Recomputed fresh each pass; a lot's own sell threshold is fixed at
    /// purchase time instead.
    pub fn threshold_for(&self, open_lots: usize) -> f64 {
        match open_lots {
            0..=2 => self.base_threshold,
            3 => self.threshold_three_lots,
            _ => self.threshold_four_plus_lots,
        }
    }

    /// Build a config from the `[grid]` section, falling back to defaults
    /// for absent keys.
    pub fn from_config(port: &dyn ConfigPort) -> Self {
        let d = GridConfig::default();
        GridConfig {
            notional_per_lot: port.get_float("grid", "notional_per_lot", d.notional_per_lot),
            base_threshold: port.get_float("grid", "base_threshold", d.base_threshold),
            threshold_three_lots: port.get_float(
                "grid",
                "threshold_three_lots",
                d.threshold_three_lots,
            ),
            threshold_four_plus_lots: port.get_float(
                "grid",
                "threshold_four_plus_lots",
                d.threshold_four_plus_lots,
            ),
            max_open_lots: port.get_int("grid", "max_open_lots", d.max_open_lots as i64).max(0)
                as usize,
            max_passes_per_bar: port
                .get_int("grid", "max_passes_per_bar", d.max_passes_per_bar as i64)
                .max(0) as usize,
            recovery_rally_multiplier: port.get_float(
                "grid",
                "recovery_rally_multiplier",
                d.recovery_rally_multiplier,
            ),
            falling_market_multiplier: port.get_float(
                "grid",
                "falling_market_multiplier",
                d.falling_market_multiplier,
            ),
            roi_normalization_base: port.get_float(
                "grid",
                "roi_normalization_base",
                d.roi_normalization_base,
            ),
        }
    }
}
