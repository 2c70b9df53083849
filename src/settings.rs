use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::kernel::DEFAULT_ABS_TOL;
use crate::tables::pricing::PricingPolicy;

/// Number of sequence terms projected alongside an arithmetic verdict.
pub const DEFAULT_PROJECTION_LEN: usize = 10;

/// Harness configuration, read from an optional JSON file.
///
/// ```json
/// { "abs_tol": 1e-9, "projection_len": 10,
///   "pricing": { "multiplier": 2.0, "flat": 2.0 },
///   "hourly_rate": 0.0, "catalog_file": "beads.csv" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub abs_tol: f64,
    pub projection_len: usize,
    pub pricing: PricingPolicy,
    /// Used when a quote request does not carry its own rate.
    pub hourly_rate: f64,
    /// CSV (`name,unit_price`) replacing the built-in bead catalog.
    pub catalog_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            abs_tol: DEFAULT_ABS_TOL,
            projection_len: DEFAULT_PROJECTION_LEN,
            pricing: PricingPolicy::default(),
            hourly_rate: 0.0,
            catalog_file: None,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        settings.validate()?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.abs_tol.is_finite() && self.abs_tol >= 0.0) {
            bail!("abs_tol must be a non-negative number, got {}", self.abs_tol);
        }
        if !(self.hourly_rate.is_finite() && self.hourly_rate >= 0.0) {
            bail!("hourly_rate must be a non-negative number, got {}", self.hourly_rate);
        }
        if !(self.pricing.multiplier.is_finite() && self.pricing.flat.is_finite()) {
            bail!("pricing multiplier and flat add-on must be finite");
        }
        Ok(())
    }
}
