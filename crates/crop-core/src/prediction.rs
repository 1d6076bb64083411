//! Prediction results handed back to the presentation layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Decimal places used when a result is displayed.
pub const DISPLAY_DECIMALS: usize = 2;

/// Predicted production and the yield derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Model output, passed through without bounds.
    pub production: f64,
    /// Production per unit area; 0 when the area is 0.
    #[serde(rename = "yield")]
    pub crop_yield: f64,
}

impl PredictionResult {
    /// Derive yield from a predicted production and the cultivated area.
    ///
    /// Yield is `production / area` for a positive area and exactly `0.0`
    /// otherwise, so the result is always displayable.
    #[must_use]
    pub fn from_production(production: f64, area: f64) -> Self {
        let crop_yield = if area > 0.0 { production / area } else { 0.0 };
        Self {
            production,
            crop_yield,
        }
    }

    /// Both figures rendered with `decimals` places.
    #[must_use]
    pub fn formatted(&self, decimals: usize) -> FormattedPrediction {
        FormattedPrediction {
            production: format!("{:.decimals$}", self.production),
            crop_yield: format!("{:.decimals$}", self.crop_yield),
        }
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.formatted(DISPLAY_DECIMALS), f)
    }
}

/// Display strings for a [`PredictionResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedPrediction {
    pub production: String,
    #[serde(rename = "yield")]
    pub crop_yield: String,
}

impl fmt::Display for FormattedPrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Predicted Production: {}", self.production)?;
        write!(f, "Predicted Yield (Production/Area): {}", self.crop_yield)
    }
}
