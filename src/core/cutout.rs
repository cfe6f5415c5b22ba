use serde::{Deserialize, Serialize};

/// Largest inner-radius fraction a ring may use.
pub const MAX_CUTOUT_RATIO: f64 = 0.95;

/// Ring inner-radius specifier as supplied by configuration producers.
///
/// `Text` covers percentage strings (`"60%"`) and stringly numbers (`"0.5"`);
/// `Number` is interpreted as a ratio only inside the open interval `(0, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CutoutSpec {
    Number(f64),
    Text(String),
}

impl CutoutSpec {
    #[must_use]
    pub fn percent(percent: f64) -> Self {
        Self::Text(format!("{percent}%"))
    }

    #[must_use]
    pub const fn ratio(ratio: f64) -> Self {
        Self::Number(ratio)
    }

    /// Effective inner/outer radius ratio, always within `[0, 0.95]`.
    #[must_use]
    pub fn normalized_ratio(&self) -> f64 {
        match self {
            Self::Number(value) => ratio_from_number(*value),
            Self::Text(text) => ratio_from_text(text),
        }
    }
}

/// Normalizes an optional cutout; absent means no inner erasure.
#[must_use]
pub fn normalize_cutout(cutout: Option<&CutoutSpec>) -> f64 {
    cutout.map_or(0.0, CutoutSpec::normalized_ratio)
}

fn ratio_from_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if let Some(percent) = trimmed.strip_suffix('%') {
        return match percent.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => clamp_ratio(value / 100.0),
            _ => 0.0,
        };
    }
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().map_or(0.0, ratio_from_number)
}

// Bare numbers outside (0, 1) would be pixel radii in a full charting
// library; this engine only understands ratios.
fn ratio_from_number(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        clamp_ratio(value)
    } else {
        0.0
    }
}

fn clamp_ratio(value: f64) -> f64 {
    value.clamp(0.0, MAX_CUTOUT_RATIO)
}
