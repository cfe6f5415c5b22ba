use std::f64::consts::{FRAC_PI_2, TAU};

use smallvec::SmallVec;

use crate::core::LogicalSize;

/// Outer radius as a fraction of the shorter drawing-area side.
pub const OUTER_RADIUS_FACTOR: f64 = 0.42;

/// Angle of the 12-o'clock position in canvas convention (y grows downward,
/// so increasing angles sweep clockwise on screen).
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// One non-degenerate wedge, angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    /// Position of the value in the input sequence (also the color index).
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    #[must_use]
    pub fn sweep(self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Start offset in degrees, measured clockwise from 12 o'clock.
    #[must_use]
    pub fn start_degrees(self) -> f64 {
        (self.start_angle - START_ANGLE).to_degrees()
    }

    /// End offset in degrees, measured clockwise from 12 o'clock.
    #[must_use]
    pub fn end_degrees(self) -> f64 {
        (self.end_angle - START_ANGLE).to_degrees()
    }
}

/// Geometry of a pie or ring for one drawing area.
#[derive(Debug, Clone, PartialEq)]
pub struct PieLayout {
    pub center_x: f64,
    pub center_y: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    /// Number of input values, including zero-valued ones that produced no slice.
    pub value_count: usize,
    pub slices: SmallVec<[PieSlice; 8]>,
}

impl PieLayout {
    #[must_use]
    pub fn has_cutout(&self) -> bool {
        self.inner_radius > 0.0
    }

    #[must_use]
    pub fn total_sweep(&self) -> f64 {
        self.slices.iter().map(|slice| slice.sweep()).sum()
    }
}

/// Coerces a raw value into a drawable share: non-finite and negative
/// values contribute nothing.
#[must_use]
pub fn sanitize_value(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Sum of sanitized values.
#[must_use]
pub fn values_total(values: &[f64]) -> f64 {
    values.iter().copied().map(sanitize_value).sum()
}

/// Computes slice geometry. Returns `None` for the empty state (no values
/// or a total of zero).
#[must_use]
pub fn layout_pie(values: &[f64], cutout_ratio: f64, area: LogicalSize) -> Option<PieLayout> {
    let total = values_total(values);
    if !(total.is_finite() && total > 0.0) {
        return None;
    }

    let (center_x, center_y) = area.center();
    let outer_radius = area.min_side() * OUTER_RADIUS_FACTOR;
    let inner_radius = outer_radius * cutout_ratio;

    let mut slices = SmallVec::new();
    let mut start_angle = START_ANGLE;
    for (index, value) in values.iter().copied().map(sanitize_value).enumerate() {
        let sweep = value / total * TAU;
        if sweep == 0.0 {
            continue;
        }
        let end_angle = start_angle + sweep;
        slices.push(PieSlice {
            index,
            start_angle,
            end_angle,
        });
        start_angle = end_angle;
    }

    Some(PieLayout {
        center_x,
        center_y,
        outer_radius,
        inner_radius,
        value_count: values.len(),
        slices,
    })
}

/// Hue in degrees for a slice without a configured color.
#[must_use]
pub fn fallback_hue(index: usize, count: usize) -> f64 {
    index as f64 * 360.0 / count.max(1) as f64
}
