use serde::{Deserialize, Serialize};

/// Layout-space size in logical (CSS-like) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    /// Size used when a container reports no usable layout size.
    pub const FALLBACK: Self = Self::new(300.0, 150.0);

    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[must_use]
    pub fn center(self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    #[must_use]
    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }

    /// Physical buffer size for this logical size at `pixel_ratio`.
    #[must_use]
    pub fn to_physical(self, pixel_ratio: f64) -> PixelSize {
        PixelSize::new(
            round_to_pixels(self.width * pixel_ratio),
            round_to_pixels(self.height * pixel_ratio),
        )
    }
}

/// Backing-buffer size in physical device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn round_to_pixels(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    // Saturating float-to-int cast.
    value.round() as u32
}
