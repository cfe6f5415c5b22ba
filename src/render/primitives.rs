use std::fmt;

use crate::error::{ChartError, ChartResult};
use crate::render::css_color;

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 8-bit channels and a normalized alpha.
    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            alpha,
        )
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Fill or stroke source carried by draw commands.
///
/// Configured colors stay opaque host strings; only backends that need
/// channel values resolve them.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Css(String),
    /// Generated color, hue in degrees, saturation/lightness in percent.
    Hsl {
        hue: f64,
        saturation: f64,
        lightness: f64,
    },
}

impl Paint {
    /// Saturation used for generated slice colors.
    pub const FALLBACK_SATURATION: f64 = 70.0;
    /// Lightness used for generated slice colors.
    pub const FALLBACK_LIGHTNESS: f64 = 55.0;

    #[must_use]
    pub fn css(value: impl Into<String>) -> Self {
        Self::Css(value.into())
    }

    #[must_use]
    pub fn fallback_hue(hue: f64) -> Self {
        Self::Hsl {
            hue,
            saturation: Self::FALLBACK_SATURATION,
            lightness: Self::FALLBACK_LIGHTNESS,
        }
    }

    #[must_use]
    pub fn hue(&self) -> Option<f64> {
        match self {
            Self::Hsl { hue, .. } => Some(*hue),
            Self::Css(_) => None,
        }
    }

    /// Resolves to channel values for raster backends.
    pub fn resolve(&self) -> ChartResult<Color> {
        match self {
            Self::Css(value) => css_color::parse_css_color(value),
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => Ok(css_color::hsl_to_color(
                *hue,
                saturation / 100.0,
                lightness / 100.0,
                1.0,
            )),
        }
    }

    fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Css(value) if value.trim().is_empty() => Err(ChartError::InvalidData(
                "paint color must not be empty".to_owned(),
            )),
            Self::Css(_) => Ok(()),
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => {
                if hue.is_finite() && saturation.is_finite() && lightness.is_finite() {
                    Ok(())
                } else {
                    Err(ChartError::InvalidData(
                        "hsl paint components must be finite".to_owned(),
                    ))
                }
            }
        }
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(value) => f.write_str(value),
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({hue} {saturation}% {lightness}%)"),
        }
    }
}

/// Outline drawn over a wedge after it is filled.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub paint: Paint,
}

/// Filled circular sector in logical pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct WedgePrimitive {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub fill: Paint,
    pub stroke: Option<StrokeStyle>,
    /// Generated hue for this slice position, painted when `fill` cannot be
    /// resolved by a raster backend.
    pub fallback_hue: f64,
}

impl WedgePrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.center_x.is_finite()
            || !self.center_y.is_finite()
            || !self.start_angle.is_finite()
            || !self.end_angle.is_finite()
            || !self.fallback_hue.is_finite()
        {
            return Err(ChartError::InvalidData(
                "wedge geometry must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "wedge radius must be finite and > 0".to_owned(),
            ));
        }
        self.fill.validate()?;
        if let Some(stroke) = &self.stroke {
            if !stroke.width.is_finite() || stroke.width <= 0.0 {
                return Err(ChartError::InvalidData(
                    "wedge stroke width must be finite and > 0".to_owned(),
                ));
            }
            stroke.paint.validate()?;
        }
        Ok(())
    }
}

/// Centered disk removed from previously painted pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EraseDiskPrimitive {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl EraseDiskPrimitive {
    pub fn validate(self) -> ChartResult<()> {
        if !self.center_x.is_finite() || !self.center_y.is_finite() {
            return Err(ChartError::InvalidData(
                "erase disk center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "erase disk radius must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Label anchored at `(x, y)`, where `y` is the vertical middle of the text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub paint: Paint,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        paint: Paint,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            paint,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.paint.validate()
    }
}
