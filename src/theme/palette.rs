use crate::api::{ChartConfig, StyleSource, css_var_or};

pub const DEFAULT_THEME_ID: &str = "dark";

pub const TEXT_VAR: &str = "--text";
pub const TEXT_FALLBACK: &str = "#f0f4ff";
pub const STROKE_VAR: &str = "--stroke";
pub const STROKE_FALLBACK: &str = "rgba(255,255,255,.12)";
pub const CHART_BORDER_VAR: &str = "--chartBorder";
pub const CHART_BORDER_FALLBACK: &str = "rgba(255,255,255,.10)";

pub const LIGHT_TOOLTIP_BACKGROUND: &str = "rgba(255,255,255,0.96)";
pub const DARK_TOOLTIP_BACKGROUND: &str = "rgba(12,18,35,0.92)";

/// Border width installed on tooltips and slice outlines.
pub const THEME_BORDER_WIDTH: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    /// Only the exact id `light` selects the light variant.
    #[must_use]
    pub fn from_theme_id(theme_id: &str) -> Self {
        if theme_id.trim() == "light" {
            Self::Light
        } else {
            Self::Dark
        }
    }

    #[must_use]
    pub fn tooltip_background(self) -> &'static str {
        match self {
            Self::Light => LIGHT_TOOLTIP_BACKGROUND,
            Self::Dark => DARK_TOOLTIP_BACKGROUND,
        }
    }
}

/// Theme-derived colors written into chart configurations.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemePalette {
    pub mode: ThemeMode,
    pub text: String,
    pub stroke: String,
    pub chart_border: String,
    pub tooltip_background: String,
}

impl ThemePalette {
    /// Reads the active theme and its colors from the host styling system.
    #[must_use]
    pub fn resolve(source: &dyn StyleSource) -> Self {
        let theme_id = source
            .theme_id()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_THEME_ID.to_owned());
        let mode = ThemeMode::from_theme_id(&theme_id);
        Self {
            mode,
            text: css_var_or(source, TEXT_VAR, TEXT_FALLBACK),
            stroke: css_var_or(source, STROKE_VAR, STROKE_FALLBACK),
            chart_border: css_var_or(source, CHART_BORDER_VAR, CHART_BORDER_FALLBACK),
            tooltip_background: mode.tooltip_background().to_owned(),
        }
    }

    /// Writes the palette into every theme-owned field of `config`.
    /// Caller-pinned values are left alone. Returns the number of fields
    /// written.
    pub fn apply_to(&self, config: &mut ChartConfig) -> usize {
        let options = &mut config.options;
        let tooltip = &mut options.tooltip;
        let mut written = [
            options.color.apply_theme(self.text.clone()),
            options.legend_label_color.apply_theme(self.text.clone()),
            tooltip.background_color.apply_theme(self.tooltip_background.clone()),
            tooltip.title_color.apply_theme(self.text.clone()),
            tooltip.body_color.apply_theme(self.text.clone()),
            tooltip.border_color.apply_theme(self.stroke.clone()),
            tooltip.border_width.apply_theme(THEME_BORDER_WIDTH),
        ]
        .into_iter()
        .filter(|written| *written)
        .count();

        if let Some(title) = options.title.as_mut() {
            written += usize::from(title.color.apply_theme(self.text.clone()));
        }
        for series in &mut config.series {
            written += usize::from(series.border_width.apply_theme(THEME_BORDER_WIDTH));
            written += usize::from(series.border_color.apply_theme(self.chart_border.clone()));
        }
        written
    }
}
