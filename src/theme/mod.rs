//! Theme synchronization for live charts.
//!
//! [`ThemeRegistry`] tracks charts weakly and, when the host theme changes,
//! writes theme-derived colors into each chart's configuration before asking
//! it to repaint. The engine itself knows nothing about themes.

mod palette;
mod registry;

pub use palette::{
    CHART_BORDER_FALLBACK, CHART_BORDER_VAR, DARK_TOOLTIP_BACKGROUND, DEFAULT_THEME_ID,
    LIGHT_TOOLTIP_BACKGROUND, STROKE_FALLBACK, STROKE_VAR, TEXT_FALLBACK, TEXT_VAR,
    THEME_BORDER_WIDTH, ThemeMode, ThemePalette,
};
pub use registry::ThemeRegistry;
