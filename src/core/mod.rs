pub mod cutout;
pub mod pie_layout;
pub mod types;

pub use cutout::{CutoutSpec, MAX_CUTOUT_RATIO, normalize_cutout};
pub use pie_layout::{
    OUTER_RADIUS_FACTOR, PieLayout, PieSlice, START_ANGLE, fallback_hue, layout_pie,
    sanitize_value, values_total,
};
pub use types::{LogicalSize, PixelSize};
