mod chart_config;
mod chart_runtime;
mod frame_builder;
mod json_contract;
mod mini_chart;
mod sizing;
mod style_source;

pub use chart_config::{
    ChartConfig, ChartKind, ChartOptions, SeriesConfig, SharedConfig, Themed, TitleOptions,
    TooltipOptions,
};
pub use chart_runtime::{
    ChartFactory, ChartInstance, ChartRuntime, MiniChartFactory, RendererKind,
};
pub use frame_builder::{
    LABEL_FONT_SIZE_PX, NO_DATA_LABEL, PLACEHOLDER_LABEL, PaintOutcome, build_chart_frame,
};
pub use json_contract::{
    ChartConfigJson, ChartDataJson, ChartOptionsJson, DatasetJson, LegendJson, LegendLabelsJson,
    PluginsJson, TitleJson, TooltipJson, coerce_number,
};
pub use mini_chart::MiniChart;
pub use sizing::{SurfaceMetrics, effective_logical_size, effective_pixel_ratio, prepare_surface};
pub use style_source::{
    MUTED_LABEL_FALLBACK, MUTED_LABEL_VAR, StaticStyles, StyleSource, css_var_or,
};
