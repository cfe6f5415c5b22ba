//! minichart: minimal pie and ring chart renderer with theme synchronization.
//!
//! The crate is split into pure geometry (`core`), drawing primitives and
//! surfaces (`render`), the chart engine and its configuration contract
//! (`api`), and the registry that keeps live charts in step with the host
//! theme (`theme`).

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;
pub mod theme;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{
    ChartConfig, ChartInstance, ChartKind, ChartRuntime, MiniChart, PaintOutcome, RendererKind,
    SeriesConfig, StaticStyles, StyleSource,
};
pub use error::{ChartError, ChartResult};
pub use render::ChartTarget;
pub use theme::ThemeRegistry;
