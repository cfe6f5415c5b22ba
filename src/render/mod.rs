pub mod css_color;
mod frame;
mod primitives;
mod recording;
mod resize;
mod surface;

pub use frame::RenderFrame;
pub use primitives::{
    Color, EraseDiskPrimitive, Paint, StrokeStyle, TextHAlign, TextPrimitive, WedgePrimitive,
};
pub use recording::{RecordingCanvas, RecordingContext, RecordingStats};
pub use resize::ResizeHub;
pub use surface::{
    BoundSurface, CanvasHandle, ChartTarget, DrawingContext, ResizeCallback, ResizeObservable,
    ResizeSubscription,
};

use crate::core::LogicalSize;
use crate::error::ChartResult;

/// Contract implemented by every drawing backend.
///
/// Backends receive a fully materialized `RenderFrame`, so geometry and
/// color selection stay out of drawing code.
pub trait Renderer {
    /// Applies the frame's scale transform, clears its viewport and paints it.
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    /// Clears `area` (logical pixels) without painting anything.
    fn clear(&mut self, area: LogicalSize) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoCanvas, CairoContext, CairoRenderStats};
