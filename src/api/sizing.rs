use tracing::trace;

use crate::core::{LogicalSize, PixelSize};
use crate::error::ChartResult;
use crate::render::CanvasHandle;

/// Outcome of the sizing step that starts every paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    /// Drawing area in logical pixels; all draw commands use this space.
    pub logical: LogicalSize,
    pub physical: PixelSize,
    pub pixel_ratio: f64,
    /// Whether the backing buffer had to be reallocated.
    pub reallocated: bool,
}

/// Normalizes a display scale factor: at least 1, default 1.
#[must_use]
pub fn effective_pixel_ratio(raw: Option<f64>) -> f64 {
    match raw {
        Some(ratio) if ratio.is_finite() => ratio.max(1.0),
        _ => 1.0,
    }
}

/// Logical drawing area for a reported layout size. Zero or unusable
/// dimensions (hidden panels) fall back to 300x150 per axis.
#[must_use]
pub fn effective_logical_size(reported: LogicalSize) -> LogicalSize {
    let pick = |value: f64, fallback: f64| {
        if value.is_finite() && value > 0.0 {
            value.max(1.0)
        } else {
            fallback
        }
    };
    LogicalSize::new(
        pick(reported.width, LogicalSize::FALLBACK.width),
        pick(reported.height, LogicalSize::FALLBACK.height),
    )
}

/// Sizes the backing buffer for the canvas's current layout size.
///
/// The buffer is only reallocated when the physical size actually changes,
/// so bursts of redundant resize notifications stay cheap.
pub fn prepare_surface(canvas: &dyn CanvasHandle) -> ChartResult<SurfaceMetrics> {
    let logical = effective_logical_size(canvas.client_size());
    let pixel_ratio = effective_pixel_ratio(canvas.device_pixel_ratio());
    let physical = logical.to_physical(pixel_ratio);

    let reallocated = canvas.buffer_size() != physical;
    if reallocated {
        trace!(
            width = physical.width,
            height = physical.height,
            pixel_ratio,
            "reallocate chart buffer"
        );
        canvas.set_buffer_size(physical)?;
    }

    Ok(SurfaceMetrics {
        logical,
        physical,
        pixel_ratio,
        reallocated,
    })
}
