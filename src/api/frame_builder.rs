use crate::core::{LogicalSize, PieLayout, fallback_hue, layout_pie};
use crate::render::{
    EraseDiskPrimitive, Paint, RenderFrame, StrokeStyle, TextHAlign, TextPrimitive,
    WedgePrimitive,
};

use super::{ChartConfig, SeriesConfig};

pub const LABEL_FONT_SIZE_PX: f64 = 13.0;
pub const NO_DATA_LABEL: &str = "No data";
pub const PLACEHOLDER_LABEL: &str = "Chart";

/// What a paint request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    /// No surface was resolved, or the chart was destroyed.
    Inert,
    /// A paint was already running on this chart; the request was dropped.
    Busy,
    /// Circular chart whose values sum to zero.
    NoData,
    /// Chart kind the engine does not draw.
    Placeholder,
    /// Circular chart with `count` drawn wedges.
    Slices { count: usize },
}

/// Builds the full repaint for `config` over `viewport`.
///
/// `muted_color` paints the empty-state and placeholder labels.
#[must_use]
pub fn build_chart_frame(
    config: &ChartConfig,
    viewport: LogicalSize,
    pixel_ratio: f64,
    muted_color: &str,
) -> (RenderFrame, PaintOutcome) {
    let frame = RenderFrame::new(viewport, pixel_ratio);
    if !config.kind.is_circular() {
        return (
            frame.with_text(centered_label(PLACEHOLDER_LABEL, viewport, muted_color)),
            PaintOutcome::Placeholder,
        );
    }

    let series = config.primary_series();
    let values = series.map_or(&[][..], |series| series.values.as_slice());
    let Some(layout) = layout_pie(values, config.cutout_ratio(), viewport) else {
        return (
            frame.with_text(centered_label(NO_DATA_LABEL, viewport, muted_color)),
            PaintOutcome::NoData,
        );
    };

    let frame = push_wedges(frame, &layout, series);
    let count = frame.wedges.len();
    (frame, PaintOutcome::Slices { count })
}

fn push_wedges(
    mut frame: RenderFrame,
    layout: &PieLayout,
    series: Option<&SeriesConfig>,
) -> RenderFrame {
    let stroke = series.and_then(border_stroke);
    for slice in &layout.slices {
        let hue = fallback_hue(slice.index, layout.value_count);
        let fill = series
            .and_then(|series| series.color_at(slice.index))
            .map(Paint::css)
            .unwrap_or_else(|| Paint::fallback_hue(hue));
        frame.wedges.push(WedgePrimitive {
            center_x: layout.center_x,
            center_y: layout.center_y,
            radius: layout.outer_radius,
            start_angle: slice.start_angle,
            end_angle: slice.end_angle,
            fill,
            stroke: stroke.clone(),
            fallback_hue: hue,
        });
    }

    // One erase pass after every wedge, never per wedge.
    if layout.has_cutout() {
        frame.cutout = Some(EraseDiskPrimitive {
            center_x: layout.center_x,
            center_y: layout.center_y,
            radius: layout.inner_radius,
        });
    }
    frame
}

fn border_stroke(series: &SeriesConfig) -> Option<StrokeStyle> {
    let width = *series.border_width.value()?;
    let color = series.border_color.value()?;
    if !width.is_finite() || width <= 0.0 || color.trim().is_empty() {
        return None;
    }
    Some(StrokeStyle {
        width,
        paint: Paint::css(color.clone()),
    })
}

fn centered_label(text: &str, viewport: LogicalSize, color: &str) -> TextPrimitive {
    let (x, y) = viewport.center();
    TextPrimitive::new(
        text,
        x,
        y,
        LABEL_FONT_SIZE_PX,
        Paint::css(color),
        TextHAlign::Center,
    )
}
