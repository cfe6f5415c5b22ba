use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::debug;

use crate::core::LogicalSize;
use crate::error::ChartResult;
use crate::render::{CairoCanvas, ChartTarget};

/// `gtk::DrawingArea` hosting an offscreen [`CairoCanvas`].
///
/// Widget resizes feed the canvas' resize container, so a responsive chart
/// bound to [`GtkChartArea::target`] repaints on its own; the draw function
/// only presents the last buffer.
#[derive(Debug, Clone)]
pub struct GtkChartArea {
    widget: gtk::DrawingArea,
    canvas: CairoCanvas,
}

impl GtkChartArea {
    pub fn new(content_width: i32, content_height: i32) -> ChartResult<Self> {
        let widget = gtk::DrawingArea::new();
        widget.set_content_width(content_width);
        widget.set_content_height(content_height);

        let canvas = CairoCanvas::new(LogicalSize::new(
            f64::from(content_width.max(0)),
            f64::from(content_height.max(0)),
        ))?;
        canvas.set_device_pixel_ratio(Some(f64::from(widget.scale_factor())));

        let draw_canvas = canvas.clone();
        widget.set_draw_func(move |_, context, _, _| {
            if let Err(err) = draw_canvas.present(context) {
                debug!(error = %err, "chart buffer not presented");
            }
        });

        let resize_canvas = canvas.clone();
        widget.connect_resize(move |area, width, height| {
            resize_canvas.set_device_pixel_ratio(Some(f64::from(area.scale_factor())));
            resize_canvas.set_client_size(LogicalSize::new(
                f64::from(width.max(0)),
                f64::from(height.max(0)),
            ));
            area.queue_draw();
        });

        Ok(Self { widget, canvas })
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.widget
    }

    #[must_use]
    pub fn canvas(&self) -> &CairoCanvas {
        &self.canvas
    }

    /// Target to hand to `MiniChart::new`.
    #[must_use]
    pub fn target(&self) -> ChartTarget {
        self.canvas.target()
    }

    /// Schedules a present after a manual `update`.
    pub fn queue_draw(&self) {
        self.widget.queue_draw();
    }
}
