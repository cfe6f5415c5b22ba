use std::cell::RefCell;
use std::f64::consts::TAU;
use std::io::Write;
use std::rc::Rc;

use cairo::{Context, Format, ImageSurface, Operator};
use pango::FontDescription;
use tracing::debug;

use crate::core::{LogicalSize, PixelSize};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CanvasHandle, ChartTarget, Color, DrawingContext, EraseDiskPrimitive, Paint, RenderFrame,
    Renderer, ResizeHub, ResizeObservable, TextHAlign, TextPrimitive, WedgePrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub wedges_drawn: usize,
    pub cutouts_erased: usize,
    pub texts_drawn: usize,
    /// Configured colors that could not be resolved and were replaced.
    pub paints_substituted: usize,
}

#[derive(Debug)]
struct CairoCanvasState {
    surface: ImageSurface,
    client_size: LogicalSize,
    device_pixel_ratio: Option<f64>,
    last_stats: CairoRenderStats,
}

/// Offscreen ARGB32 canvas backed by Cairo + Pango + PangoCairo.
///
/// The canvas is a shared handle: clones refer to the same image surface and
/// resize container. Hosts feed layout changes through
/// [`CairoCanvas::set_client_size`] and present the buffer with
/// [`CairoCanvas::present`].
#[derive(Debug, Clone)]
pub struct CairoCanvas {
    state: Rc<RefCell<CairoCanvasState>>,
    hub: ResizeHub,
}

impl CairoCanvas {
    pub fn new(client_size: LogicalSize) -> ChartResult<Self> {
        let surface = create_surface(PixelSize::new(300, 150))?;
        Ok(Self {
            state: Rc::new(RefCell::new(CairoCanvasState {
                surface,
                client_size,
                device_pixel_ratio: None,
                last_stats: CairoRenderStats::default(),
            })),
            hub: ResizeHub::new(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn target(&self) -> ChartTarget {
        ChartTarget::canvas(self.clone())
    }

    /// Changes the layout size and notifies resize observers.
    pub fn set_client_size(&self, size: LogicalSize) -> usize {
        self.state.borrow_mut().client_size = size;
        self.hub.notify()
    }

    pub fn set_device_pixel_ratio(&self, ratio: Option<f64>) {
        self.state.borrow_mut().device_pixel_ratio = ratio;
    }

    #[must_use]
    pub fn surface(&self) -> ImageSurface {
        self.state.borrow().surface.clone()
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.state.borrow().last_stats
    }

    /// Paints the buffer onto a host context at logical scale, e.g. from a
    /// widget draw callback.
    pub fn present(&self, context: &Context) -> ChartResult<()> {
        let surface = self.surface();
        let ratio = self.device_pixel_ratio().unwrap_or(1.0).max(1.0);
        context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        context.scale(1.0 / ratio, 1.0 / ratio);
        context
            .set_source_surface(&surface, 0.0, 0.0)
            .map_err(|err| map_backend_error("failed to set source surface", err))?;
        context
            .paint()
            .map_err(|err| map_backend_error("failed to present surface", err))?;
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))
    }

    /// Alpha of one physical pixel.
    pub fn pixel_alpha(&self, x: u32, y: u32) -> ChartResult<u8> {
        self.pixel_argb(x, y).map(|[alpha, ..]| alpha)
    }

    /// Premultiplied `[alpha, red, green, blue]` of one physical pixel.
    pub fn pixel_argb(&self, x: u32, y: u32) -> ChartResult<[u8; 4]> {
        let surface = self.surface();
        surface.flush();
        let (width, height) = (surface.width(), surface.height());
        if i64::from(x) >= i64::from(width) || i64::from(y) >= i64::from(height) {
            return Err(ChartError::InvalidData(format!(
                "pixel ({x}, {y}) outside {width}x{height} surface"
            )));
        }
        let stride = usize::try_from(surface.stride())
            .map_err(|_| ChartError::Backend("negative surface stride".to_owned()))?;
        // ARGB32 is stored native-endian; alpha is the most significant byte.
        let offset = y as usize * stride + x as usize * 4;
        let mut argb = [0; 4];
        surface
            .with_data(|data| {
                let pixel = [
                    data[offset],
                    data[offset + 1],
                    data[offset + 2],
                    data[offset + 3],
                ];
                argb = u32::from_ne_bytes(pixel).to_be_bytes();
            })
            .map_err(|err| ChartError::Backend(format!("failed to read surface: {err}")))?;
        Ok(argb)
    }

    pub fn write_png<W: Write>(&self, writer: &mut W) -> ChartResult<()> {
        self.surface()
            .write_to_png(writer)
            .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))
    }
}

impl CanvasHandle for CairoCanvas {
    fn client_size(&self) -> LogicalSize {
        self.state.borrow().client_size
    }

    fn buffer_size(&self) -> PixelSize {
        let state = self.state.borrow();
        PixelSize::new(
            u32::try_from(state.surface.width()).unwrap_or(0),
            u32::try_from(state.surface.height()).unwrap_or(0),
        )
    }

    fn set_buffer_size(&self, size: PixelSize) -> ChartResult<()> {
        let surface = create_surface(size)?;
        self.state.borrow_mut().surface = surface;
        Ok(())
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.state.borrow().device_pixel_ratio
    }

    fn context_2d(&self) -> Option<Box<dyn DrawingContext>> {
        Some(Box::new(CairoContext {
            canvas: self.clone(),
        }))
    }

    fn container(&self) -> Option<Rc<dyn ResizeObservable>> {
        Some(Rc::new(self.hub.clone()))
    }
}

/// Drawing context bound to a [`CairoCanvas`].
///
/// A fresh `cairo::Context` is created per pass because the canvas may have
/// swapped its image surface since the last one.
#[derive(Debug)]
pub struct CairoContext {
    canvas: CairoCanvas,
}

impl CairoContext {
    fn new_context(&self, pixel_ratio: f64) -> ChartResult<Context> {
        let context = Context::new(&self.canvas.surface())
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        context.scale(pixel_ratio, pixel_ratio);
        Ok(context)
    }
}

impl Renderer for CairoContext {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let context = self.new_context(frame.pixel_ratio)?;
        clear_area(&context, frame.viewport)?;

        let mut stats = CairoRenderStats::default();
        for wedge in &frame.wedges {
            draw_wedge(&context, wedge, &mut stats)?;
            stats.wedges_drawn += 1;
        }
        if let Some(cutout) = frame.cutout {
            erase_disk(&context, cutout)?;
            stats.cutouts_erased += 1;
        }
        for text in &frame.texts {
            draw_text(&context, text, &mut stats)?;
            stats.texts_drawn += 1;
        }

        self.canvas.state.borrow_mut().last_stats = stats;
        Ok(())
    }

    fn clear(&mut self, area: LogicalSize) -> ChartResult<()> {
        let ratio = self.canvas.device_pixel_ratio().unwrap_or(1.0).max(1.0);
        let context = self.new_context(ratio)?;
        clear_area(&context, area)
    }
}

impl DrawingContext for CairoContext {
    fn canvas(&self) -> Option<Rc<dyn CanvasHandle>> {
        Some(Rc::new(self.canvas.clone()))
    }
}

fn create_surface(size: PixelSize) -> ChartResult<ImageSurface> {
    let width = i32::try_from(size.width.max(1))
        .map_err(|_| ChartError::InvalidData("cairo surface width overflow".to_owned()))?;
    let height = i32::try_from(size.height.max(1))
        .map_err(|_| ChartError::InvalidData("cairo surface height overflow".to_owned()))?;
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

fn clear_area(context: &Context, area: LogicalSize) -> ChartResult<()> {
    context.set_operator(Operator::Clear);
    context.rectangle(0.0, 0.0, area.width, area.height);
    let result = context
        .fill()
        .map_err(|err| map_backend_error("failed to clear surface", err));
    context.set_operator(Operator::Over);
    result
}

fn draw_wedge(
    context: &Context,
    wedge: &WedgePrimitive,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    context.new_path();
    context.move_to(wedge.center_x, wedge.center_y);
    context.arc(
        wedge.center_x,
        wedge.center_y,
        wedge.radius,
        wedge.start_angle,
        wedge.end_angle,
    );
    context.close_path();

    let fill = resolve_paint(&wedge.fill).unwrap_or_else(|| {
        stats.paints_substituted += 1;
        Paint::fallback_hue(wedge.fallback_hue).resolve().unwrap_or(Color::TRANSPARENT)
    });
    apply_color(context, fill);

    let stroke = wedge.stroke.as_ref().and_then(|stroke| {
        let color = resolve_paint(&stroke.paint);
        if color.is_none() {
            stats.paints_substituted += 1;
        }
        color.map(|color| (stroke.width, color))
    });
    let Some((width, color)) = stroke else {
        return context
            .fill()
            .map_err(|err| map_backend_error("failed to fill wedge", err));
    };
    context
        .fill_preserve()
        .map_err(|err| map_backend_error("failed to fill wedge", err))?;
    apply_color(context, color);
    context.set_line_width(width);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke wedge border", err))
}

fn erase_disk(context: &Context, disk: EraseDiskPrimitive) -> ChartResult<()> {
    context.set_operator(Operator::DestOut);
    context.new_path();
    context.arc(disk.center_x, disk.center_y, disk.radius, 0.0, TAU);
    apply_color(context, Color::rgb(0.0, 0.0, 0.0));
    let result = context
        .fill()
        .map_err(|err| map_backend_error("failed to erase cutout", err));
    context.set_operator(Operator::Over);
    result
}

fn draw_text(
    context: &Context,
    text: &TextPrimitive,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let mut font_description = FontDescription::new();
    font_description.set_family("Sans");
    font_description.set_absolute_size(text.font_size_px * f64::from(pango::SCALE));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };
    let y = text.y - f64::from(text_height) / 2.0;

    // An unresolvable label color keeps the current source, like a rejected
    // canvas `fillStyle`.
    match resolve_paint(&text.paint) {
        Some(color) => apply_color(context, color),
        None => stats.paints_substituted += 1,
    }
    context.move_to(x, y);
    pangocairo::functions::show_layout(context, &layout);
    Ok(())
}

fn resolve_paint(paint: &Paint) -> Option<Color> {
    match paint.resolve().and_then(|color| color.validate().map(|()| color)) {
        Ok(color) => Some(color),
        Err(err) => {
            debug!(paint = %paint, error = %err, "substituting unresolvable paint");
            None
        }
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
