use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{LogicalSize, PixelSize};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CanvasHandle, ChartTarget, DrawingContext, RenderFrame, Renderer, ResizeHub,
    ResizeObservable,
};

/// Counters accumulated by a [`RecordingCanvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordingStats {
    pub renders: usize,
    pub clears: usize,
    pub buffer_allocations: usize,
    pub last_wedge_count: usize,
    pub last_text_count: usize,
    pub last_cutout_erased: bool,
}

#[derive(Debug)]
struct RecordingState {
    client_size: LogicalSize,
    buffer_size: PixelSize,
    device_pixel_ratio: Option<f64>,
    context_available: bool,
    container_available: bool,
    fail_clears: bool,
    last_frame: Option<RenderFrame>,
    last_clear: Option<LogicalSize>,
    stats: RecordingStats,
}

/// Headless canvas used by tests and by hosts without a raster backend.
///
/// Every frame is validated before it is recorded, so invalid geometry is
/// caught even though nothing is rasterized. The canvas doubles as its own
/// resize container: [`RecordingCanvas::set_client_size`] notifies observers.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    state: Rc<RefCell<RecordingState>>,
    hub: ResizeHub,
}

impl RecordingCanvas {
    /// Buffer size a fresh canvas element starts with.
    pub const INITIAL_BUFFER: PixelSize = PixelSize::new(300, 150);

    #[must_use]
    pub fn new(client_size: LogicalSize) -> Self {
        Self {
            state: Rc::new(RefCell::new(RecordingState {
                client_size,
                buffer_size: Self::INITIAL_BUFFER,
                device_pixel_ratio: None,
                context_available: true,
                container_available: true,
                fail_clears: false,
                last_frame: None,
                last_clear: None,
                stats: RecordingStats::default(),
            })),
            hub: ResizeHub::new(),
        }
    }

    #[must_use]
    pub fn with_device_pixel_ratio(self, ratio: f64) -> Self {
        self.state.borrow_mut().device_pixel_ratio = Some(ratio);
        self
    }

    /// Simulates a surface whose 2D context cannot be bound.
    #[must_use]
    pub fn without_context(self) -> Self {
        self.state.borrow_mut().context_available = false;
        self
    }

    /// Simulates a surface that is not attached to any container.
    #[must_use]
    pub fn without_container(self) -> Self {
        self.state.borrow_mut().container_available = false;
        self
    }

    /// Simulates a host without resize observation support.
    #[must_use]
    pub fn with_rejecting_container(self) -> Self {
        self.hub.set_rejecting(true);
        self
    }

    #[must_use]
    pub fn target(&self) -> ChartTarget {
        ChartTarget::canvas(self.clone())
    }

    /// Target that hands over an already-bound context instead of the canvas.
    #[must_use]
    pub fn context_target(&self) -> ChartTarget {
        ChartTarget::context(RecordingContext {
            canvas: self.clone(),
        })
    }

    /// Changes the layout size and notifies resize observers.
    pub fn set_client_size(&self, size: LogicalSize) -> usize {
        self.state.borrow_mut().client_size = size;
        self.hub.notify()
    }

    pub fn set_device_pixel_ratio(&self, ratio: Option<f64>) {
        self.state.borrow_mut().device_pixel_ratio = ratio;
    }

    /// Makes subsequent clears fail, as a detached element would.
    pub fn set_fail_clears(&self, fail: bool) {
        self.state.borrow_mut().fail_clears = fail;
    }

    #[must_use]
    pub fn hub(&self) -> &ResizeHub {
        &self.hub
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<RenderFrame> {
        self.state.borrow().last_frame.clone()
    }

    #[must_use]
    pub fn last_clear(&self) -> Option<LogicalSize> {
        self.state.borrow().last_clear
    }

    #[must_use]
    pub fn stats(&self) -> RecordingStats {
        self.state.borrow().stats
    }
}

impl CanvasHandle for RecordingCanvas {
    fn client_size(&self) -> LogicalSize {
        self.state.borrow().client_size
    }

    fn buffer_size(&self) -> PixelSize {
        self.state.borrow().buffer_size
    }

    fn set_buffer_size(&self, size: PixelSize) -> ChartResult<()> {
        let mut state = self.state.borrow_mut();
        state.buffer_size = size;
        state.stats.buffer_allocations += 1;
        Ok(())
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.state.borrow().device_pixel_ratio
    }

    fn context_2d(&self) -> Option<Box<dyn DrawingContext>> {
        if !self.state.borrow().context_available {
            return None;
        }
        Some(Box::new(RecordingContext {
            canvas: self.clone(),
        }))
    }

    fn container(&self) -> Option<Rc<dyn ResizeObservable>> {
        if !self.state.borrow().container_available {
            return None;
        }
        Some(Rc::new(self.hub.clone()))
    }
}

/// Context bound to a [`RecordingCanvas`].
#[derive(Debug)]
pub struct RecordingContext {
    canvas: RecordingCanvas,
}

impl Renderer for RecordingContext {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let mut state = self.canvas.state.borrow_mut();
        state.stats.renders += 1;
        state.stats.last_wedge_count = frame.wedges.len();
        state.stats.last_text_count = frame.texts.len();
        state.stats.last_cutout_erased = frame.cutout.is_some();
        state.last_frame = Some(frame.clone());
        Ok(())
    }

    fn clear(&mut self, area: LogicalSize) -> ChartResult<()> {
        let mut state = self.canvas.state.borrow_mut();
        if state.fail_clears {
            return Err(ChartError::Backend(
                "recording canvas refused to clear".to_owned(),
            ));
        }
        state.stats.clears += 1;
        state.last_clear = Some(area);
        Ok(())
    }
}

impl DrawingContext for RecordingContext {
    fn canvas(&self) -> Option<Rc<dyn CanvasHandle>> {
        Some(Rc::new(self.canvas.clone()))
    }
}
