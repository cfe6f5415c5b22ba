use std::fmt;
use std::rc::Rc;

use crate::core::{LogicalSize, PixelSize};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

/// Host drawable surface (a canvas element, an offscreen image, a widget).
///
/// Handles are cheap shared references; all methods take `&self` and the
/// host applies interior mutability, mirroring how platform canvas objects
/// behave.
pub trait CanvasHandle {
    /// Layout size in logical pixels. Zero when the container is hidden.
    fn client_size(&self) -> LogicalSize;

    /// Current backing-buffer size in physical pixels.
    fn buffer_size(&self) -> PixelSize;

    /// Reallocates the backing buffer. Existing pixels may be discarded.
    fn set_buffer_size(&self, size: PixelSize) -> ChartResult<()>;

    /// Physical-to-logical pixel ratio of the display, when known.
    fn device_pixel_ratio(&self) -> Option<f64> {
        None
    }

    /// Binds a 2D drawing context, or `None` when the surface cannot draw.
    fn context_2d(&self) -> Option<Box<dyn DrawingContext>>;

    /// Containing element whose size changes should trigger repaints.
    fn container(&self) -> Option<Rc<dyn ResizeObservable>> {
        None
    }
}

/// Drawing context already bound to a canvas.
pub trait DrawingContext: Renderer {
    fn canvas(&self) -> Option<Rc<dyn CanvasHandle>>;
}

pub type ResizeCallback = Box<dyn FnMut()>;

/// Source of container size-change notifications.
///
/// Deliveries may be coalesced and bursty; subscribers must treat every
/// notification as "sizes may have changed".
pub trait ResizeObservable {
    fn observe(&self, callback: ResizeCallback) -> ChartResult<Box<dyn ResizeSubscription>>;
}

/// Handle retracting one resize observation. `disconnect` is idempotent.
pub trait ResizeSubscription {
    fn disconnect(&mut self);

    fn is_connected(&self) -> bool;
}

/// Anything a chart can be constructed on.
pub enum ChartTarget {
    /// Raw surface handle; a 2D context is bound during resolution.
    Canvas(Rc<dyn CanvasHandle>),
    /// Pre-bound context; its canvas is looked up during resolution.
    Context(Box<dyn DrawingContext>),
    /// Nothing drawable, e.g. a missing element.
    Detached,
}

impl ChartTarget {
    #[must_use]
    pub fn canvas<C: CanvasHandle + 'static>(canvas: C) -> Self {
        Self::Canvas(Rc::new(canvas))
    }

    #[must_use]
    pub fn context<C: DrawingContext + 'static>(context: C) -> Self {
        Self::Context(Box::new(context))
    }

    /// Resolves a canvas/context pair.
    pub fn try_resolve(self) -> ChartResult<BoundSurface> {
        let bound = match self {
            Self::Canvas(canvas) => canvas
                .context_2d()
                .map(|context| BoundSurface { canvas, context }),
            Self::Context(context) => context
                .canvas()
                .map(|canvas| BoundSurface { canvas, context }),
            Self::Detached => None,
        };
        bound.ok_or(ChartError::UnresolvableSurface)
    }

    /// Like [`ChartTarget::try_resolve`]; `None` leaves the chart inert.
    #[must_use]
    pub fn resolve(self) -> Option<BoundSurface> {
        self.try_resolve().ok()
    }
}

impl fmt::Debug for ChartTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Self::Canvas(_) => "Canvas",
            Self::Context(_) => "Context",
            Self::Detached => "Detached",
        };
        f.debug_tuple("ChartTarget").field(&variant).finish()
    }
}

/// Resolved canvas plus the context drawing into it.
pub struct BoundSurface {
    pub canvas: Rc<dyn CanvasHandle>,
    pub context: Box<dyn DrawingContext>,
}
