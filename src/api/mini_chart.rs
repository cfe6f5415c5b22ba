use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::ChartResult;
use crate::render::{BoundSurface, ChartTarget, ResizeSubscription};

use super::frame_builder::{PaintOutcome, build_chart_frame};
use super::sizing::{effective_logical_size, prepare_surface};
use super::style_source::{MUTED_LABEL_FALLBACK, MUTED_LABEL_VAR, StaticStyles, css_var_or};
use super::{SharedConfig, StyleSource};

struct ChartState {
    surface: Option<BoundSurface>,
    config: SharedConfig,
    styles: Rc<dyn StyleSource>,
    subscription: Option<Box<dyn ResizeSubscription>>,
    destroyed: bool,
}

struct ChartCell {
    state: RefCell<ChartState>,
    /// Set by a `destroy` that arrived while a paint held the state.
    destroy_pending: Cell<bool>,
}

/// Minimal pie/ring renderer with a construct/update/destroy lifecycle.
///
/// Every paint is a full repaint from the current configuration: the
/// buffer is sized for the container, cleared, then the frame is drawn.
/// None of the lifecycle calls fail; an unresolvable target produces an
/// inert chart whose operations do nothing.
pub struct MiniChart {
    cell: Rc<ChartCell>,
}

impl MiniChart {
    /// Builds a chart with no host style variables (fallback colors only).
    #[must_use]
    pub fn new(target: ChartTarget, config: SharedConfig) -> Self {
        Self::with_styles(target, config, Rc::new(StaticStyles::default()))
    }

    /// Builds a chart, paints it once, and observes container resizes
    /// unless `options.responsive` is `false`.
    #[must_use]
    pub fn with_styles(
        target: ChartTarget,
        config: SharedConfig,
        styles: Rc<dyn StyleSource>,
    ) -> Self {
        let surface = match target.try_resolve() {
            Ok(surface) => Some(surface),
            Err(err) => {
                debug!(error = %err, "chart is inert");
                None
            }
        };

        let chart = Self {
            cell: Rc::new(ChartCell {
                state: RefCell::new(ChartState {
                    surface,
                    config,
                    styles,
                    subscription: None,
                    destroyed: false,
                }),
                destroy_pending: Cell::new(false),
            }),
        };
        chart.update();

        let responsive = chart.cell.state.borrow().config.borrow().options.responsive;
        if responsive && !chart.is_destroyed() {
            chart.observe_container();
        }
        chart
    }

    fn observe_container(&self) {
        let container = match &self.cell.state.borrow().surface {
            Some(surface) => surface.canvas.container(),
            None => return,
        };
        let Some(container) = container else {
            debug!("chart surface has no container; resize observation skipped");
            return;
        };

        let weak_cell = Rc::downgrade(&self.cell);
        let subscription = container.observe(Box::new(move || {
            let Some(cell) = weak_cell.upgrade() else {
                return;
            };
            if let Err(err) = repaint(&cell) {
                debug!(error = %err, "resize repaint failed");
            }
        }));
        match subscription {
            Ok(subscription) => self.cell.state.borrow_mut().subscription = Some(subscription),
            Err(err) => debug!(error = %err, "resize observation unavailable"),
        }
    }

    /// Configuration handle shared with the caller.
    #[must_use]
    pub fn config(&self) -> SharedConfig {
        Rc::clone(&self.cell.state.borrow().config)
    }

    /// `true` when no surface was resolved or the chart was destroyed.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.cell.state.borrow().surface.is_none()
    }

    /// `true` once `destroy` was called, even if teardown is still deferred
    /// behind a running paint.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.cell.destroy_pending.get()
            || self
                .cell
                .state
                .try_borrow()
                .is_ok_and(|state| state.destroyed)
    }

    /// Whether container resizes currently trigger repaints.
    #[must_use]
    pub fn observes_resize(&self) -> bool {
        self.cell
            .state
            .borrow()
            .subscription
            .as_ref()
            .is_some_and(|subscription| subscription.is_connected())
    }

    /// Repaints from the current configuration and reports what was drawn.
    pub fn try_update(&self) -> ChartResult<PaintOutcome> {
        repaint(&self.cell)
    }

    /// Repaints from the current configuration. Failures are swallowed.
    pub fn update(&self) {
        if let Err(err) = self.try_update() {
            debug!(error = %err, "chart update failed");
        }
    }

    /// Stops resize observation and clears the drawn area. Safe to call any
    /// number of times, including while the surrounding UI is being torn down.
    ///
    /// Called from inside a running paint (a host callback re-entering the
    /// chart), teardown is deferred until that paint releases the chart.
    pub fn destroy(&self) {
        self.cell.destroy_pending.set(true);
        teardown(&self.cell);
    }
}

impl fmt::Debug for MiniChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.state.try_borrow() {
            Ok(state) => f
                .debug_struct("MiniChart")
                .field("inert", &state.surface.is_none())
                .field("observing_resize", &state.subscription.is_some())
                .field("destroyed", &state.destroyed)
                .field("destroy_pending", &self.cell.destroy_pending.get())
                .finish(),
            Err(_) => f.debug_struct("MiniChart").finish_non_exhaustive(),
        }
    }
}

fn repaint(cell: &ChartCell) -> ChartResult<PaintOutcome> {
    let outcome = paint(&cell.state);
    if cell.destroy_pending.get() {
        teardown(cell);
    }
    outcome
}

fn teardown(cell: &ChartCell) {
    let Ok(mut state) = cell.state.try_borrow_mut() else {
        debug!("chart destroy deferred while a paint is running");
        return;
    };

    if let Some(mut subscription) = state.subscription.take() {
        subscription.disconnect();
    }
    state.destroyed = true;

    if let Some(mut surface) = state.surface.take() {
        let area = effective_logical_size(surface.canvas.client_size());
        if let Err(err) = surface.context.clear(area) {
            debug!(error = %err, "chart clear during destroy failed");
        }
    }
    cell.destroy_pending.set(false);
}

fn paint(state: &RefCell<ChartState>) -> ChartResult<PaintOutcome> {
    let Ok(mut state) = state.try_borrow_mut() else {
        return Ok(PaintOutcome::Busy);
    };
    let state = &mut *state;
    let Some(surface) = state.surface.as_mut() else {
        return Ok(PaintOutcome::Inert);
    };
    let Ok(config) = state.config.try_borrow() else {
        return Ok(PaintOutcome::Busy);
    };

    let metrics = prepare_surface(surface.canvas.as_ref())?;
    let muted = css_var_or(state.styles.as_ref(), MUTED_LABEL_VAR, MUTED_LABEL_FALLBACK);
    let (frame, outcome) =
        build_chart_frame(&config, metrics.logical, metrics.pixel_ratio, &muted);
    drop(config);

    surface.context.render(&frame)?;
    trace!(
        ?outcome,
        width = metrics.logical.width,
        height = metrics.logical.height,
        pixel_ratio = metrics.pixel_ratio,
        "chart painted"
    );
    Ok(outcome)
}
