use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::render::ChartTarget;

use super::{MiniChart, SharedConfig, StaticStyles, StyleSource};

/// Capability set shared by every renderer the dashboard can drive.
///
/// A full-featured external renderer and [`MiniChart`] are interchangeable
/// behind this trait.
pub trait ChartInstance {
    /// Live configuration, when the renderer exposes one.
    fn config(&self) -> Option<SharedConfig>;

    /// Repaints from the current configuration.
    fn update(&self);

    /// Releases observers and clears the surface. Idempotent.
    fn destroy(&self);

    /// `false` for renderers without a usable `update`.
    fn supports_update(&self) -> bool {
        true
    }

    /// `false` once the instance has been torn down.
    fn is_live(&self) -> bool {
        true
    }
}

impl ChartInstance for MiniChart {
    fn config(&self) -> Option<SharedConfig> {
        Some(MiniChart::config(self))
    }

    fn update(&self) {
        MiniChart::update(self);
    }

    fn destroy(&self) {
        MiniChart::destroy(self);
    }

    fn is_live(&self) -> bool {
        !self.is_destroyed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    /// External full-featured charting library.
    Full,
    /// The built-in [`MiniChart`] engine.
    Minimal,
}

/// Constructs chart instances for one renderer variant.
pub trait ChartFactory {
    fn kind(&self) -> RendererKind;

    fn construct(&self, target: ChartTarget, config: SharedConfig) -> Rc<dyn ChartInstance>;
}

/// Factory for [`MiniChart`].
pub struct MiniChartFactory {
    styles: Rc<dyn StyleSource>,
}

impl MiniChartFactory {
    #[must_use]
    pub fn new(styles: Rc<dyn StyleSource>) -> Self {
        Self { styles }
    }
}

impl Default for MiniChartFactory {
    fn default() -> Self {
        Self::new(Rc::new(StaticStyles::default()))
    }
}

impl ChartFactory for MiniChartFactory {
    fn kind(&self) -> RendererKind {
        RendererKind::Minimal
    }

    fn construct(&self, target: ChartTarget, config: SharedConfig) -> Rc<dyn ChartInstance> {
        Rc::new(MiniChart::with_styles(
            target,
            config,
            Rc::clone(&self.styles),
        ))
    }
}

/// Renderer chosen once at startup; every chart goes through it.
#[derive(Clone)]
pub struct ChartRuntime {
    factory: Rc<dyn ChartFactory>,
}

impl ChartRuntime {
    /// Uses `full` when the external renderer is available, else the
    /// built-in engine with `styles`.
    #[must_use]
    pub fn select(full: Option<Rc<dyn ChartFactory>>, styles: Rc<dyn StyleSource>) -> Self {
        let factory =
            full.unwrap_or_else(|| Rc::new(MiniChartFactory::new(styles)) as Rc<dyn ChartFactory>);
        debug!(kind = ?factory.kind(), "chart renderer selected");
        Self { factory }
    }

    #[must_use]
    pub fn kind(&self) -> RendererKind {
        self.factory.kind()
    }

    #[must_use]
    pub fn construct(&self, target: ChartTarget, config: SharedConfig) -> Rc<dyn ChartInstance> {
        self.factory.construct(target, config)
    }
}

impl fmt::Debug for ChartRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartRuntime")
            .field("kind", &self.kind())
            .finish()
    }
}
