use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::debug;

use crate::api::{ChartInstance, StyleSource};

use super::ThemePalette;

thread_local! {
    /// Registry serving the current UI thread.
    static INSTALLED: RefCell<Option<Rc<ThemeRegistry>>> = const { RefCell::new(None) };
}

/// Weak membership set of live charts that follow the host theme.
///
/// The registry never keeps a chart alive and never assumes an entry is
/// still usable: dropped or destroyed charts are skipped and pruned.
pub struct ThemeRegistry {
    styles: Rc<dyn StyleSource>,
    charts: RefCell<IndexMap<usize, Weak<dyn ChartInstance>>>,
}

impl ThemeRegistry {
    #[must_use]
    pub fn new(styles: Rc<dyn StyleSource>) -> Self {
        Self {
            styles,
            charts: RefCell::new(IndexMap::new()),
        }
    }

    /// Makes this registry the one returned by [`ThemeRegistry::current`]
    /// on this thread.
    pub fn install(self) -> Rc<Self> {
        let registry = Rc::new(self);
        INSTALLED.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&registry)));
        registry
    }

    #[must_use]
    pub fn current() -> Option<Rc<Self>> {
        INSTALLED.with(|slot| slot.borrow().clone())
    }

    pub fn uninstall() -> Option<Rc<Self>> {
        INSTALLED.with(|slot| slot.borrow_mut().take())
    }

    /// Adds `chart`. Destroyed charts and duplicates are ignored. Returns
    /// `true` when the chart was added.
    pub fn register(&self, chart: &Rc<dyn ChartInstance>) -> bool {
        if !chart.is_live() {
            return false;
        }
        let mut charts = self.charts.borrow_mut();
        let key = identity(chart);
        if charts.contains_key(&key) {
            return false;
        }
        charts.insert(key, Rc::downgrade(chart));
        true
    }

    /// Removes `chart` if present.
    pub fn unregister(&self, chart: &Rc<dyn ChartInstance>) -> bool {
        self.charts
            .borrow_mut()
            .shift_remove(&identity(chart))
            .is_some()
    }

    #[must_use]
    pub fn contains(&self, chart: &Rc<dyn ChartInstance>) -> bool {
        self.charts.borrow().contains_key(&identity(chart))
    }

    /// Number of entries, including ones that may have died since the last
    /// prune.
    #[must_use]
    pub fn len(&self) -> usize {
        self.charts.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops entries whose chart was dropped or destroyed. Returns the
    /// number removed.
    pub fn prune(&self) -> usize {
        let mut charts = self.charts.borrow_mut();
        let before = charts.len();
        charts.retain(|_, chart| chart.upgrade().is_some_and(|chart| chart.is_live()));
        before - charts.len()
    }

    /// Writes the current theme colors into `chart`'s configuration and
    /// repaints it. Returns `false` for destroyed charts.
    pub fn apply_theme(&self, chart: &dyn ChartInstance) -> bool {
        let palette = ThemePalette::resolve(self.styles.as_ref());
        apply_palette(&palette, chart)
    }

    /// Re-themes every live member exactly once. Returns the number of
    /// charts themed.
    ///
    /// Members are snapshotted first, so charts registered or unregistered
    /// by an `update` during the pass do not affect it.
    pub fn apply_all_themes(&self) -> usize {
        self.prune();
        let live: Vec<Rc<dyn ChartInstance>> = self
            .charts
            .borrow()
            .values()
            .filter_map(Weak::upgrade)
            .collect();

        let palette = ThemePalette::resolve(self.styles.as_ref());
        let themed = live
            .iter()
            .filter(|chart| apply_palette(&palette, chart.as_ref()))
            .count();
        debug!(themed, mode = ?palette.mode, "theme applied to registered charts");
        themed
    }
}

impl fmt::Debug for ThemeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeRegistry")
            .field("entries", &self.len())
            .finish()
    }
}

fn apply_palette(palette: &ThemePalette, chart: &dyn ChartInstance) -> bool {
    if !chart.is_live() {
        return false;
    }
    if let Some(config) = chart.config() {
        match config.try_borrow_mut() {
            Ok(mut config) => {
                palette.apply_to(&mut config);
            }
            Err(_) => debug!("chart config busy; theme colors not written"),
        }
    }
    if chart.supports_update() {
        chart.update();
    }
    true
}

fn identity(chart: &Rc<dyn ChartInstance>) -> usize {
    Rc::as_ptr(chart).cast::<()>() as usize
}
