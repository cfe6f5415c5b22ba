use std::cell::{Cell, RefCell};
use std::rc::Rc;

use minichart::api::{
    ChartConfig, ChartInstance, MiniChart, SeriesConfig, SharedConfig, StaticStyles, Themed,
};
use minichart::core::LogicalSize;
use minichart::render::{Paint, RecordingCanvas};
use minichart::theme::{
    CHART_BORDER_FALLBACK, DARK_TOOLTIP_BACKGROUND, LIGHT_TOOLTIP_BACKGROUND, STROKE_FALLBACK,
    TEXT_FALLBACK, ThemeMode, ThemePalette, ThemeRegistry,
};

/// Chart double that counts calls and can be flipped to dead.
struct CountingChart {
    config: Option<SharedConfig>,
    updates: Cell<usize>,
    destroyed: Cell<bool>,
    updatable: bool,
}

impl CountingChart {
    fn new(config: ChartConfig) -> Rc<Self> {
        Rc::new(Self {
            config: Some(config.into_shared()),
            updates: Cell::new(0),
            destroyed: Cell::new(false),
            updatable: true,
        })
    }
}

impl ChartInstance for CountingChart {
    fn config(&self) -> Option<SharedConfig> {
        self.config.clone()
    }

    fn update(&self) {
        self.updates.set(self.updates.get() + 1);
    }

    fn destroy(&self) {
        self.destroyed.set(true);
    }

    fn supports_update(&self) -> bool {
        self.updatable
    }

    fn is_live(&self) -> bool {
        !self.destroyed.get()
    }
}

fn as_instance(chart: &Rc<CountingChart>) -> Rc<dyn ChartInstance> {
    Rc::clone(chart) as Rc<dyn ChartInstance>
}

fn ring_config() -> ChartConfig {
    ChartConfig::ring()
        .with_series(SeriesConfig::new(vec![1.0, 2.0]))
        .with_title("Usage")
}

#[test]
fn palette_uses_fallbacks_and_dark_mode_by_default() {
    let palette = ThemePalette::resolve(&StaticStyles::new());
    assert_eq!(palette.mode, ThemeMode::Dark);
    assert_eq!(palette.text, TEXT_FALLBACK);
    assert_eq!(palette.stroke, STROKE_FALLBACK);
    assert_eq!(palette.chart_border, CHART_BORDER_FALLBACK);
    assert_eq!(palette.tooltip_background, DARK_TOOLTIP_BACKGROUND);
}

#[test]
fn only_the_light_theme_id_selects_light_tooltips() {
    let light = ThemePalette::resolve(&StaticStyles::new().with_theme_id("light"));
    assert_eq!(light.tooltip_background, LIGHT_TOOLTIP_BACKGROUND);

    for id in ["Light", "solarized", ""] {
        let palette = ThemePalette::resolve(&StaticStyles::new().with_theme_id(id));
        assert_eq!(palette.mode, ThemeMode::Dark, "theme id {id:?}");
    }
}

#[test]
fn apply_theme_fills_every_unset_field_and_repaints() {
    let registry = ThemeRegistry::new(Rc::new(
        StaticStyles::new()
            .with_var("--text", "#eeeeee")
            .with_var("--stroke", "#555555")
            .with_var("--chartBorder", "#444444"),
    ));
    let chart = CountingChart::new(ring_config());

    assert!(registry.apply_theme(&*chart));
    assert_eq!(chart.updates.get(), 1);

    let config = chart.config().expect("config");
    let config = config.borrow();
    let options = &config.options;
    assert_eq!(options.color, Themed::Theme("#eeeeee".to_owned()));
    assert_eq!(options.legend_label_color, Themed::Theme("#eeeeee".to_owned()));
    assert_eq!(
        options.tooltip.background_color,
        Themed::Theme(DARK_TOOLTIP_BACKGROUND.to_owned())
    );
    assert_eq!(options.tooltip.title_color, Themed::Theme("#eeeeee".to_owned()));
    assert_eq!(options.tooltip.body_color, Themed::Theme("#eeeeee".to_owned()));
    assert_eq!(options.tooltip.border_color, Themed::Theme("#555555".to_owned()));
    assert_eq!(options.tooltip.border_width, Themed::Theme(1.0));
    assert_eq!(
        options.title.as_ref().expect("title").color,
        Themed::Theme("#eeeeee".to_owned())
    );
    let series = &config.series[0];
    assert_eq!(series.border_width, Themed::Theme(1.0));
    assert_eq!(series.border_color, Themed::Theme("#444444".to_owned()));
}

#[test]
fn explicit_series_borders_survive_theme_changes() {
    let styles = Rc::new(StaticStyles::new());
    let registry = ThemeRegistry::new(styles.clone());
    let config = ChartConfig::pie()
        .with_series(SeriesConfig::new(vec![1.0]).with_border(3.0, "#ff00ff"));
    let chart = CountingChart::new(config);

    registry.apply_theme(&*chart);
    styles.set_theme_id("light");
    styles.set_var("--chartBorder", "#000000");
    registry.apply_theme(&*chart);

    let config = chart.config().expect("config");
    let config = config.borrow();
    let series = &config.series[0];
    assert_eq!(series.border_width, Themed::Explicit(3.0));
    assert_eq!(series.border_color, Themed::Explicit("#ff00ff".to_owned()));
}

#[test]
fn theme_switch_refreshes_theme_owned_fields() {
    let styles = Rc::new(StaticStyles::new().with_theme_id("dark"));
    let registry = ThemeRegistry::new(styles.clone());
    let chart = CountingChart::new(ring_config());
    registry.apply_theme(&*chart);

    styles.set_theme_id("light");
    styles.set_var("--text", "#111111");
    registry.apply_theme(&*chart);

    let config = chart.config().expect("config");
    let config = config.borrow();
    let options = &config.options;
    assert_eq!(
        options.tooltip.background_color,
        Themed::Theme(LIGHT_TOOLTIP_BACKGROUND.to_owned())
    );
    assert_eq!(options.color, Themed::Theme("#111111".to_owned()));
}

#[test]
fn instances_without_update_only_get_their_config_written() {
    let registry = ThemeRegistry::new(Rc::new(StaticStyles::new()));
    let chart = Rc::new(CountingChart {
        config: Some(ring_config().into_shared()),
        updates: Cell::new(0),
        destroyed: Cell::new(false),
        updatable: false,
    });

    assert!(registry.apply_theme(&*chart));
    assert_eq!(chart.updates.get(), 0);
    let config = chart.config().expect("config");
    assert!(!config.borrow().options.color.is_unset());

    let configless = Rc::new(CountingChart {
        config: None,
        updates: Cell::new(0),
        destroyed: Cell::new(false),
        updatable: true,
    });
    assert!(registry.apply_theme(&*configless));
    assert_eq!(configless.updates.get(), 1);
}

#[test]
fn register_ignores_duplicates_and_destroyed_charts() {
    let registry = ThemeRegistry::new(Rc::new(StaticStyles::new()));
    let chart = CountingChart::new(ring_config());
    let instance = as_instance(&chart);

    assert!(registry.register(&instance));
    assert!(!registry.register(&instance));
    assert_eq!(registry.len(), 1);
    assert!(registry.contains(&instance));

    let dead = CountingChart::new(ring_config());
    dead.destroy();
    assert!(!registry.register(&as_instance(&dead)));
    assert_eq!(registry.len(), 1);

    assert!(registry.unregister(&instance));
    assert!(!registry.unregister(&instance));
    assert!(registry.is_empty());
}

#[test]
fn registry_does_not_keep_charts_alive() {
    let registry = ThemeRegistry::new(Rc::new(StaticStyles::new()));
    let chart = CountingChart::new(ring_config());
    registry.register(&as_instance(&chart));
    assert_eq!(Rc::strong_count(&chart), 1);

    drop(chart);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.apply_all_themes(), 0);
    assert!(registry.is_empty());
}

#[test]
fn apply_all_themes_visits_each_live_chart_once() {
    let registry = ThemeRegistry::new(Rc::new(StaticStyles::new()));
    let charts: Vec<Rc<CountingChart>> = (0..3).map(|_| CountingChart::new(ring_config())).collect();
    for chart in &charts {
        registry.register(&as_instance(chart));
    }
    charts[1].destroy();

    assert_eq!(registry.apply_all_themes(), 2);
    assert_eq!(charts[0].updates.get(), 1);
    assert_eq!(charts[1].updates.get(), 0);
    assert_eq!(charts[2].updates.get(), 1);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.prune(), 0);
}

/// Chart whose update registers a new chart mid-pass.
struct ReentrantChart {
    registry: Rc<ThemeRegistry>,
    spawned: RefCell<Vec<Rc<CountingChart>>>,
}

impl ChartInstance for ReentrantChart {
    fn config(&self) -> Option<SharedConfig> {
        None
    }

    fn update(&self) {
        let chart = CountingChart::new(ring_config());
        self.registry.register(&as_instance(&chart));
        self.spawned.borrow_mut().push(chart);
    }

    fn destroy(&self) {}
}

#[test]
fn charts_registered_during_a_pass_wait_for_the_next_one() {
    let registry = Rc::new(ThemeRegistry::new(Rc::new(StaticStyles::new())));
    let chart = Rc::new(ReentrantChart {
        registry: Rc::clone(&registry),
        spawned: RefCell::new(Vec::new()),
    });
    registry.register(&(Rc::clone(&chart) as Rc<dyn ChartInstance>));

    assert_eq!(registry.apply_all_themes(), 1);
    assert_eq!(registry.len(), 2);
    assert_eq!(chart.spawned.borrow()[0].updates.get(), 0);
}

#[test]
fn themed_mini_chart_repaints_with_theme_borders() {
    let styles = Rc::new(StaticStyles::new().with_var("--chartBorder", "#202020"));
    let registry = ThemeRegistry::new(styles.clone());
    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0));
    let chart: Rc<dyn ChartInstance> = Rc::new(MiniChart::with_styles(
        canvas.target(),
        ring_config().into_shared(),
        styles,
    ));
    assert!(canvas.last_frame().expect("frame").wedges[0].stroke.is_none());

    registry.register(&chart);
    assert_eq!(registry.apply_all_themes(), 1);

    let frame = canvas.last_frame().expect("frame");
    let stroke = frame.wedges[0].stroke.as_ref().expect("stroke");
    assert_eq!(stroke.paint, Paint::css("#202020"));
    assert_eq!(canvas.stats().renders, 2);

    chart.destroy();
    assert!(!chart.is_live());
    assert_eq!(registry.apply_all_themes(), 0);
    assert_eq!(canvas.stats().renders, 2);
}

#[test]
fn installed_registry_is_reachable_per_thread() {
    assert!(ThemeRegistry::current().is_none());
    let installed = ThemeRegistry::new(Rc::new(StaticStyles::new())).install();
    let current = ThemeRegistry::current().expect("installed");
    assert!(Rc::ptr_eq(&installed, &current));

    let removed = ThemeRegistry::uninstall().expect("removed");
    assert!(Rc::ptr_eq(&installed, &removed));
    assert!(ThemeRegistry::current().is_none());
}
