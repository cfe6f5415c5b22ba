use approx::assert_relative_eq;
use minichart::api::{
    ChartConfig, MiniChart, NO_DATA_LABEL, PLACEHOLDER_LABEL, PaintOutcome, SeriesConfig,
    StaticStyles,
};
use minichart::core::{CutoutSpec, LogicalSize, PixelSize};
use minichart::render::{
    CanvasHandle, ChartTarget, DrawingContext, Paint, RecordingCanvas, ResizeObservable,
};
use minichart::{ChartError, ChartResult};
use std::cell::RefCell;
use std::rc::Rc;

fn pie(values: &[f64]) -> ChartConfig {
    ChartConfig::pie().with_series(SeriesConfig::new(values.to_vec()))
}

type MeasureHook = Rc<RefCell<Option<Box<dyn FnOnce()>>>>;

/// Canvas whose next layout measurement runs a host callback, the way a
/// toolkit can re-enter a chart while it is painting.
#[derive(Clone)]
struct ReentrantCanvas {
    inner: RecordingCanvas,
    on_measure: MeasureHook,
}

impl ReentrantCanvas {
    fn new(size: LogicalSize) -> Self {
        Self {
            inner: RecordingCanvas::new(size),
            on_measure: Rc::default(),
        }
    }

    fn destroy_on_next_measure(&self, chart: &Rc<MiniChart>) {
        let chart = Rc::downgrade(chart);
        *self.on_measure.borrow_mut() = Some(Box::new(move || {
            if let Some(chart) = chart.upgrade() {
                chart.destroy();
                assert!(chart.is_destroyed());
            }
        }));
    }
}

impl CanvasHandle for ReentrantCanvas {
    fn client_size(&self) -> LogicalSize {
        let hook = self.on_measure.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }
        self.inner.client_size()
    }

    fn buffer_size(&self) -> PixelSize {
        self.inner.buffer_size()
    }

    fn set_buffer_size(&self, size: PixelSize) -> ChartResult<()> {
        self.inner.set_buffer_size(size)
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.inner.device_pixel_ratio()
    }

    fn context_2d(&self) -> Option<Box<dyn DrawingContext>> {
        self.inner.context_2d()
    }

    fn container(&self) -> Option<Rc<dyn ResizeObservable>> {
        self.inner.container()
    }
}

#[test]
fn pie_of_thirty_and_seventy_draws_two_fallback_colored_wedges() {
    let canvas = RecordingCanvas::new(LogicalSize::new(400.0, 200.0));
    let chart = MiniChart::new(canvas.target(), pie(&[30.0, 70.0]).into_shared());

    assert_eq!(
        chart.try_update().expect("update"),
        PaintOutcome::Slices { count: 2 }
    );
    let frame = canvas.last_frame().expect("frame");
    assert_eq!(frame.wedges.len(), 2);
    assert!(frame.cutout.is_none());
    assert!(frame.texts.is_empty());

    let first = &frame.wedges[0];
    let second = &frame.wedges[1];
    assert_relative_eq!(first.center_x, 200.0);
    assert_relative_eq!(first.center_y, 100.0);
    assert_relative_eq!(first.radius, 84.0, epsilon = 1e-9);
    assert_relative_eq!(
        (first.end_angle - first.start_angle).to_degrees(),
        108.0,
        epsilon = 1e-9
    );
    assert_relative_eq!(second.start_angle, first.end_angle);
    assert_relative_eq!(
        (second.end_angle - first.start_angle).to_degrees(),
        360.0,
        epsilon = 1e-9
    );
    assert_eq!(first.fill.hue(), Some(0.0));
    assert_eq!(second.fill.hue(), Some(180.0));
}

#[test]
fn all_zero_values_render_the_no_data_label() {
    let canvas = RecordingCanvas::new(LogicalSize::new(320.0, 160.0));
    let chart = MiniChart::new(canvas.target(), pie(&[0.0, 0.0, 0.0]).into_shared());

    assert_eq!(chart.try_update().expect("update"), PaintOutcome::NoData);
    let frame = canvas.last_frame().expect("frame");
    assert!(frame.wedges.is_empty());
    assert_eq!(frame.texts.len(), 1);
    let label = &frame.texts[0];
    assert_eq!(label.text, NO_DATA_LABEL);
    assert_relative_eq!(label.x, 160.0);
    assert_relative_eq!(label.y, 80.0);
    assert_relative_eq!(label.font_size_px, 13.0);
    assert_eq!(label.paint, Paint::css("#9aa4b2"));
}

#[test]
fn muted_label_color_comes_from_the_host_styles() {
    let canvas = RecordingCanvas::new(LogicalSize::new(320.0, 160.0));
    let styles = Rc::new(StaticStyles::new().with_var("--muted2", " #778899 "));
    let _chart = MiniChart::with_styles(
        canvas.target(),
        ChartConfig::pie().into_shared(),
        styles,
    );

    let frame = canvas.last_frame().expect("frame");
    assert_eq!(frame.texts[0].paint, Paint::css("#778899"));
}

#[test]
fn unsupported_kinds_render_a_placeholder() {
    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0));
    let config =
        ChartConfig::from_json_str(r#"{"type":"bar","data":{"datasets":[{"data":[1,2]}]}}"#)
            .expect("config");
    let chart = MiniChart::new(canvas.target(), config.into_shared());

    assert_eq!(chart.try_update().expect("update"), PaintOutcome::Placeholder);
    let frame = canvas.last_frame().expect("frame");
    assert!(frame.wedges.is_empty());
    assert_eq!(frame.texts[0].text, PLACEHOLDER_LABEL);
}

#[test]
fn ring_erases_its_cutout_once_after_all_wedges() {
    let canvas = RecordingCanvas::new(LogicalSize::new(200.0, 200.0));
    let config = ChartConfig::ring()
        .with_series(SeriesConfig::new(vec![1.0, 2.0, 3.0]))
        .with_cutout(CutoutSpec::Text("60%".to_owned()));
    let _chart = MiniChart::new(canvas.target(), config.into_shared());

    let frame = canvas.last_frame().expect("frame");
    assert_eq!(frame.wedges.len(), 3);
    let cutout = frame.cutout.expect("cutout");
    assert_relative_eq!(cutout.radius, 84.0 * 0.6, epsilon = 1e-9);
    assert_relative_eq!(cutout.center_x, 100.0);
}

#[test]
fn pie_ignores_a_configured_cutout() {
    let canvas = RecordingCanvas::new(LogicalSize::new(200.0, 200.0));
    let config = pie(&[1.0, 1.0]).with_cutout(CutoutSpec::Number(0.5));
    let _chart = MiniChart::new(canvas.target(), config.into_shared());

    assert!(canvas.last_frame().expect("frame").cutout.is_none());
}

#[test]
fn ring_with_zero_cutout_draws_a_full_pie() {
    let canvas = RecordingCanvas::new(LogicalSize::new(200.0, 200.0));
    let config = ChartConfig::ring()
        .with_series(SeriesConfig::new(vec![1.0, 1.0]))
        .with_cutout(CutoutSpec::Number(5.0));
    let _chart = MiniChart::new(canvas.target(), config.into_shared());

    assert!(canvas.last_frame().expect("frame").cutout.is_none());
}

#[test]
fn zero_values_leave_no_wedge_but_keep_color_positions() {
    let canvas = RecordingCanvas::new(LogicalSize::new(200.0, 200.0));
    let config = ChartConfig::pie().with_series(
        SeriesConfig::new(vec![1.0, 0.0, 1.0]).with_colors(["#111111", "#222222", " "]),
    );
    let _chart = MiniChart::new(canvas.target(), config.into_shared());

    let frame = canvas.last_frame().expect("frame");
    assert_eq!(frame.wedges.len(), 2);
    assert_eq!(frame.wedges[0].fill, Paint::css("#111111"));
    // Blank color at index 2 falls back to hue 2 * 360 / 3.
    assert_eq!(frame.wedges[1].fill.hue(), Some(240.0));
}

#[test]
fn configured_border_strokes_every_wedge() {
    let canvas = RecordingCanvas::new(LogicalSize::new(200.0, 200.0));
    let config = ChartConfig::pie()
        .with_series(SeriesConfig::new(vec![2.0, 3.0]).with_border(2.0, "#000000"));
    let _chart = MiniChart::new(canvas.target(), config.into_shared());

    let frame = canvas.last_frame().expect("frame");
    assert!(frame.wedges.iter().all(|wedge| {
        wedge
            .stroke
            .as_ref()
            .is_some_and(|stroke| stroke.width == 2.0 && stroke.paint == Paint::css("#000000"))
    }));
}

#[test]
fn update_is_a_full_repaint_from_current_config() {
    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0));
    let config = pie(&[1.0, 1.0]).into_shared();
    let chart = MiniChart::new(canvas.target(), Rc::clone(&config));
    let first = canvas.last_frame().expect("first frame");

    chart.update();
    assert_eq!(canvas.last_frame().expect("second frame"), first);

    config.borrow_mut().series[0].values = vec![1.0, 1.0, 1.0, 1.0];
    chart.update();
    assert_eq!(canvas.stats().last_wedge_count, 4);
    assert_eq!(canvas.stats().renders, 3);
}

#[test]
fn repeated_paints_at_the_same_size_do_not_reallocate() {
    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0));
    let chart = MiniChart::new(canvas.target(), pie(&[1.0]).into_shared());
    chart.update();
    chart.update();
    assert_eq!(canvas.stats().buffer_allocations, 0);

    canvas.set_device_pixel_ratio(Some(2.0));
    chart.update();
    chart.update();
    assert_eq!(canvas.stats().buffer_allocations, 1);
}

#[test]
fn physical_buffer_follows_the_device_pixel_ratio() {
    let canvas =
        RecordingCanvas::new(LogicalSize::new(250.0, 120.0)).with_device_pixel_ratio(2.0);
    let _chart = MiniChart::new(canvas.target(), pie(&[1.0]).into_shared());

    assert_eq!(canvas.buffer_size(), PixelSize::new(500, 240));
    let frame = canvas.last_frame().expect("frame");
    assert_relative_eq!(frame.pixel_ratio, 2.0);
    assert_relative_eq!(frame.viewport.width, 250.0);
}

#[test]
fn sub_unity_pixel_ratio_is_raised_to_one() {
    let canvas =
        RecordingCanvas::new(LogicalSize::new(300.0, 150.0)).with_device_pixel_ratio(0.5);
    let _chart = MiniChart::new(canvas.target(), pie(&[1.0]).into_shared());

    assert_relative_eq!(canvas.last_frame().expect("frame").pixel_ratio, 1.0);
    assert_eq!(canvas.stats().buffer_allocations, 0);
}

#[test]
fn hidden_container_paints_at_fallback_size() {
    let canvas = RecordingCanvas::new(LogicalSize::new(0.0, 0.0));
    let _chart = MiniChart::new(canvas.target(), pie(&[1.0]).into_shared());

    let frame = canvas.last_frame().expect("frame");
    assert_eq!(frame.viewport, LogicalSize::new(300.0, 150.0));
    assert_relative_eq!(frame.wedges[0].radius, 63.0, epsilon = 1e-9);
}

#[test]
fn container_resize_triggers_a_repaint() {
    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0));
    let chart = MiniChart::new(canvas.target(), pie(&[1.0, 2.0]).into_shared());
    assert!(chart.observes_resize());

    assert_eq!(canvas.set_client_size(LogicalSize::new(600.0, 400.0)), 1);
    assert_eq!(canvas.stats().renders, 2);
    assert_eq!(
        canvas.last_frame().expect("frame").viewport,
        LogicalSize::new(600.0, 400.0)
    );
}

#[test]
fn non_responsive_charts_ignore_resizes() {
    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0));
    let config = pie(&[1.0]).with_responsive(false);
    let chart = MiniChart::new(canvas.target(), config.into_shared());

    assert!(!chart.observes_resize());
    assert_eq!(canvas.hub().listener_count(), 0);
    assert_eq!(canvas.set_client_size(LogicalSize::new(500.0, 500.0)), 0);
    assert_eq!(canvas.stats().renders, 1);
}

#[test]
fn rejected_resize_observation_still_paints_once() {
    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0)).with_rejecting_container();
    let chart = MiniChart::new(canvas.target(), pie(&[1.0]).into_shared());

    assert!(!chart.observes_resize());
    assert_eq!(canvas.stats().renders, 1);
}

#[test]
fn detached_surface_paints_without_observing() {
    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0)).without_container();
    let chart = MiniChart::new(canvas.target(), pie(&[1.0]).into_shared());

    assert!(!chart.observes_resize());
    assert_eq!(canvas.stats().renders, 1);
}

#[test]
fn unresolvable_targets_produce_inert_charts() {
    assert!(matches!(
        ChartTarget::Detached.try_resolve(),
        Err(ChartError::UnresolvableSurface)
    ));
    let detached = MiniChart::new(ChartTarget::Detached, pie(&[1.0]).into_shared());
    assert!(detached.is_inert());
    assert_eq!(detached.try_update().expect("update"), PaintOutcome::Inert);
    detached.destroy();
    detached.destroy();

    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0)).without_context();
    let no_context = MiniChart::new(canvas.target(), pie(&[1.0]).into_shared());
    assert!(no_context.is_inert());
    assert_eq!(canvas.stats().renders, 0);
    assert_eq!(canvas.hub().listener_count(), 0);
}

#[test]
fn context_targets_resolve_their_owning_canvas() {
    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0));
    let chart = MiniChart::new(canvas.context_target(), pie(&[1.0, 1.0]).into_shared());

    assert!(!chart.is_inert());
    assert!(chart.observes_resize());
    assert_eq!(canvas.stats().last_wedge_count, 2);
}

#[test]
fn destroy_unsubscribes_clears_and_is_idempotent() {
    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0));
    let chart = MiniChart::new(canvas.target(), pie(&[1.0]).into_shared());
    assert_eq!(canvas.hub().listener_count(), 1);

    chart.destroy();
    assert!(chart.is_destroyed());
    assert_eq!(canvas.hub().listener_count(), 0);
    assert_eq!(canvas.stats().clears, 1);
    assert_eq!(canvas.last_clear(), Some(LogicalSize::new(300.0, 150.0)));

    chart.destroy();
    assert_eq!(canvas.stats().clears, 1);

    canvas.set_client_size(LogicalSize::new(100.0, 100.0));
    assert_eq!(chart.try_update().expect("update"), PaintOutcome::Inert);
    assert_eq!(canvas.stats().renders, 1);
}

#[test]
fn destroy_during_a_paint_completes_once_the_paint_returns() {
    let canvas = ReentrantCanvas::new(LogicalSize::new(300.0, 150.0));
    let chart = Rc::new(MiniChart::new(
        ChartTarget::canvas(canvas.clone()),
        pie(&[1.0]).into_shared(),
    ));
    assert_eq!(canvas.inner.hub().listener_count(), 1);

    canvas.destroy_on_next_measure(&chart);
    assert_eq!(
        chart.try_update().expect("update"),
        PaintOutcome::Slices { count: 1 }
    );

    assert!(chart.is_destroyed());
    assert!(!chart.observes_resize());
    assert_eq!(canvas.inner.hub().listener_count(), 0);
    assert_eq!(canvas.inner.stats().clears, 1);
    assert_eq!(chart.try_update().expect("update"), PaintOutcome::Inert);
}

#[test]
fn destroy_from_a_resize_repaint_disconnects_the_listener() {
    let canvas = ReentrantCanvas::new(LogicalSize::new(300.0, 150.0));
    let chart = Rc::new(MiniChart::new(
        ChartTarget::canvas(canvas.clone()),
        pie(&[1.0]).into_shared(),
    ));

    canvas.destroy_on_next_measure(&chart);
    assert_eq!(canvas.inner.set_client_size(LogicalSize::new(200.0, 100.0)), 1);

    assert!(chart.is_destroyed());
    assert_eq!(canvas.inner.hub().listener_count(), 0);
    assert_eq!(canvas.inner.stats().renders, 2);
    assert_eq!(canvas.inner.set_client_size(LogicalSize::new(100.0, 100.0)), 0);
    assert_eq!(canvas.inner.stats().renders, 2);
}

#[test]
fn destroy_swallows_clear_failures() {
    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0));
    let chart = MiniChart::new(canvas.target(), pie(&[1.0]).into_shared());
    canvas.set_fail_clears(true);

    chart.destroy();
    assert!(chart.is_destroyed());
    assert_eq!(canvas.stats().clears, 0);
}

#[test]
fn dropping_a_chart_releases_its_resize_listener() {
    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0));
    let chart = MiniChart::new(canvas.target(), pie(&[1.0]).into_shared());
    assert_eq!(canvas.hub().listener_count(), 1);

    drop(chart);
    assert_eq!(canvas.hub().listener_count(), 0);
    assert_eq!(canvas.set_client_size(LogicalSize::new(10.0, 10.0)), 0);
}

#[test]
fn paint_while_config_is_borrowed_reports_busy() {
    let canvas = RecordingCanvas::new(LogicalSize::new(300.0, 150.0));
    let config = pie(&[1.0]).into_shared();
    let chart = MiniChart::new(canvas.target(), Rc::clone(&config));

    let _guard = config.borrow_mut();
    assert_eq!(chart.try_update().expect("update"), PaintOutcome::Busy);
    assert_eq!(canvas.stats().renders, 1);
}
