use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use minichart::api::{ChartConfig, ChartInstance, ChartRuntime, SeriesConfig, StaticStyles};
use minichart::core::CutoutSpec;
use minichart::platform_gtk::GtkChartArea;
use minichart::theme::ThemeRegistry;

fn main() {
    let _ = minichart::telemetry::init_tracing_with_filter("minichart=debug");
    let app = gtk::Application::builder()
        .application_id("rs.minichart.demos.gtk_theme_dashboard")
        .build();
    app.connect_activate(build_ui);
    app.run();
}

fn build_ui(app: &gtk::Application) {
    let styles = Rc::new(StaticStyles::new().with_theme_id("dark"));
    let registry = ThemeRegistry::new(styles.clone()).install();
    let runtime = ChartRuntime::select(None, styles.clone());

    let row = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    let mut areas = Vec::new();
    for (index, config) in sample_configs().into_iter().enumerate() {
        let area = match GtkChartArea::new(320, 220) {
            Ok(area) => area,
            Err(err) => {
                eprintln!("failed to create chart area {index}: {err}");
                return;
            }
        };
        let chart: Rc<dyn ChartInstance> = runtime.construct(area.target(), config.into_shared());
        registry.register(&chart);
        row.append(area.widget());
        areas.push((area, chart));
    }
    registry.apply_all_themes();

    let toggle = gtk::ToggleButton::with_label("Light theme");
    toggle.connect_toggled({
        let areas = areas.clone();
        move |button| {
            styles.set_theme_id(if button.is_active() { "light" } else { "dark" });
            styles.set_var("--text", if button.is_active() { "#1b2333" } else { "#f0f4ff" });
            if let Some(registry) = ThemeRegistry::current() {
                registry.apply_all_themes();
            }
            for (area, _) in &areas {
                area.queue_draw();
            }
        }
    });

    let column = gtk::Box::new(gtk::Orientation::Vertical, 8);
    column.append(&toggle);
    column.append(&row);

    let window = gtk::ApplicationWindow::builder()
        .application(app)
        .title("minichart theme dashboard")
        .child(&column)
        .build();
    window.connect_close_request(move |_| {
        for (_, chart) in &areas {
            chart.destroy();
        }
        gtk::glib::Propagation::Proceed
    });
    window.present();
}

fn sample_configs() -> Vec<ChartConfig> {
    vec![
        ChartConfig::pie()
            .with_labels(["Open", "Closed"])
            .with_series(SeriesConfig::new(vec![30.0, 70.0])),
        ChartConfig::ring()
            .with_labels(["Disk", "Memory", "CPU", "Network"])
            .with_series(
                SeriesConfig::new(vec![12.0, 30.0, 18.0, 40.0])
                    .with_colors(["#5b8def", "#f2a03d", "", "#53c27b"]),
            )
            .with_cutout(CutoutSpec::Text("60%".to_owned())),
        ChartConfig::ring().with_series(SeriesConfig::new(vec![0.0, 0.0, 0.0])),
    ]
}
