use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{CutoutSpec, normalize_cutout};

/// Configuration shared between a chart and the code that feeds it.
///
/// Callers may edit fields between `update()` calls; the next paint reads
/// the current values.
pub type SharedConfig = Rc<RefCell<ChartConfig>>;

/// Chart family requested by the configuration producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartKind {
    /// Pie with a centered cutout (a doughnut).
    Ring,
    Pie,
    /// Any kind the engine does not draw; keeps the requested name.
    Unsupported(String),
}

impl ChartKind {
    /// Parses a kind name, trimmed and case-insensitive.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "doughnut" | "ring" => Self::Ring,
            "pie" => Self::Pie,
            _ => Self::Unsupported(raw.to_owned()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ring => "doughnut",
            Self::Pie => "pie",
            Self::Unsupported(raw) => raw,
        }
    }

    #[must_use]
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::Ring | Self::Pie)
    }
}

/// A style field that remembers who wrote it.
///
/// Theme application fills `Unset` fields and refreshes `Theme` fields, but
/// never replaces an `Explicit` value set by the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Themed<T> {
    #[default]
    Unset,
    Explicit(T),
    Theme(T),
}

impl<T> Themed<T> {
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Unset => None,
            Self::Explicit(value) | Self::Theme(value) => Some(value),
        }
    }

    #[must_use]
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Writes a theme-derived value unless the caller pinned one. Returns
    /// `true` when the field was written.
    pub fn apply_theme(&mut self, value: T) -> bool {
        if self.is_explicit() {
            return false;
        }
        *self = Self::Theme(value);
        true
    }

    pub fn set_explicit(&mut self, value: T) {
        *self = Self::Explicit(value);
    }
}

impl<T> From<Option<T>> for Themed<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unset, Self::Explicit)
    }
}

impl<T: Clone> Themed<T> {
    #[must_use]
    pub fn to_option(&self) -> Option<T> {
        self.value().cloned()
    }
}

/// One dataset. Only the first series of a chart is drawn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesConfig {
    pub label: Option<String>,
    pub values: Vec<f64>,
    /// Slice colors by position; may be shorter than `values`. Blank
    /// entries count as missing.
    pub colors: Vec<String>,
    pub border_width: Themed<f64>,
    pub border_color: Themed<String>,
}

impl SeriesConfig {
    #[must_use]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_border(mut self, width: f64, color: impl Into<String>) -> Self {
        self.border_width.set_explicit(width);
        self.border_color.set_explicit(color.into());
        self
    }

    /// Configured color for slice `index`, if any.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Option<&str> {
        self.colors
            .get(index)
            .map(String::as_str)
            .filter(|color| !color.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipOptions {
    pub background_color: Themed<String>,
    pub title_color: Themed<String>,
    pub body_color: Themed<String>,
    pub border_color: Themed<String>,
    pub border_width: Themed<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TitleOptions {
    pub text: String,
    pub color: Themed<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// When `false` the chart never observes container size changes.
    pub responsive: bool,
    pub cutout: Option<CutoutSpec>,
    /// Default text color.
    pub color: Themed<String>,
    pub tooltip: TooltipOptions,
    pub legend_label_color: Themed<String>,
    pub title: Option<TitleOptions>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            cutout: None,
            color: Themed::Unset,
            tooltip: TooltipOptions::default(),
            legend_label_color: Themed::Unset,
            title: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<SeriesConfig>,
    pub options: ChartOptions,
}

impl ChartConfig {
    #[must_use]
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            labels: Vec::new(),
            series: Vec::new(),
            options: ChartOptions::default(),
        }
    }

    #[must_use]
    pub fn ring() -> Self {
        Self::new(ChartKind::Ring)
    }

    #[must_use]
    pub fn pie() -> Self {
        Self::new(ChartKind::Pie)
    }

    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_series(mut self, series: SeriesConfig) -> Self {
        self.series.push(series);
        self
    }

    #[must_use]
    pub fn with_cutout(mut self, cutout: CutoutSpec) -> Self {
        self.options.cutout = Some(cutout);
        self
    }

    #[must_use]
    pub fn with_responsive(mut self, responsive: bool) -> Self {
        self.options.responsive = responsive;
        self
    }

    #[must_use]
    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        self.options.title = Some(TitleOptions {
            text: text.into(),
            color: Themed::Unset,
        });
        self
    }

    #[must_use]
    pub fn primary_series(&self) -> Option<&SeriesConfig> {
        self.series.first()
    }

    /// Effective cutout ratio; always zero for anything but a ring.
    #[must_use]
    pub fn cutout_ratio(&self) -> f64 {
        match self.kind {
            ChartKind::Ring => normalize_cutout(self.options.cutout.as_ref()),
            ChartKind::Pie | ChartKind::Unsupported(_) => 0.0,
        }
    }

    #[must_use]
    pub fn into_shared(self) -> SharedConfig {
        Rc::new(RefCell::new(self))
    }
}
