use std::cell::RefCell;

use indexmap::IndexMap;

/// Style variable holding the muted label color.
pub const MUTED_LABEL_VAR: &str = "--muted2";
/// Muted label color used when the host does not define [`MUTED_LABEL_VAR`].
pub const MUTED_LABEL_FALLBACK: &str = "#9aa4b2";

/// Host styling system: named variable lookup plus the active theme id.
///
/// Returned values are opaque color strings.
pub trait StyleSource {
    fn css_var(&self, name: &str) -> Option<String>;

    fn theme_id(&self) -> Option<String> {
        None
    }
}

/// Looks up `name`, trimming the result; missing or blank values yield
/// `fallback`.
#[must_use]
pub fn css_var_or(source: &dyn StyleSource, name: &str, fallback: &str) -> String {
    source
        .css_var(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}

/// In-memory style table. Hosts mutate it when the theme changes.
#[derive(Debug, Default)]
pub struct StaticStyles {
    theme_id: RefCell<Option<String>>,
    vars: RefCell<IndexMap<String, String>>,
}

impl StaticStyles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_theme_id(self, theme_id: impl Into<String>) -> Self {
        self.set_theme_id(theme_id);
        self
    }

    #[must_use]
    pub fn with_var(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_var(name, value);
        self
    }

    pub fn set_theme_id(&self, theme_id: impl Into<String>) {
        *self.theme_id.borrow_mut() = Some(theme_id.into());
    }

    pub fn set_var(&self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.borrow_mut().insert(name.into(), value.into());
    }

    pub fn remove_var(&self, name: &str) -> Option<String> {
        self.vars.borrow_mut().shift_remove(name)
    }
}

impl StyleSource for StaticStyles {
    fn css_var(&self, name: &str) -> Option<String> {
        self.vars.borrow().get(name).cloned()
    }

    fn theme_id(&self) -> Option<String> {
        self.theme_id.borrow().clone()
    }
}
