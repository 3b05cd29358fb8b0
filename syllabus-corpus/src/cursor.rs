//! Parse-time hierarchy context, threaded through the scan by value.

/// Title and URL of one hierarchy level. Both empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
    pub title: String,
    pub url: String,
}

impl Anchor {
    fn new(title: &str, url: Option<String>) -> Self {
        Self {
            title: title.to_string(),
            url: url.unwrap_or_default(),
        }
    }
}

/// The course, step and module most recently seen above the current line.
///
/// A step owns its modules: entering a step clears the module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyCursor {
    pub course: Anchor,
    pub step: Anchor,
    pub module: Anchor,
}

impl HierarchyCursor {
    pub fn enter_course(self, title: &str, url: Option<String>) -> Self {
        Self {
            course: Anchor::new(title, url),
            ..self
        }
    }

    pub fn enter_step(self, title: &str, url: Option<String>) -> Self {
        Self {
            step: Anchor::new(title, url),
            module: Anchor::default(),
            ..self
        }
    }

    pub fn enter_module(self, title: &str, url: Option<String>) -> Self {
        Self {
            module: Anchor::new(title, url),
            ..self
        }
    }
}
