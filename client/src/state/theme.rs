#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use serde::{Deserialize, Serialize};

use crate::util::observable::{Observable, Subscription};

/// Class token on the theme marker that selects the dark theme.
pub const DARK_TOKEN: &str = "dark";

/// Color theme of the application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Derive the theme from a class attribute value.
    ///
    /// Dark iff the whitespace-separated token set contains `dark`; anything
    /// else, including an empty attribute, is light.
    #[must_use]
    pub fn from_class_list(classes: &str) -> Self {
        if classes.split_ascii_whitespace().any(|t| t == DARK_TOKEN) { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Application-wide theme, provided as context at the app root.
///
/// Components read the current theme and subscribe to changes here instead
/// of watching the document for class mutations.
#[derive(Clone, Debug, Default)]
pub struct ThemeState {
    theme: Observable<Theme>,
}

impl ThemeState {
    #[must_use]
    pub fn new(initial: Theme) -> Self {
        Self { theme: Observable::new(initial) }
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        self.theme.get()
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.current().is_dark()
    }

    /// Change the theme. Returns `false` when it was already `theme`.
    pub fn set(&self, theme: Theme) -> bool {
        self.theme.set(theme)
    }

    /// Flip between light and dark, returning the new theme.
    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(Theme) + Send + Sync + 'static,
    {
        self.theme.subscribe(move |t: &Theme| handler(*t))
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.theme.subscriber_count()
    }
}
