#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

use leptos_router::NavigateOptions;

use crate::util::observable::{Observable, Subscription};

/// Something that can be asked to change the current location.
///
/// Requests are fire-and-forget: the caller observes the effect, if any,
/// through [`LocationState`].
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Shared view of the current location path.
///
/// The router owns the real location; the app mirrors it here so
/// framework-independent models can subscribe to changes.
#[derive(Clone, Debug)]
pub struct LocationState {
    path: Observable<String>,
}

impl Default for LocationState {
    fn default() -> Self {
        Self::new("/")
    }
}

impl LocationState {
    pub fn new(initial: impl Into<String>) -> Self {
        Self { path: Observable::new(initial.into()) }
    }

    #[must_use]
    pub fn path(&self) -> String {
        self.path.get()
    }

    /// Record a new location. Returns `false` when the path did not change.
    pub fn set_path(&self, path: impl Into<String>) -> bool {
        self.path.set(path.into())
    }

    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.path.subscribe(move |p: &String| handler(p))
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.path.subscriber_count()
    }
}

/// In-memory navigation: the request updates the location directly.
impl Navigator for LocationState {
    fn navigate(&self, url: &str) {
        self.set_path(path_of(url));
    }
}

/// Strip query string and fragment from a URL or path.
#[must_use]
pub fn path_of(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Adapts the Leptos router's `use_navigate` handle.
#[derive(Clone)]
pub struct RouterNavigator<F> {
    navigate: F,
}

impl<F> RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    pub fn new(navigate: F) -> Self {
        Self { navigate }
    }
}

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    fn navigate(&self, path: &str) {
        (self.navigate)(path, NavigateOptions::default());
    }
}
