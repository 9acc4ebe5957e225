//! Navigation panel state.
//!
//! DESIGN
//! ======
//! The panel shows three icons: chat, profile, settings. Which variant each
//! icon renders is a pure function of two inputs the panel does not own:
//!
//! - the current location, which decides the active tab
//! - the application theme, which decides the inactive icon variants
//!
//! `PanelModel` is the mounted instance. It subscribes to both inputs,
//! recomputes the affected field from scratch on every notification, and
//! releases both subscriptions when unmounted or dropped.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::state::location::{LocationState, Navigator};
use crate::state::route::{CHATS_PATH, SETTINGS_PATH};
use crate::state::theme::{Theme, ThemeState};
use crate::util::observable::Subscription;

/// Which navigation icon renders in its active variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActiveTab {
    #[default]
    None,
    Chat,
    Settings,
}

impl ActiveTab {
    /// Exact match on the path; every other location has no active tab.
    #[must_use]
    pub fn from_location(path: &str) -> Self {
        match path {
            CHATS_PATH => Self::Chat,
            SETTINGS_PATH => Self::Settings,
            _ => Self::None,
        }
    }
}

/// Icon positions in the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconSlot {
    Chat,
    Profile,
    Settings,
}

impl IconSlot {
    /// Render order, top to bottom.
    pub const ORDER: [IconSlot; 3] = [IconSlot::Chat, IconSlot::Profile, IconSlot::Settings];

    #[must_use]
    pub fn alt(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Profile => "profile",
            Self::Settings => "settings",
        }
    }
}

/// Concrete icon asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    OnChat,
    OnSettings,
    DarkOffChat,
    DarkOffSettings,
    DarkProfile,
    LightOffChat,
    LightOffSettings,
    LightProfile,
}

impl Icon {
    /// URL the asset is served from.
    #[must_use]
    pub fn src(self) -> &'static str {
        match self {
            Self::OnChat => "/assets/on/chat.svg",
            Self::OnSettings => "/assets/on/settings.svg",
            Self::DarkOffChat => "/assets/dark/chat.svg",
            Self::DarkOffSettings => "/assets/dark/settings.svg",
            Self::DarkProfile => "/assets/dark/profile.svg",
            Self::LightOffChat => "/assets/light/chat.svg",
            Self::LightOffSettings => "/assets/light/settings.svg",
            Self::LightProfile => "/assets/light/profile.svg",
        }
    }
}

/// Derived panel state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelView {
    pub active_tab: ActiveTab,
    pub theme: Theme,
}

impl PanelView {
    #[must_use]
    pub fn derive(path: &str, theme: Theme) -> Self {
        Self { active_tab: ActiveTab::from_location(path), theme }
    }

    /// Icon to render in `slot`: the active variant when the slot's tab is
    /// active, otherwise the inactive variant for the current theme.
    #[must_use]
    pub fn icon(self, slot: IconSlot) -> Icon {
        let dark = self.theme.is_dark();
        match slot {
            IconSlot::Chat if self.active_tab == ActiveTab::Chat => Icon::OnChat,
            IconSlot::Chat if dark => Icon::DarkOffChat,
            IconSlot::Chat => Icon::LightOffChat,
            IconSlot::Settings if self.active_tab == ActiveTab::Settings => Icon::OnSettings,
            IconSlot::Settings if dark => Icon::DarkOffSettings,
            IconSlot::Settings => Icon::LightOffSettings,
            IconSlot::Profile if dark => Icon::DarkProfile,
            IconSlot::Profile => Icon::LightProfile,
        }
    }
}

/// A mounted navigation panel.
pub struct PanelModel<N> {
    navigator: N,
    view: Arc<Mutex<PanelView>>,
    location_sub: Option<Subscription>,
    theme_sub: Option<Subscription>,
}

impl<N: Navigator> PanelModel<N> {
    /// Mount against the shared location and theme.
    ///
    /// `on_change` runs after every recomputation caused by a notification;
    /// it is not called for the initial derivation (read [`Self::view`]).
    pub fn mount<F>(location: &LocationState, theme: &ThemeState, navigator: N, on_change: F) -> Self
    where
        F: Fn(PanelView) + Send + Sync + 'static,
    {
        let view = Arc::new(Mutex::new(PanelView::default()));
        let on_change = Arc::new(on_change);

        let location_sub = {
            let view = Arc::clone(&view);
            let on_change = Arc::clone(&on_change);
            location.subscribe(move |path| {
                let next = {
                    let mut v = view.lock().unwrap_or_else(PoisonError::into_inner);
                    v.active_tab = ActiveTab::from_location(path);
                    *v
                };
                on_change(next);
            })
        };

        let theme_sub = {
            let view = Arc::clone(&view);
            theme.subscribe(move |t| {
                let next = {
                    let mut v = view.lock().unwrap_or_else(PoisonError::into_inner);
                    v.theme = t;
                    *v
                };
                on_change(next);
            })
        };

        // Subscribed first so a change racing the mount is not lost.
        *view.lock().unwrap_or_else(PoisonError::into_inner) = PanelView::derive(&location.path(), theme.current());

        Self { navigator, view, location_sub: Some(location_sub), theme_sub: Some(theme_sub) }
    }

    #[must_use]
    pub fn view(&self) -> PanelView {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Request navigation to the chats section.
    pub fn on_chat_icon_click(&self) {
        self.navigator.navigate(CHATS_PATH);
    }

    /// Request navigation to the settings section.
    pub fn on_settings_icon_click(&self) {
        self.navigator.navigate(SETTINGS_PATH);
    }
}

impl<N> PanelModel<N> {
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.location_sub.is_some() || self.theme_sub.is_some()
    }

    /// Release both subscriptions. Idempotent.
    pub fn unmount(&mut self) {
        drop(self.location_sub.take());
        drop(self.theme_sub.take());
    }
}

impl<N> Drop for PanelModel<N> {
    fn drop(&mut self) {
        self.unmount();
    }
}
