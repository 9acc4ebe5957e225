//! Browser side of the theme marker.
//!
//! The document theme marker is the `dark` class on `<body>`: present for the
//! dark theme, absent for light. The preference is also persisted to
//! `localStorage` so a reload keeps it. Requires a browser environment.
//!
//! TRADE-OFFS
//! ==========
//! Marker writes and persistence are best-effort browser-only behavior; SSR
//! paths no-op so server rendering stays deterministic (always light).

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use crate::state::theme::Theme;
#[cfg(feature = "hydrate")]
use crate::state::theme::DARK_TOKEN;

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "michat_theme";

/// Read the initial theme.
///
/// Order: the `<body>` class marker if it already says dark, then the stored
/// preference, then the system `prefers-color-scheme`. Light otherwise.
pub fn read_preference() -> Theme {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return Theme::Light;
        };

        if let Some(body) = window.document().and_then(|d| d.body()) {
            if Theme::from_class_list(&body.class_name()).is_dark() {
                return Theme::Dark;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(val)) = storage.get_item(STORAGE_KEY) {
                if let Ok(theme) = serde_json::from_str::<Theme>(&val) {
                    return theme;
                }
            }
        }

        let prefers_dark = matches!(
            window.match_media("(prefers-color-scheme: dark)"),
            Ok(Some(mq)) if mq.matches()
        );
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Theme::Light
    }
}

/// Write the marker: add or remove the `dark` class on `<body>`.
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn apply(theme: Theme) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
            let class_list = body.class_list();
            let result = if theme.is_dark() { class_list.add_1(DARK_TOKEN) } else { class_list.remove_1(DARK_TOKEN) };
            if result.is_err() {
                log::warn!("failed to update theme marker");
            }
        }
    }
}

/// Persist the preference to `localStorage`.
#[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
pub fn persist(theme: Theme) {
    #[cfg(feature = "hydrate")]
    {
        let Ok(value) = serde_json::to_string(&theme) else {
            return;
        };
        if let Some(Ok(Some(storage))) = web_sys::window().map(|w| w.local_storage()) {
            if storage.set_item(STORAGE_KEY, &value).is_err() {
                log::warn!("failed to persist theme preference");
            }
        }
    }
}
