//! Vertical navigation panel with chat, profile and settings icons.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::location::{LocationState, RouterNavigator};
use crate::state::panel::{IconSlot, PanelModel, PanelView};
use crate::state::theme::ThemeState;

/// Navigation panel.
///
/// Mounts a `PanelModel` against the shared `LocationState` and `ThemeState`
/// contexts. The model is owned by this component's reactive owner, so both
/// subscriptions are released when the panel unmounts.
#[component]
pub fn NavPanel() -> impl IntoView {
    let location = expect_context::<LocationState>();
    let theme = expect_context::<ThemeState>();

    let panel = RwSignal::new(PanelView::default());
    let model = PanelModel::mount(&location, &theme, RouterNavigator::new(use_navigate()), move |next| {
        // The signal may already be disposed while the owner tears down.
        if panel.try_set(next).is_some() {
            #[cfg(feature = "hydrate")]
            log::debug!("nav panel update after dispose ignored");
        }
    });
    panel.set(model.view());
    let model = StoredValue::new_local(model);

    #[cfg(feature = "hydrate")]
    on_cleanup(|| log::debug!("nav panel unmounted"));

    let src = move |slot: IconSlot| panel.get().icon(slot).src();

    let on_chat = move |_| {
        #[cfg(feature = "hydrate")]
        log::debug!("nav panel: chat requested");
        model.with_value(|m| m.on_chat_icon_click());
    };
    let on_settings = move |_| {
        #[cfg(feature = "hydrate")]
        log::debug!("nav panel: settings requested");
        model.with_value(|m| m.on_settings_icon_click());
    };

    view! {
        <nav class="panel" class:panel--dark=move || panel.get().theme.is_dark()>
            <img class="panel__icon" src=move || src(IconSlot::Chat) alt=IconSlot::Chat.alt() on:click=on_chat/>
            <img class="panel__icon" src=move || src(IconSlot::Profile) alt=IconSlot::Profile.alt()/>
            <img
                class="panel__icon"
                src=move || src(IconSlot::Settings)
                alt=IconSlot::Settings.alt()
                on:click=on_settings
            />
        </nav>
    }
}
