//! Light/dark theme switch.

use leptos::prelude::*;

use crate::state::theme::ThemeState;

/// Button that flips the application theme.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme = expect_context::<ThemeState>();

    let dark = RwSignal::new(theme.is_dark());
    let subscription = theme.subscribe(move |t| {
        dark.try_set(t.is_dark());
    });
    // Owned by this component; dropped with it.
    let _subscription = StoredValue::new_local(subscription);

    let on_click = move |_| {
        theme.toggle();
    };

    view! {
        <button class="theme-toggle" class:theme-toggle--dark=move || dark.get() on:click=on_click>
            {move || if dark.get() { "Dark" } else { "Light" }}
        </button>
    }
}
