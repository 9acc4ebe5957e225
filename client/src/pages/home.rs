//! Home page: navigation panel next to the selected section.

use leptos::prelude::*;

use crate::components::nav_panel::NavPanel;
use crate::components::theme_toggle::ThemeToggle;
use crate::state::route::HomeSection;

#[component]
pub fn HomePage(section: HomeSection) -> impl IntoView {
    let body = match section {
        HomeSection::Chats => view! {
            <section class="home-page__section">
                <h2>"Chats"</h2>
                <p class="home-page__empty">"No conversations yet."</p>
            </section>
        }
        .into_any(),
        HomeSection::Settings => view! {
            <section class="home-page__section">
                <h2>"Settings"</h2>
                <div class="home-page__row">
                    <span>"Theme"</span>
                    <ThemeToggle/>
                </div>
            </section>
        }
        .into_any(),
    };

    view! {
        <div class="home-page">
            <NavPanel/>
            {body}
        </div>
    }
}
