//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
    hooks::use_location,
};

use crate::pages::{home::HomePage, login::LoginPage, not_found::NotFoundPage};
use crate::state::location::LocationState;
use crate::state::route::AppRoute;
use crate::state::theme::{Theme, ThemeState};
use crate::util::dark_mode;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared `ThemeState` and `LocationState` contexts and sets up
/// routing. Every registered path renders through `RoutedPage`.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Light on the server and during hydration so both renders agree; the
    // stored preference is applied once the app is live in the browser.
    let theme = ThemeState::new(Theme::Light);
    let marker = theme.subscribe(|t| {
        dark_mode::apply(t);
        dark_mode::persist(t);
    });
    let _marker = StoredValue::new_local(marker);
    {
        let theme = theme.clone();
        Effect::new(move || {
            theme.set(dark_mode::read_preference());
        });
    }

    provide_context(theme);
    provide_context(LocationState::default());

    view! {
        <Stylesheet id="leptos" href="/pkg/michat.css"/>
        <Title text="MiChat"/>

        <Router>
            <LocationSync/>
            <Routes fallback=NotFoundPage>
                <Route path=StaticSegment("") view=RoutedPage/>
                <Route path=StaticSegment("login") view=RoutedPage/>
                <Route path=StaticSegment("register") view=RoutedPage/>
                <Route path=StaticSegment("chats") view=RoutedPage/>
                <Route path=StaticSegment("settings") view=RoutedPage/>
            </Routes>
        </Router>
    }
}

/// Mirror the router's location into the shared `LocationState`.
#[component]
fn LocationSync() -> impl IntoView {
    let shared = expect_context::<LocationState>();
    let location = use_location();

    // Seed synchronously so server rendering sees the requested path.
    shared.set_path(location.pathname.get_untracked());
    Effect::new(move || {
        shared.set_path(location.pathname.get());
    });
}

/// Dispatch the current path through the route table.
#[component]
fn RoutedPage() -> impl IntoView {
    let path = use_location().pathname.get_untracked();
    match AppRoute::resolve(&path) {
        AppRoute::Login(action) => view! { <LoginPage action=action/> }.into_any(),
        AppRoute::Home(section) => view! { <HomePage section=section/> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage/> }.into_any(),
    }
}
