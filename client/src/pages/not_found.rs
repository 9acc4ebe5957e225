//! Explicit view for paths the route table does not register.

use leptos::prelude::*;

use crate::state::route::LOGIN_PATH;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"Page not found"</h1>
            <p>"There is nothing at this address."</p>
            <a href=LOGIN_PATH class="login-button">
                "Go to sign in"
            </a>
        </div>
    }
}
