//! Login page, rendered in sign-in or registration mode.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api::{self, AccessRequest};
use crate::state::route::{AuthAction, LOGIN_PATH, REGISTER_PATH};

const MISSING_LOGIN: &str = "Enter your login and password.";
const MISSING_REGISTER: &str = "Enter email, username and password.";
const BAD_EMAIL: &str = "Enter a valid email address.";

/// Mode-specific text and links for the login form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormCopy {
    pub subtitle: &'static str,
    pub submit_label: &'static str,
    pub pending: &'static str,
    pub switch_prompt: &'static str,
    pub switch_label: &'static str,
    pub switch_href: &'static str,
}

#[must_use]
pub fn form_copy(action: AuthAction) -> FormCopy {
    match action {
        AuthAction::Login => FormCopy {
            subtitle: "Sign in",
            submit_label: "Sign In",
            pending: "Signing in...",
            switch_prompt: "No account yet?",
            switch_label: "Register",
            switch_href: REGISTER_PATH,
        },
        AuthAction::Register => FormCopy {
            subtitle: "Create account",
            submit_label: "Register",
            pending: "Creating account...",
            switch_prompt: "Already registered?",
            switch_label: "Sign in",
            switch_href: LOGIN_PATH,
        },
    }
}

/// Trim and require both sign-in fields. Returns the trimmed login.
pub fn validate_login_input(login: &str, password: &str) -> Result<String, &'static str> {
    let login = login.trim();
    if login.is_empty() || password.trim().is_empty() {
        return Err(MISSING_LOGIN);
    }
    Ok(login.to_owned())
}

/// Trim and require all registration fields; the email must look like
/// `local@label.tld`. Returns the trimmed email and username.
pub fn validate_register_input(email: &str, username: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    let username = username.trim();
    if email.is_empty() || username.is_empty() || password.trim().is_empty() {
        return Err(MISSING_REGISTER);
    }
    if !is_valid_email(email) {
        return Err(BAD_EMAIL);
    }
    Ok((email.to_owned(), username.to_owned()))
}

/// Validate the fields used by `action` and build the backend request.
pub fn access_request(
    action: AuthAction,
    login: &str,
    email: &str,
    username: &str,
    password: &str,
) -> Result<AccessRequest, &'static str> {
    match action {
        AuthAction::Login => validate_login_input(login, password)
            .map(|login| AccessRequest::Authorize { login, password: password.to_owned() }),
        AuthAction::Register => validate_register_input(email, username, password)
            .map(|(email, username)| AccessRequest::Register { email, username, password: password.to_owned() }),
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((label, rest)) = domain.split_once('.') else {
        return false;
    };
    let local_ok = !local.is_empty() && local.chars().all(|c| c.is_ascii_alphanumeric() || "_.+-".contains(c));
    let label_ok = !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    let rest_ok = !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    local_ok && label_ok && rest_ok
}

/// Login page. Valid forms are sent to the access backend; the backend's
/// error, or the validation message, is shown under the form.
#[component]
pub fn LoginPage(action: AuthAction) -> impl IntoView {
    let copy = form_copy(action);
    let navigate = use_navigate();

    let login = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match access_request(action, &login.get(), &email.get(), &username.get(), &password.get()) {
            Ok(request) => request,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(copy.pending.to_owned());

        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let outcome = api::submit(&request).await;
            busy.set(false);
            match outcome {
                Ok(()) => {
                    info.set(String::new());
                    navigate(request.next_path(), NavigateOptions::default());
                }
                Err(e) => info.set(e),
            }
        });
    };

    let identity_fields = match action {
        AuthAction::Login => view! {
            <input
                class="login-input"
                type="text"
                name="login"
                placeholder="Email or username"
                prop:value=move || login.get()
                on:input=move |ev| login.set(event_target_value(&ev))
            />
        }
        .into_any(),
        AuthAction::Register => view! {
            <input
                class="login-input"
                type="email"
                name="email"
                placeholder="you@example.com"
                prop:value=move || email.get()
                on:input=move |ev| email.set(event_target_value(&ev))
            />
            <input
                class="login-input"
                type="text"
                name="username"
                placeholder="Username"
                prop:value=move || username.get()
                on:input=move |ev| username.set(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"MiChat"</h1>
                <p class="login-card__subtitle">{copy.subtitle}</p>
                <form class="login-form" on:submit=on_submit>
                    {identity_fields}
                    <input
                        class="login-input"
                        type="password"
                        name="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {copy.submit_label}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <p class="login-card__switch">
                    {copy.switch_prompt}
                    " "
                    <a href=copy.switch_href>{copy.switch_label}</a>
                </p>
            </div>
        </div>
    }
}
