#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const CHATS_PATH: &str = "/chats";
pub const SETTINGS_PATH: &str = "/settings";

/// Mode the login view is rendered in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthAction {
    #[default]
    Login,
    Register,
}

/// Section shown next to the navigation panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeSection {
    Chats,
    Settings,
}

/// Result of dispatching a path through the route table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Login(AuthAction),
    Home(HomeSection),
    NotFound,
}

impl AppRoute {
    /// Every path the shell answers for, in registration order.
    #[cfg(test)]
    pub const REGISTERED: [&'static str; 5] = [ROOT_PATH, LOGIN_PATH, REGISTER_PATH, CHATS_PATH, SETTINGS_PATH];

    /// Select the route for `path`. Matching is exact: no trailing-slash or
    /// case folding. Unregistered paths resolve to [`AppRoute::NotFound`].
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        match path {
            ROOT_PATH | LOGIN_PATH => Self::Login(AuthAction::Login),
            REGISTER_PATH => Self::Login(AuthAction::Register),
            CHATS_PATH => Self::Home(HomeSection::Chats),
            SETTINGS_PATH => Self::Home(HomeSection::Settings),
            _ => Self::NotFound,
        }
    }
}
