//! Browser location tracking on top of the History API.

use crate::dataflow::{Actor, Relay, relay};
use futures::StreamExt;
use shared::auto_rotation_enabled;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use zoon::Signal;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Clone, Debug, PartialEq)]
pub enum Route {
    Landing,
    Login,
    Dashboard,
    NotFound(String),
}

impl Route {
    /// Maps a location path to a page. The landing page lives at the
    /// configured route so the rotation gate and routing agree on it.
    pub fn resolve(path: &str, landing_route: &str) -> Self {
        if auto_rotation_enabled(path, landing_route) {
            return Route::Landing;
        }
        match path {
            LOGIN_PATH => Route::Login,
            DASHBOARD_PATH => Route::Dashboard,
            other => Route::NotFound(other.to_string()),
        }
    }
}

/// Current location path, updated on in-app navigation and on browser
/// back/forward.
#[derive(Clone, Debug)]
pub struct Router {
    pub path: Actor<String>,
    path_changed_relay: Relay<String>,
}

impl Router {
    pub fn new() -> Self {
        let (path_changed_relay, mut path_changed_stream) = relay();

        let path = Actor::new(current_path(), async move |state| {
            while let Some(path) = path_changed_stream.next().await {
                state.set_neq(path);
            }
        });

        listen_to_popstate(path_changed_relay.clone());

        Self {
            path,
            path_changed_relay,
        }
    }

    pub fn navigate(&self, path: &str) {
        let pushed = web_sys::window()
            .and_then(|window| window.history().ok())
            .map(|history| history.push_state_with_url(&JsValue::NULL, "", Some(path)));
        if !matches!(pushed, Some(Ok(()))) {
            zoon::eprintln!("Failed to push history entry for '{path}'");
        }
        announce(&self.path_changed_relay, path.to_string());
    }

    pub fn path_signal(&self) -> impl Signal<Item = String> + use<> {
        self.path.signal()
    }
}

fn announce(relay: &Relay<String>, path: String) {
    relay.send(path);
}

fn listen_to_popstate(relay: Relay<String>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let on_popstate = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        announce(&relay, current_path());
    });
    if window
        .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
        .is_err()
    {
        zoon::eprintln!("Failed to listen for browser navigation");
    }
    // The listener lives as long as the page.
    on_popstate.forget();
}

pub fn current_path() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_pages() {
        assert_eq!(Route::resolve("/", "/"), Route::Landing);
        assert_eq!(Route::resolve("/login", "/"), Route::Login);
        assert_eq!(Route::resolve("/dashboard", "/"), Route::Dashboard);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::resolve("/reports", "/"), Route::NotFound("/reports".to_string()));
        assert_eq!(Route::resolve("", "/"), Route::NotFound(String::new()));
    }

    #[test]
    fn landing_follows_configured_route() {
        assert_eq!(Route::resolve("/tv", "/tv"), Route::Landing);
        assert_eq!(Route::resolve("/", "/tv"), Route::NotFound("/".to_string()));
    }
}
