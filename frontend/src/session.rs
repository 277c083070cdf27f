//! Browser-side login state. The server only checks credentials; the
//! logged-in user lives here until logout or page reload.

use crate::connection::ConnectionAdapter;
use crate::data::DashboardData;
use crate::dataflow::{Actor, Relay, relay};
use crate::routing::{DASHBOARD_PATH, Router};
use futures::{StreamExt, select};
use shared::UpMsg;

const MISSING_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<String>,
    pub error: Option<String>,
    pub pending: bool,
}

impl SessionState {
    /// Returns the message to send, or `None` when a request is already in
    /// flight or a field is blank.
    pub fn begin_login(&mut self, username: &str, password: &str) -> Option<UpMsg> {
        if self.pending {
            return None;
        }
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            self.error = Some(MISSING_CREDENTIALS.to_string());
            return None;
        }
        self.pending = true;
        self.error = None;
        Some(UpMsg::Login {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Returns `true` when the user is now logged in.
    pub fn finish_login(&mut self, result: Result<String, String>) -> bool {
        self.pending = false;
        match result {
            Ok(username) => {
                self.user = Some(username);
                self.error = None;
                true
            }
            Err(message) => {
                self.user = None;
                self.error = Some(message);
                false
            }
        }
    }

    pub fn logout(&mut self) {
        *self = Self::default();
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct Session {
    pub state: Actor<SessionState>,
    pub login_requested_relay: Relay<(String, String)>,
    pub login_result_relay: Relay<Result<String, String>>,
    pub logout_pressed_relay: Relay<()>,
}

impl Session {
    pub fn new(connection: ConnectionAdapter, router: Router, data: &DashboardData) -> Self {
        let data = data.clone();
        let (login_requested_relay, mut login_requested_stream) = relay();
        let (login_result_relay, mut login_result_stream) = relay();
        let (logout_pressed_relay, mut logout_pressed_stream) = relay();

        let state = Actor::new(SessionState::default(), async move |state| {
            loop {
                select! {
                    request = login_requested_stream.next() => {
                        let Some((username, password)) = request else { break };
                        let up_msg = state.lock_mut().begin_login(&username, &password);
                        if let Some(up_msg) = up_msg {
                            connection.send_up_msg(up_msg).await;
                        }
                    }
                    result = login_result_stream.next() => {
                        let Some(result) = result else { break };
                        let logged_in = state.lock_mut().finish_login(result);
                        if logged_in {
                            router.navigate(DASHBOARD_PATH);
                        }
                    }
                    logout = logout_pressed_stream.next() => {
                        if logout.is_none() { break }
                        state.lock_mut().logout();
                        router.navigate(&data.landing_route());
                    }
                }
            }
        });

        Self {
            state,
            login_requested_relay,
            login_result_relay,
            logout_pressed_relay,
        }
    }
}
