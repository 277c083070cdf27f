use moon::*;
use shared::{DownMsg, UpMsg};
use std::sync::Arc;

mod auth;
mod config;
mod data_store;
mod error;
mod watcher;

use data_store::DataStore;

static DATA_STORE: Lazy<Arc<DataStore>> = Lazy::new(|| Arc::new(DataStore::new(&config::config().data.file)));

async fn frontend() -> Frontend {
    Frontend::new()
        .title("Waste Remediation Dashboard")
        .append_to_head(r#"<link rel="stylesheet" href="/_api/public/css/dashboard.css">"#)
        .index_by_robots(false)
}

async fn up_msg_handler(req: UpMsgRequest<UpMsg>) {
    let (session_id, cor_id) = (req.session_id, req.cor_id);

    let down_msg = match req.up_msg {
        UpMsg::LoadDashboard => load_dashboard(),
        UpMsg::GetDataModifiedTime => DownMsg::DataModifiedTime(DATA_STORE.modified()),
        UpMsg::Login { username, password } => login(&username, &password),
    };

    if let Some(session) = sessions::by_session_id().wait_for(session_id).await {
        session.send_down_msg(&down_msg, cor_id).await;
    } else {
        log::debug!("Session disconnected before the response was sent");
    }
}

fn load_dashboard() -> DownMsg {
    match DATA_STORE.load() {
        Ok(loaded) => DownMsg::DashboardLoaded {
            settings: config::config().landing.clone(),
            dataset: loaded.dataset.clone(),
            modified: loaded.modified.clone(),
        },
        Err(err) => {
            log::error!("{err}");
            DownMsg::DatasetError(err.to_string())
        }
    }
}

fn login(username: &str, password: &str) -> DownMsg {
    match auth::validate(&config::config().users, username, password) {
        Some(username) => {
            log::info!("User '{username}' logged in");
            DownMsg::LoginSucceeded { username }
        }
        None => {
            log::warn!("Rejected login attempt");
            DownMsg::LoginFailed {
                message: auth::INVALID_CREDENTIALS.to_string(),
            }
        }
    }
}

#[moon::main]
async fn main() -> std::io::Result<()> {
    // `start` installs the logger (level from MoonZoon.toml), so failures
    // before it go straight to stderr.
    let settings = config::config();
    if let Err(err) = DATA_STORE.load() {
        eprintln!("Initial data load failed: {err}");
    }

    let _watcher = match watcher::watch_data_file(DATA_STORE.clone(), settings.data.watch_debounce_ms) {
        Ok(watcher) => Some(watcher),
        Err(err) => {
            eprintln!("{err}; data changes will only be picked up on page load");
            None
        }
    };

    start(frontend, up_msg_handler, |_| {}).await
}
