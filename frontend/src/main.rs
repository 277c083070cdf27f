//! Waste remediation dashboard, browser side.

use std::sync::OnceLock;
use zoon::*;

/// Stores the main application task handle to prevent it from being dropped.
static MAIN_TASK: OnceLock<TaskHandle> = OnceLock::new();

mod app;
mod clock;
mod connection;
mod dashboard;
mod data;
mod dataflow;
mod landing;
mod routing;
mod session;
mod theme;
mod views;

pub fn main() {
    let handle = Task::start_droppable(async {
        let app = crate::app::DashboardApp::new();
        let root_element = app.root();
        start_app("app", move || root_element);
    });
    let _ = MAIN_TASK.set(handle);
}
