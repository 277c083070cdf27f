//! DashboardApp - Self-contained Actor+Relay Architecture

use crate::clock::Clock;
use crate::connection::{ConnectionAdapter, create_connection_message_handler};
use crate::dashboard::DashboardFilters;
use crate::data::DashboardData;
use crate::dataflow::Actor;
use crate::landing::Landing;
use crate::routing::Router;
use crate::session::Session;
use zoon::*;

/// Every domain of the browser app, wired together once at startup.
#[derive(Clone)]
pub struct DashboardApp {
    /// Dataset, snapshot and landing settings received from the server
    pub data: DashboardData,

    /// Current location path
    pub router: Router,

    /// Logged-in user for the dashboard page
    pub session: Session,

    /// Dashboard filter selections and the filtered view
    pub filters: DashboardFilters,

    /// Rotating landing page content
    pub landing: Landing,

    pub clock: Clock,

    _message_handler: Actor<()>,
}

impl DashboardApp {
    pub fn new() -> Self {
        let (connection, down_msg_stream) = ConnectionAdapter::new();
        let router = Router::new();
        let data = DashboardData::new(connection.clone());
        let session = Session::new(connection, router.clone(), &data);
        let filters = DashboardFilters::new(&data);
        let landing = Landing::new(&data, &router);
        let clock = Clock::new(&data);
        let message_handler = create_connection_message_handler(down_msg_stream, &data, &session);

        DashboardApp {
            data,
            router,
            session,
            filters,
            landing,
            clock,
            _message_handler: message_handler,
        }
    }

    pub fn root(&self) -> impl Element + use<> {
        crate::views::root(self)
    }
}
