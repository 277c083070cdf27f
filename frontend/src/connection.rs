use crate::data::{DashboardData, DataEvent};
use crate::dataflow::Actor;
use crate::session::Session;
use futures::stream::{Stream, StreamExt};
use shared::{DownMsg, UpMsg};
use std::sync::Arc;
use zoon::*;

/// Actor+Relay compatible Connection adapter
#[derive(Clone)]
pub struct ConnectionAdapter {
    connection: Arc<Connection<UpMsg, DownMsg>>,
}

impl ConnectionAdapter {
    pub fn new() -> (Self, impl Stream<Item = DownMsg> + Unpin) {
        let (message_sender, message_stream) = futures::channel::mpsc::unbounded();

        let connection = Connection::new(move |down_msg, _| {
            let _ = message_sender.unbounded_send(down_msg);
        });

        let adapter = ConnectionAdapter {
            connection: Arc::new(connection),
        };
        (adapter, message_stream)
    }

    pub async fn send_up_msg(&self, up_msg: UpMsg) {
        if let Err(error) = self.connection.send_up_msg(up_msg).await {
            zoon::eprintln!("Failed to send message: {:?}", error);
        }
    }
}

/// Where a server message ends up on the browser side.
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    Data(DataEvent),
    Login(Result<String, String>),
}

pub fn route_down_msg(down_msg: DownMsg) -> Routed {
    match down_msg {
        DownMsg::DashboardLoaded {
            settings,
            dataset,
            modified,
        } => Routed::Data(DataEvent::Loaded {
            settings: Some(settings),
            dataset,
            modified,
        }),
        DownMsg::DatasetReloaded { dataset, modified } => Routed::Data(DataEvent::Loaded {
            settings: None,
            dataset,
            modified,
        }),
        DownMsg::DatasetError(error) => Routed::Data(DataEvent::Failed(error)),
        DownMsg::DataModifiedTime(modified) => Routed::Data(DataEvent::Modified(modified)),
        DownMsg::LoginSucceeded { username } => Routed::Login(Ok(username)),
        DownMsg::LoginFailed { message } => Routed::Login(Err(message)),
    }
}

/// Create message processor that forwards every DownMsg to its domain
pub fn create_connection_message_handler(
    down_msg_stream: impl Stream<Item = DownMsg> + Unpin + 'static,
    data: &DashboardData,
    session: &Session,
) -> Actor<()> {
    let data = data.clone();
    let session = session.clone();
    let mut down_msg_stream = down_msg_stream;

    Actor::new((), async move |_state| {
        while let Some(down_msg) = down_msg_stream.next().await {
            match route_down_msg(down_msg) {
                Routed::Data(event) => {
                    if let DataEvent::Failed(error) = &event {
                        zoon::eprintln!("Dataset error: {error}");
                    }
                    data.data_event_relay.send(event);
                }
                Routed::Login(result) => session.login_result_relay.send(result),
            }
        }
    })
}
