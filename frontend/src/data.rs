//! Dataset received from the server and the snapshot derived from it.

use crate::connection::ConnectionAdapter;
use crate::dataflow::{Actor, Relay, relay};
use futures::{FutureExt, StreamExt, select};
use shared::{DashboardSnapshot, DataModified, Dataset, LandingSettings, UpMsg};
use std::sync::Arc;
use zoon::{Signal, SignalExt, Timer};

/// How often the browser asks for the data file's modification time.
pub const MODIFIED_POLL_INTERVAL_MS: u32 = 60_000;

#[derive(Debug, Clone, PartialEq)]
pub enum DataEvent {
    /// `settings` is `None` for reloads pushed by the file watcher.
    Loaded {
        settings: Option<LandingSettings>,
        dataset: Dataset,
        modified: Option<DataModified>,
    },
    Failed(String),
    Modified(Option<DataModified>),
}

#[derive(Debug, Clone, Default)]
pub struct DataState {
    pub settings: LandingSettings,
    pub snapshot: Option<Arc<DashboardSnapshot>>,
    pub modified: Option<DataModified>,
    pub error: Option<String>,
}

impl DataState {
    /// Applies a server event. Returns `true` when the data file changed
    /// behind a loaded snapshot and a fresh load should be requested.
    pub fn apply(&mut self, event: DataEvent) -> bool {
        match event {
            DataEvent::Loaded {
                settings,
                dataset,
                modified,
            } => {
                if let Some(settings) = settings {
                    self.settings = settings;
                }
                self.snapshot = Some(Arc::new(DashboardSnapshot::new(dataset)));
                self.modified = modified;
                self.error = None;
                false
            }
            DataEvent::Failed(error) => {
                self.error = Some(error);
                false
            }
            DataEvent::Modified(modified) => {
                let stale = self.snapshot.is_some() && modified.is_some() && modified != self.modified;
                if !stale {
                    self.modified = modified;
                }
                stale
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct DashboardData {
    pub state: Actor<DataState>,
    pub data_event_relay: Relay<DataEvent>,
}

impl DashboardData {
    pub fn new(connection: ConnectionAdapter) -> Self {
        let (data_event_relay, mut data_event_stream) = relay();

        let state = Actor::new(DataState::default(), async move |state| {
            connection.send_up_msg(UpMsg::LoadDashboard).await;
            loop {
                select! {
                    event = data_event_stream.next() => {
                        let Some(event) = event else { break };
                        let stale = state.lock_mut().apply(event);
                        if stale {
                            zoon::println!("Data file changed, reloading");
                            connection.send_up_msg(UpMsg::LoadDashboard).await;
                        }
                    }
                    _ = Timer::sleep(MODIFIED_POLL_INTERVAL_MS).fuse() => {
                        connection.send_up_msg(UpMsg::GetDataModifiedTime).await;
                    }
                }
            }
        });

        Self {
            state,
            data_event_relay,
        }
    }

    pub fn landing_route(&self) -> String {
        self.state.get_cloned().settings.route
    }

    pub fn settings_signal(&self) -> impl Signal<Item = LandingSettings> + use<> {
        self.state.signal().map(|state| state.settings).dedupe_cloned()
    }

    /// Emits only when a load replaces the snapshot, not on every state change.
    pub fn snapshot_signal(&self) -> impl Signal<Item = Option<Arc<DashboardSnapshot>>> + use<> {
        self.state
            .signal()
            .map(|state| LoadedSnapshot(state.snapshot))
            .dedupe_cloned()
            .map(|loaded| loaded.0)
    }
}

/// Snapshot compared by identity.
#[derive(Debug, Clone)]
struct LoadedSnapshot(Option<Arc<DashboardSnapshot>>);

impl PartialEq for LoadedSnapshot {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(this), Some(other)) => Arc::ptr_eq(this, other),
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_csv_str(
            "Vendor,Cluster,ULB,Quantity to be remediated in MT\nzigma,North,Kavali,10\ntharuni,South,Gudur,20\n",
        )
        .unwrap()
    }

    fn modified(secs: f64) -> Option<DataModified> {
        Some(DataModified {
            timestamp_secs: secs,
            formatted: format!("{secs}"),
        })
    }

    fn loaded(settings: Option<LandingSettings>, secs: f64) -> DataEvent {
        DataEvent::Loaded {
            settings,
            dataset: dataset(),
            modified: modified(secs),
        }
    }

    #[test]
    fn load_builds_sorted_snapshot() {
        let mut state = DataState::default();
        assert!(!state.apply(loaded(None, 1.0)));

        let snapshot = state.snapshot.as_ref().unwrap();
        assert_eq!(snapshot.vendors, vec!["tharuni", "zigma"]);
        assert_eq!(state.modified, modified(1.0));
    }

    #[test]
    fn pushed_reload_keeps_settings() {
        let mut state = DataState::default();
        let settings = LandingSettings {
            rotation_interval_ms: 5000,
            ..LandingSettings::default()
        };
        state.apply(loaded(Some(settings.clone()), 1.0));
        state.apply(loaded(None, 2.0));
        assert_eq!(state.settings, settings);
    }

    #[test]
    fn failure_keeps_previous_snapshot() {
        let mut state = DataState::default();
        state.apply(loaded(None, 1.0));
        state.apply(DataEvent::Failed("row 2: unterminated quoted field".to_string()));

        assert!(state.snapshot.is_some());
        assert_eq!(state.error.as_deref(), Some("row 2: unterminated quoted field"));

        state.apply(loaded(None, 2.0));
        assert_eq!(state.error, None);
    }

    #[test]
    fn newer_modification_time_requests_reload() {
        let mut state = DataState::default();
        state.apply(loaded(None, 1.0));

        assert!(!state.apply(DataEvent::Modified(modified(1.0))));
        assert!(state.apply(DataEvent::Modified(modified(5.0))));
        // Still the old time until the reload arrives.
        assert_eq!(state.modified, modified(1.0));
    }

    #[test]
    fn modification_poll_keeps_snapshot_identity() {
        let mut state = DataState::default();
        state.apply(loaded(None, 1.0));
        let before = LoadedSnapshot(state.snapshot.clone());

        state.apply(DataEvent::Modified(modified(1.0)));
        state.apply(DataEvent::Failed("temporarily locked".to_string()));
        assert_eq!(LoadedSnapshot(state.snapshot.clone()), before);

        state.apply(loaded(None, 2.0));
        assert_ne!(LoadedSnapshot(state.snapshot.clone()), before);
        assert_ne!(LoadedSnapshot(None), before);
    }

    #[test]
    fn modification_time_before_first_load_is_recorded() {
        let mut state = DataState::default();
        assert!(!state.apply(DataEvent::Modified(modified(3.0))));
        assert_eq!(state.modified, modified(3.0));
    }
}
