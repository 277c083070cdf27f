use crate::data_store::DataStore;
use crate::error::BackendError;
use moon::{moonlight::CorId, sessions};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use shared::DownMsg;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Keeps the debouncer alive; dropping it stops watching.
pub struct DataWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
    task: JoinHandle<()>,
}

impl Drop for DataWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Watches the directory holding the data file so editors that replace the
/// file on save are still noticed.
pub fn watch_data_file(store: Arc<DataStore>, debounce_ms: u64) -> Result<DataWatcher, BackendError> {
    let target = absolute(store.path());
    let directory = target
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let (tx, mut rx) = mpsc::unbounded_channel::<()>();
    let watched = target.clone();
    let mut debouncer = new_debouncer(
        Duration::from_millis(debounce_ms),
        move |result: DebounceEventResult| match result {
            Ok(events) => {
                if events.iter().any(|event| is_same_file(&event.path, &watched)) {
                    let _ = tx.send(());
                }
            }
            Err(err) => log::error!("Data file watcher error: {err}"),
        },
    )?;
    debouncer.watcher().watch(&directory, RecursiveMode::NonRecursive)?;
    log::info!("Watching '{}' for changes", target.display());

    let task = tokio::spawn(async move {
        while rx.recv().await.is_some() {
            let msg = reload_message(&store);
            sessions::broadcast_down_msg(&msg, CorId::new()).await;
        }
    });

    Ok(DataWatcher {
        _debouncer: debouncer,
        task,
    })
}

/// Reloads the store and builds the message every session receives.
pub fn reload_message(store: &DataStore) -> DownMsg {
    match store.reload() {
        Ok(loaded) => {
            log::info!(
                "Data file changed, reloaded at {}",
                loaded
                    .modified
                    .as_ref()
                    .map(|modified| modified.formatted.as_str())
                    .unwrap_or("unknown time")
            );
            DownMsg::DatasetReloaded {
                dataset: loaded.dataset.clone(),
                modified: loaded.modified.clone(),
            }
        }
        Err(err) => {
            log::error!("Data file changed but could not be loaded: {err}");
            DownMsg::DatasetError(err.to_string())
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    })
}

fn is_same_file(event_path: &Path, target: &Path) -> bool {
    event_path == target || absolute(event_path) == target
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = env::temp_dir().join(format!("dashboard_{name}_{suffix}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn reload_message_reports_new_dataset_or_error() {
        let dir = temp_dir("watch_reload");
        let path = dir.join("data.csv");
        fs::write(&path, "Vendor,Cluster,ULB,Quantity to be remediated in MT\nzigma,Guntur,Tenali,10\n").unwrap();
        let store = DataStore::new(&path);

        match reload_message(&store) {
            DownMsg::DatasetReloaded { dataset, modified } => {
                assert_eq!(dataset.vendors(), vec!["zigma"]);
                assert!(modified.is_some());
            }
            other => panic!("unexpected message: {other:?}"),
        }

        fs::write(&path, "Vendor\nzigma\n").unwrap();
        assert!(matches!(reload_message(&store), DownMsg::DatasetError(_)));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn events_match_only_the_data_file() {
        let dir = temp_dir("watch_match");
        let path = dir.join("data.csv");
        fs::write(&path, "x").unwrap();
        let target = absolute(&path);

        assert!(is_same_file(&path, &target));
        assert!(!is_same_file(&dir.join("other.csv"), &target));
        fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn watcher_starts_for_existing_directory() {
        let dir = temp_dir("watch_start");
        let path = dir.join("data.csv");
        fs::write(&path, "Vendor,Cluster,ULB,Quantity to be remediated in MT\n").unwrap();

        let watcher = watch_data_file(Arc::new(DataStore::new(&path)), 50);
        assert!(watcher.is_ok());
        drop(watcher);
        fs::remove_dir_all(dir).ok();
    }
}
