//! Loaded dataset cache.
//!
//! The parsed file lives behind an `RwLock<Option<Arc<..>>>`; request handlers
//! clone the `Arc` and never hold the lock across an await. A cached copy is
//! reused while the file's modification time is unchanged, and the watcher
//! forces a reload when the file changes.

use crate::error::BackendError;
use chrono::{DateTime, Local};
use shared::{DataModified, Dataset};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedData {
    pub dataset: Dataset,
    pub modified: Option<DataModified>,
}

pub struct DataStore {
    path: PathBuf,
    loaded: RwLock<Option<Arc<LoadedData>>>,
}

impl DataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: RwLock::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached data, reloaded first when the file changed since the last read.
    pub fn load(&self) -> Result<Arc<LoadedData>, BackendError> {
        if let Some(cached) = self.cached() {
            if cached.modified == self.modified() {
                return Ok(cached);
            }
        }
        self.reload()
    }

    pub fn reload(&self) -> Result<Arc<LoadedData>, BackendError> {
        let content = fs::read_to_string(&self.path).map_err(|err| BackendError::read(&self.path, err))?;
        let dataset = Dataset::from_csv_str(&content).map_err(|err| BackendError::dataset(&self.path, err))?;
        let loaded = Arc::new(LoadedData {
            dataset,
            modified: self.modified(),
        });

        log::info!(
            "Loaded {} record(s), {} vendor(s) from '{}'",
            loaded.dataset.records.len(),
            loaded.dataset.vendors().len(),
            self.path.display()
        );

        match self.loaded.write() {
            Ok(mut guard) => *guard = Some(loaded.clone()),
            Err(poisoned) => {
                log::warn!("Data store lock poisoned; recovering");
                *poisoned.into_inner() = Some(loaded.clone());
            }
        }
        Ok(loaded)
    }

    pub fn modified(&self) -> Option<DataModified> {
        let modified = fs::metadata(&self.path).and_then(|meta| meta.modified()).ok()?;
        Some(describe_modified(modified))
    }

    fn cached(&self) -> Option<Arc<LoadedData>> {
        match self.loaded.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

pub fn describe_modified(modified: SystemTime) -> DataModified {
    let timestamp_secs = modified
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or_default();
    DataModified {
        timestamp_secs,
        formatted: format_ctime(DateTime::<Local>::from(modified)),
    }
}

/// `Mon May 12 14:03:01 2025`
pub fn format_ctime(time: DateTime<Local>) -> String {
    time.format(CTIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::env;
    use std::time::Duration;

    const CSV: &str = "Vendor,Cluster,ULB,Quantity to be remediated in MT,Cumulative Quantity (2025-05-01)\n\
                       zigma,Guntur,Tenali,100,20\n";

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = env::temp_dir().join(format!("dashboard_{name}_{suffix}"));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("data.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_parses_and_caches() {
        let path = temp_file("store_cache", CSV);
        let store = DataStore::new(&path);

        let first = store.load().unwrap();
        assert_eq!(first.dataset.vendors(), vec!["zigma"]);
        assert!(first.modified.is_some());

        let second = store.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn reload_picks_up_new_content() {
        let path = temp_file("store_reload", CSV);
        let store = DataStore::new(&path);
        store.load().unwrap();

        fs::write(&path, format!("{CSV}tharuni,Kurnool,Adoni,50,5\n")).unwrap();
        let reloaded = store.reload().unwrap();
        assert_eq!(reloaded.dataset.vendors(), vec!["tharuni", "zigma"]);
    }

    #[test]
    fn missing_and_malformed_files_are_errors() {
        let store = DataStore::new(env::temp_dir().join("dashboard_does_not_exist.csv"));
        assert!(matches!(store.load(), Err(BackendError::Read { .. })));
        assert_eq!(store.modified(), None);

        let path = temp_file("store_bad", "Vendor,Cluster\nzigma,Guntur\n");
        let err = DataStore::new(&path).load().unwrap_err();
        assert!(matches!(err, BackendError::Dataset { .. }));
        assert!(err.to_string().contains("missing required column 'ULB'"));
    }

    #[test]
    fn modification_time_uses_ctime_layout() {
        let time = Local.with_ymd_and_hms(2025, 5, 2, 14, 3, 1).unwrap();
        assert_eq!(format_ctime(time), "Fri May  2 14:03:01 2025");

        let described = describe_modified(UNIX_EPOCH + Duration::from_secs(90));
        assert_eq!(described.timestamp_secs, 90.0);
    }
}
