use serde::{Deserialize, Serialize};

pub mod config;
pub mod content;
pub mod dataset;
pub mod filters;
pub mod format;
pub mod landing;
pub mod metrics;
pub mod rotation;

pub use config::{ConfigError, DashboardConfig, DataSection, LandingSettings, UserEntry};
pub use content::{ContentRenderer, LandingContent, OverviewContent, SummaryRenderer, VendorContent};
pub use dataset::{Dataset, DatasetError, RemediationRecord};
pub use filters::{DashboardFilter, FilterOptions};
pub use landing::{RefreshIcon, auto_rotation_enabled, format_clock, refresh_indicator};
pub use metrics::{DashboardMetrics, GroupStats, ProgressPoint, UlbStats};
pub use rotation::{ContentSelector, DashboardSnapshot, RotationState, RotationStep, Rotator, Tick, View};

// ===== MESSAGE TYPES =====

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum UpMsg {
    LoadDashboard,
    GetDataModifiedTime,
    Login { username: String, password: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum DownMsg {
    DashboardLoaded {
        settings: LandingSettings,
        dataset: Dataset,
        modified: Option<DataModified>,
    },
    /// Pushed to every connected session after the data file changed on disk.
    DatasetReloaded {
        dataset: Dataset,
        modified: Option<DataModified>,
    },
    DatasetError(String),
    DataModifiedTime(Option<DataModified>),
    LoginSucceeded { username: String },
    LoginFailed { message: String },
}

// ===== DATA FILE TYPES =====

/// Last modification time of the data file as seen by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DataModified {
    /// Seconds since the Unix epoch.
    pub timestamp_secs: f64,
    /// ctime-style rendering, e.g. `Mon May 12 14:03:01 2025`.
    pub formatted: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_msg_survives_json_transport() {
        let dataset = Dataset::from_csv_str(
            "Vendor,Cluster,ULB,Quantity to be remediated in MT\nzigma,North,Ulb A,10\n",
        )
        .unwrap();
        let msg = DownMsg::DashboardLoaded {
            settings: LandingSettings::default(),
            dataset,
            modified: Some(DataModified {
                timestamp_secs: 1.0,
                formatted: "Thu Jan  1 00:00:01 1970".to_string(),
            }),
        };

        let json = serde_json::to_string(&msg).unwrap();
        let back: DownMsg = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn login_up_msg_keeps_credentials_fields() {
        let msg = UpMsg::Login {
            username: "admin".to_string(),
            password: "secret".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"username\":\"admin\""));
    }
}
