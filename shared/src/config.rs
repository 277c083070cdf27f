use serde::{Deserialize, Serialize};

pub const MIN_WATCH_DEBOUNCE_MS: u64 = 50;
pub const MIN_ROTATION_INTERVAL_MS: u32 = 1000;
pub const MIN_CLOCK_INTERVAL_MS: u32 = 250;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Contents of `dashboard.toml`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    #[serde(default)]
    pub data: DataSection,
    #[serde(default)]
    pub landing: LandingSettings,
    #[serde(default = "default_users")]
    pub users: Vec<UserEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DataSection {
    pub file: String,
    pub watch_debounce_ms: u64,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            file: "data.csv".to_string(),
            watch_debounce_ms: 5000,
        }
    }
}

/// The part of the config the browser needs; sent with `DashboardLoaded`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LandingSettings {
    pub route: String,
    pub rotation_interval_ms: u32,
    pub clock_interval_ms: u32,
}

impl Default for LandingSettings {
    fn default() -> Self {
        Self {
            route: "/".to_string(),
            rotation_interval_ms: 15000,
            clock_interval_ms: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserEntry {
    pub username: String,
    pub password: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data: DataSection::default(),
            landing: LandingSettings::default(),
            users: default_users(),
        }
    }
}

fn default_users() -> Vec<UserEntry> {
    vec![UserEntry {
        username: "admin".to_string(),
        password: "password123".to_string(),
    }]
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Clamps out-of-range values in place and describes every fix.
    pub fn validate_and_fix(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.data.file.trim().is_empty() {
            self.data.file = DataSection::default().file;
            warnings.push(format!("data.file was empty, using '{}'", self.data.file));
        }
        if self.data.watch_debounce_ms < MIN_WATCH_DEBOUNCE_MS {
            warnings.push(format!(
                "data.watch_debounce_ms {} raised to {MIN_WATCH_DEBOUNCE_MS}",
                self.data.watch_debounce_ms
            ));
            self.data.watch_debounce_ms = MIN_WATCH_DEBOUNCE_MS;
        }

        let landing = &mut self.landing;
        if !landing.route.starts_with('/') {
            landing.route = format!("/{}", landing.route);
            warnings.push(format!("landing.route must start with '/', using '{}'", landing.route));
        }
        if landing.rotation_interval_ms < MIN_ROTATION_INTERVAL_MS {
            warnings.push(format!(
                "landing.rotation_interval_ms {} raised to {MIN_ROTATION_INTERVAL_MS}",
                landing.rotation_interval_ms
            ));
            landing.rotation_interval_ms = MIN_ROTATION_INTERVAL_MS;
        }
        if landing.clock_interval_ms < MIN_CLOCK_INTERVAL_MS {
            warnings.push(format!(
                "landing.clock_interval_ms {} raised to {MIN_CLOCK_INTERVAL_MS}",
                landing.clock_interval_ms
            ));
            landing.clock_interval_ms = MIN_CLOCK_INTERVAL_MS;
        }

        let before = self.users.len();
        self.users.retain(|user| !user.username.trim().is_empty());
        if self.users.len() != before {
            warnings.push(format!("dropped {} user(s) without a username", before - self.users.len()));
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_use_defaults() {
        let config = DashboardConfig::from_toml_str("[landing]\nrotation_interval_ms = 20000\n").unwrap();
        assert_eq!(config.data, DataSection::default());
        assert_eq!(config.landing.rotation_interval_ms, 20000);
        assert_eq!(config.landing.route, "/");
        assert_eq!(config.users[0].username, "admin");
    }

    #[test]
    fn validation_clamps_intervals() {
        let mut config = DashboardConfig::from_toml_str(
            "[data]\nwatch_debounce_ms = 0\n[landing]\nroute = \"home\"\nrotation_interval_ms = 10\nclock_interval_ms = 5\n",
        )
        .unwrap();
        let warnings = config.validate_and_fix();

        assert_eq!(warnings.len(), 4);
        assert_eq!(config.data.watch_debounce_ms, MIN_WATCH_DEBOUNCE_MS);
        assert_eq!(config.landing.route, "/home");
        assert_eq!(config.landing.rotation_interval_ms, MIN_ROTATION_INTERVAL_MS);
        assert_eq!(config.landing.clock_interval_ms, MIN_CLOCK_INTERVAL_MS);
    }

    #[test]
    fn defaults_pass_validation_and_round_trip() {
        let mut config = DashboardConfig::default();
        assert!(config.validate_and_fix().is_empty());

        let text = config.to_toml_string().unwrap();
        assert_eq!(DashboardConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let err = DashboardConfig::from_toml_str("[landing\n").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse config"));
    }
}
