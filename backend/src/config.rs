use crate::error::BackendError;
use moon::Lazy;
use shared::DashboardConfig;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_PATH: &str = "dashboard.toml";
pub const DATA_FILE_ENV: &str = "DATA_FILE";

static CONFIG: Lazy<DashboardConfig> = Lazy::new(|| {
    let mut config = match load_or_create(Path::new(CONFIG_FILE_PATH)) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}; falling back to default settings");
            DashboardConfig::default()
        }
    };
    apply_env_override(&mut config, std::env::var(DATA_FILE_ENV).ok());
    config
});

pub fn config() -> &'static DashboardConfig {
    &CONFIG
}

/// Reads the config file, creating it with defaults when it does not exist.
///
/// Values fixed by validation are written back so the file on disk matches
/// what the server runs with.
pub fn load_or_create(path: &Path) -> Result<DashboardConfig, BackendError> {
    if !path.exists() {
        let mut config = DashboardConfig::default();
        config.validate_and_fix();
        save(path, &config)?;
        log::info!("Created default config at '{}'", path.display());
        return Ok(config);
    }

    let content = fs::read_to_string(path).map_err(|err| BackendError::read(path, err))?;
    let mut config = DashboardConfig::from_toml_str(&content)?;

    let warnings = config.validate_and_fix();
    if !warnings.is_empty() {
        for warning in &warnings {
            log::warn!("{}: {warning}", path.display());
        }
        if let Err(err) = save(path, &config) {
            log::warn!("Config fixed in memory only: {err}");
        }
    }
    Ok(config)
}

pub fn save(path: &Path, config: &DashboardConfig) -> Result<(), BackendError> {
    let content = config.to_toml_string()?;
    fs::write(path, content).map_err(|err| BackendError::write(path, err))
}

pub fn apply_env_override(config: &mut DashboardConfig, data_file: Option<String>) {
    if let Some(file) = data_file.filter(|file| !file.trim().is_empty()) {
        log::info!("Using data file from {DATA_FILE_ENV}: {file}");
        config.data.file = file;
    }
}
