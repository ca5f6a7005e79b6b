//! Clinic settings store: identity printed on documents.

use crate::error::AppResult;
use crate::models::ClinicSettings;
use std::path::PathBuf;

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the settings. A missing or corrupt file yields the default
    /// clinic identity.
    pub fn load(&self) -> ClinicSettings {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str::<ClinicSettings>(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, settings: &ClinicSettings) -> AppResult<()> {
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json)?;
        log::info!("Saved clinic settings: {}", settings.clinic_name);
        Ok(())
    }
}
