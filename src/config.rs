use crate::error::{AppError, AppResult};
use std::path::PathBuf;

pub const APP_DIR_NAME: &str = "reimagine-clinic";

/// Application data directory (not created here).
pub fn app_data_dir() -> AppResult<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| AppError::Custom("Cannot find data directory".to_string()))?;
    Ok(data_dir.join(APP_DIR_NAME))
}

/// Create the data directory if it does not exist yet.
pub fn ensure_app_dirs() -> AppResult<PathBuf> {
    let dir = app_data_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Treatment catalog file (JSON object, name -> price).
pub fn treatments_file() -> AppResult<PathBuf> {
    Ok(app_data_dir()?.join("treatments.json"))
}

/// Appointment list file (JSON array).
pub fn appointments_file() -> AppResult<PathBuf> {
    Ok(app_data_dir()?.join("appointments.json"))
}

/// Clinic settings file (JSON object).
pub fn settings_file() -> AppResult<PathBuf> {
    Ok(app_data_dir()?.join("settings.json"))
}

/// Root of the per-day bill record folders.
pub fn records_dir() -> AppResult<PathBuf> {
    Ok(app_data_dir()?.join("records"))
}

/// Folder for explicitly saved bill/prescription text files.
pub fn txt_dir() -> AppResult<PathBuf> {
    Ok(app_data_dir()?.join("txt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_local_data() {
        let dir = app_data_dir().unwrap();
        let data = dirs::data_local_dir().unwrap();
        assert!(dir.starts_with(data));
        assert!(dir.ends_with(APP_DIR_NAME));
    }

    #[test]
    fn store_files_under_app_dir() {
        let app = app_data_dir().unwrap();
        assert_eq!(treatments_file().unwrap(), app.join("treatments.json"));
        assert_eq!(appointments_file().unwrap(), app.join("appointments.json"));
        assert_eq!(settings_file().unwrap(), app.join("settings.json"));
        assert!(records_dir().unwrap().ends_with("records"));
        assert!(txt_dir().unwrap().ends_with("txt"));
    }
}
