use crate::appointments::{self, AppointmentBook};
use crate::catalog::TreatmentCatalog;
use crate::config;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::printing;
use crate::session::{self, BillingSession, SessionPhase};
use crate::settings::SettingsStore;
use chrono::Local;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tauri::State;

// ============ Application state ============

/// Everything the command layer works on: the catalog and billing
/// session behind mutexes, plus the path-backed stores.
pub struct ClinicState {
    catalog: Mutex<TreatmentCatalog>,
    session: Mutex<BillingSession>,
    settings: SettingsStore,
    appointments: AppointmentBook,
    records_dir: PathBuf,
    txt_dir: PathBuf,
}

/// Patient input for one generate action.
#[derive(serde::Deserialize)]
pub struct PatientInput {
    pub name: String,
    pub phone: String,
    pub patient_type: PatientType,
    pub vip_discount: i64,
    pub prescription: String,
}

fn lock<T>(mutex: &Mutex<T>) -> AppResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| AppError::Custom("state lock poisoned".to_string()))
}

impl ClinicState {
    /// Build the state from the default app data directory.
    pub fn load() -> AppResult<Self> {
        config::ensure_app_dirs()?;
        Ok(Self::with_paths(
            config::treatments_file()?,
            config::appointments_file()?,
            config::settings_file()?,
            config::records_dir()?,
            config::txt_dir()?,
        ))
    }

    pub fn with_paths(
        treatments_file: PathBuf,
        appointments_file: PathBuf,
        settings_file: PathBuf,
        records_dir: PathBuf,
        txt_dir: PathBuf,
    ) -> Self {
        Self {
            catalog: Mutex::new(TreatmentCatalog::load(treatments_file)),
            session: Mutex::new(BillingSession::new()),
            settings: SettingsStore::new(settings_file),
            appointments: AppointmentBook::new(appointments_file),
            records_dir,
            txt_dir,
        }
    }

    pub fn appointments(&self) -> &AppointmentBook {
        &self.appointments
    }

    // ── Catalog ─────────────────────────────────────────────

    pub fn list_treatments(&self) -> AppResult<BTreeMap<String, i64>> {
        Ok(lock(&self.catalog)?.entries().clone())
    }

    pub fn add_treatment(&self, name: &str, price: i64) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Please enter a treatment name."));
        }
        lock(&self.catalog)?.add(name, price)?;
        log::info!("Added treatment {} (Rs. {})", name, price);
        Ok(())
    }

    /// Remove catalog entries and drop any matching selected lines,
    /// the way the selection list follows the catalog in the UI.
    pub fn remove_treatments(&self, names: &[String]) -> AppResult<()> {
        lock(&self.catalog)?.remove(names)?;
        lock(&self.session)?.drop_lines(names);
        Ok(())
    }

    // ── Selection ───────────────────────────────────────────

    pub fn select_treatments(&self, names: &[String]) -> AppResult<Vec<SelectedTreatment>> {
        let catalog = lock(&self.catalog)?;
        let mut session = lock(&self.session)?;
        session.select(names, &catalog);
        Ok(session.selected().to_vec())
    }

    pub fn update_selected_price(&self, name: &str, price: i64) -> AppResult<()> {
        lock(&self.session)?.set_line_price(name, price)
    }

    pub fn selected_treatments(&self) -> AppResult<Vec<SelectedTreatment>> {
        Ok(lock(&self.session)?.selected().to_vec())
    }

    // ── Billing ─────────────────────────────────────────────

    pub fn generate_documents(&self, input: &PatientInput) -> AppResult<GeneratedDocuments> {
        let clinic = self.settings.load();
        let now = Local::now();
        let documents = lock(&self.session)?.generate(
            &input.name,
            &input.phone,
            input.patient_type,
            input.vip_discount,
            &input.prescription,
            &clinic.clinic_name,
            now,
        )?;

        // Best-effort dated record copy; failure must not undo the generate.
        if let Err(e) =
            printing::save_record(&self.records_dir, input.name.trim(), &documents.combined(), now)
        {
            log::warn!("Could not write bill record: {}", e);
        }
        Ok(documents)
    }

    pub fn combined_text(&self) -> AppResult<String> {
        lock(&self.session)?.combined_text()
    }

    pub fn save_documents(&self) -> AppResult<PathBuf> {
        let text = self.combined_text()?;
        printing::save_export(&self.txt_dir, &text, Local::now())
    }

    pub fn reset_session(&self) -> AppResult<()> {
        lock(&self.session)?.reset();
        Ok(())
    }

    pub fn session_phase(&self) -> AppResult<SessionPhase> {
        Ok(lock(&self.session)?.phase())
    }

    // ── Settings ────────────────────────────────────────────

    pub fn clinic_settings(&self) -> ClinicSettings {
        self.settings.load()
    }

    pub fn save_clinic_settings(&self, settings: &ClinicSettings) -> AppResult<()> {
        self.settings.save(settings)
    }
}

// ============ Treatment catalog commands ============

#[tauri::command]
pub fn list_treatments(state: State<'_, ClinicState>) -> Result<BTreeMap<String, i64>, String> {
    state.list_treatments().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn add_treatment(
    state: State<'_, ClinicState>,
    name: String,
    price: i64,
) -> Result<(), String> {
    state.add_treatment(&name, price).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn remove_treatments(
    state: State<'_, ClinicState>,
    names: Vec<String>,
) -> Result<(), String> {
    state.remove_treatments(&names).map_err(|e| e.to_string())
}

// ============ Selection commands ============

#[tauri::command]
pub fn select_treatments(
    state: State<'_, ClinicState>,
    names: Vec<String>,
) -> Result<Vec<SelectedTreatment>, String> {
    state.select_treatments(&names).map_err(|e| e.to_string())
}

#[tauri::command]
pub fn update_selected_price(
    state: State<'_, ClinicState>,
    name: String,
    price: i64,
) -> Result<(), String> {
    state
        .update_selected_price(&name, price)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn selected_treatments(
    state: State<'_, ClinicState>,
) -> Result<Vec<SelectedTreatment>, String> {
    state.selected_treatments().map_err(|e| e.to_string())
}

// ============ Billing commands ============

#[tauri::command]
pub fn generate_documents(
    state: State<'_, ClinicState>,
    input: PatientInput,
) -> Result<GeneratedDocuments, String> {
    state.generate_documents(&input).map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn print_documents(state: State<'_, ClinicState>) -> Result<(), String> {
    let text = state.combined_text().map_err(|e| e.to_string())?;
    let path = printing::write_temp(&text).map_err(|e| e.to_string())?;
    printing::dispatch_print(&path).map_err(|e| e.to_string())?;

    // Fire-and-forget cleanup of the temp file; not awaited, and a
    // failed removal is ignored.
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(printing::CLEANUP_DELAY).await;
        if let Err(e) = std::fs::remove_file(&path) {
            log::debug!("Temp print file not removed: {}", e);
        }
    });
    Ok(())
}

#[tauri::command]
pub fn save_documents(state: State<'_, ClinicState>) -> Result<String, String> {
    state
        .save_documents()
        .map(|path| path.display().to_string())
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn reset_session(state: State<'_, ClinicState>) -> Result<(), String> {
    state.reset_session().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn session_phase(state: State<'_, ClinicState>) -> Result<SessionPhase, String> {
    state.session_phase().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn phone_looks_valid(phone: String) -> bool {
    session::phone_looks_valid(&phone)
}

// ============ Clinic settings commands ============

#[tauri::command]
pub fn get_clinic_settings(state: State<'_, ClinicState>) -> ClinicSettings {
    state.clinic_settings()
}

#[tauri::command]
pub fn save_clinic_settings(
    state: State<'_, ClinicState>,
    settings: ClinicSettings,
) -> Result<(), String> {
    state
        .save_clinic_settings(&settings)
        .map_err(|e| e.to_string())
}

// ============ Appointment commands ============

#[tauri::command]
pub fn book_appointment(
    state: State<'_, ClinicState>,
    name: String,
    phone: String,
    date: String,
) -> Result<Appointment, String> {
    state
        .appointments()
        .book(&name, &phone, &date, Local::now().date_naive())
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn upcoming_appointments(state: State<'_, ClinicState>) -> Vec<Appointment> {
    state.appointments().upcoming(Local::now().date_naive())
}

#[tauri::command]
pub fn search_appointments(state: State<'_, ClinicState>, query: String) -> Vec<Appointment> {
    let upcoming = state.appointments().upcoming(Local::now().date_naive());
    appointments::search(&query, &upcoming)
}

#[tauri::command]
pub fn delete_appointment(
    state: State<'_, ClinicState>,
    appointment: Appointment,
) -> Result<(), String> {
    state
        .appointments()
        .delete(&appointment)
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn edit_appointment(
    state: State<'_, ClinicState>,
    original: Appointment,
    new_date: Option<String>,
    new_phone: Option<String>,
) -> Result<Appointment, String> {
    state
        .appointments()
        .edit(
            &original,
            new_date.as_deref(),
            new_phone.as_deref(),
            Local::now().date_naive(),
        )
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn appointments_due_tomorrow(state: State<'_, ClinicState>) -> Vec<Appointment> {
    state.appointments().due_tomorrow(Local::now().date_naive())
}
