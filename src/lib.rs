mod appointments;
mod billing;
mod catalog;
mod commands;
mod config;
mod error;
mod models;
mod printing;
mod reminder;
mod session;
mod settings;

use commands::*;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::default()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_notification::init())
        .setup(|app| {
            let state = ClinicState::load()?;
            reminder::check_on_launch(app.handle(), state.appointments());
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Treatment catalog
            list_treatments,
            add_treatment,
            remove_treatments,
            // Selection
            select_treatments,
            update_selected_price,
            selected_treatments,
            // Billing
            generate_documents,
            print_documents,
            save_documents,
            reset_session,
            session_phase,
            phone_looks_valid,
            // Clinic settings
            get_clinic_settings,
            save_clinic_settings,
            // Appointments
            book_appointment,
            upcoming_appointments,
            search_appointments,
            delete_appointment,
            edit_appointment,
            appointments_due_tomorrow,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
