//! Launch reminder: a non-blocking notice listing tomorrow's
//! appointments, shown once when the app starts.

use crate::appointments::AppointmentBook;
use crate::models::Appointment;
use chrono::Local;
use tauri_plugin_notification::NotificationExt;

pub fn reminder_body(due: &[Appointment]) -> String {
    let mut lines = vec!["Appointments due tomorrow:".to_string()];
    for appt in due {
        lines.push(format!("- {} (Phone: {}) on {}", appt.name, appt.phone, appt.date));
    }
    lines.join("\n")
}

/// Check the book and fire an OS notification when anything is due
/// tomorrow. A failed notification falls back to the log.
pub fn check_on_launch<R: tauri::Runtime>(app: &tauri::AppHandle<R>, book: &AppointmentBook) {
    let due = book.due_tomorrow(Local::now().date_naive());
    if due.is_empty() {
        return;
    }
    let body = reminder_body(&due);
    match app
        .notification()
        .builder()
        .title("Appointment Reminder")
        .body(&body)
        .show()
    {
        Ok(()) => log::info!("Reminder shown for {} appointment(s)", due.len()),
        Err(e) => {
            log::warn!("Could not show appointment reminder: {}", e);
            log::info!("{}", body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_lists_each_due_appointment() {
        let due = vec![
            Appointment {
                name: "Asha Patel".to_string(),
                phone: "123456".to_string(),
                date: "2026-03-11".to_string(),
            },
            Appointment {
                name: "Ravi Kumar".to_string(),
                phone: "654321".to_string(),
                date: "2026-03-11".to_string(),
            },
        ];
        let body = reminder_body(&due);
        assert_eq!(
            body,
            "Appointments due tomorrow:\n\
             - Asha Patel (Phone: 123456) on 2026-03-11\n\
             - Ravi Kumar (Phone: 654321) on 2026-03-11"
        );
    }
}
