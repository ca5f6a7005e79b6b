//! Appointment book: a flat JSON array of (name, phone, date) records.
//!
//! Every operation is a full-file read-modify-write. Reads are lenient
//! (missing or corrupt file means an empty book), writes rewrite the
//! whole array. There is no uniqueness: duplicate records may coexist,
//! and delete/edit act on the first match in file order.

use crate::error::{AppError, AppResult};
use crate::models::Appointment;
use chrono::NaiveDate;
use std::path::PathBuf;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct AppointmentBook {
    path: PathBuf,
}

impl AppointmentBook {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the stored list. Unreadable or malformed content degrades
    /// to an empty list.
    pub fn load(&self) -> Vec<Appointment> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str::<Vec<Appointment>>(&raw).ok())
            .unwrap_or_default()
    }

    /// Rewrite the whole appointment file.
    pub fn save(&self, appointments: &[Appointment]) -> AppResult<()> {
        let json = serde_json::to_string_pretty(appointments)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Append a new appointment after validating the fields.
    pub fn book(
        &self,
        name: &str,
        phone: &str,
        date: &str,
        today: NaiveDate,
    ) -> AppResult<Appointment> {
        let name = name.trim();
        let phone = phone.trim();
        let date = date.trim();
        if name.is_empty() || phone.is_empty() || date.is_empty() {
            return Err(AppError::validation("Please fill all fields."));
        }
        let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| AppError::validation("Invalid date format. Use YYYY-MM-DD."))?;
        if parsed < today {
            return Err(AppError::validation(
                "Appointment date cannot be in the past.",
            ));
        }

        let appointment = Appointment {
            name: name.to_string(),
            phone: phone.to_string(),
            date: date.to_string(),
        };
        let mut all = self.load();
        all.push(appointment.clone());
        self.save(&all)?;
        log::info!("Booked appointment for {} on {}", appointment.name, appointment.date);
        Ok(appointment)
    }

    /// Stored records dated today or later, sorted ascending by date
    /// string (ISO order is chronological order). Records whose date
    /// does not parse are skipped.
    pub fn upcoming(&self, today: NaiveDate) -> Vec<Appointment> {
        let mut upcoming: Vec<Appointment> = self
            .load()
            .into_iter()
            .filter(|a| {
                NaiveDate::parse_from_str(&a.date, DATE_FORMAT)
                    .map(|d| d >= today)
                    .unwrap_or(false)
            })
            .collect();
        upcoming.sort_by(|a, b| a.date.cmp(&b.date));
        upcoming
    }

    /// Remove the first record equal to `target` on all three fields.
    /// No match leaves the stored list unchanged.
    pub fn delete(&self, target: &Appointment) -> AppResult<()> {
        let mut all = self.load();
        if let Some(pos) = all.iter().position(|a| a == target) {
            all.remove(pos);
            log::info!("Deleted appointment for {} on {}", target.name, target.date);
        }
        self.save(&all)
    }

    /// Update an appointment's date and/or phone. `None` (or blank)
    /// keeps the current value; a new date is validated like `book`.
    ///
    /// The stored record is located by the first match on `name` only,
    /// so a patient with several appointments may have a different one
    /// replaced than the one picked in the list. When no record carries
    /// the name anymore, the updated record is appended instead.
    pub fn edit(
        &self,
        original: &Appointment,
        new_date: Option<&str>,
        new_phone: Option<&str>,
        today: NaiveDate,
    ) -> AppResult<Appointment> {
        let date = match new_date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(d) => {
                let parsed = NaiveDate::parse_from_str(d, DATE_FORMAT).map_err(|_| {
                    AppError::validation("Please enter a valid date in YYYY-MM-DD format.")
                })?;
                if parsed < today {
                    return Err(AppError::validation(
                        "Appointment date cannot be in the past.",
                    ));
                }
                d.to_string()
            }
            None => original.date.clone(),
        };
        let phone = match new_phone.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) => p.to_string(),
            None => original.phone.clone(),
        };

        let updated = Appointment {
            name: original.name.clone(),
            phone,
            date,
        };
        let mut all = self.load();
        match all.iter().position(|a| a.name == original.name) {
            Some(pos) => all[pos] = updated.clone(),
            None => all.push(updated.clone()),
        }
        self.save(&all)?;
        log::info!("Updated appointment for {}", updated.name);
        Ok(updated)
    }

    /// Records dated exactly tomorrow, for the launch reminder.
    pub fn due_tomorrow(&self, today: NaiveDate) -> Vec<Appointment> {
        let Some(tomorrow) = today.succ_opt() else {
            return Vec::new();
        };
        let tomorrow = tomorrow.format(DATE_FORMAT).to_string();
        self.load()
            .into_iter()
            .filter(|a| a.date == tomorrow)
            .collect()
    }
}

/// Case-insensitive substring filter on name, or substring match on
/// phone. An empty query returns the input unchanged.
pub fn search(query: &str, appointments: &[Appointment]) -> Vec<Appointment> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return appointments.to_vec();
    }
    appointments
        .iter()
        .filter(|a| a.name.to_lowercase().contains(&query) || a.phone.contains(&query))
        .cloned()
        .collect()
}
