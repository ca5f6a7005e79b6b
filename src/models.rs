use serde::{Deserialize, Serialize};
use std::fmt;

/// Clinic name printed in the bill header when no settings file exists yet.
pub const DEFAULT_CLINIC_NAME: &str = "Reimagine Hair Transplant & Skin Care Clinic";

/// Clinic identity shown on printed documents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicSettings {
    pub clinic_name: String,
    pub doctor_name: Option<String>,
    pub clinic_phone: Option<String>,
    pub clinic_address: Option<String>,
}

impl Default for ClinicSettings {
    fn default() -> Self {
        Self {
            clinic_name: DEFAULT_CLINIC_NAME.to_string(),
            doctor_name: None,
            clinic_phone: None,
            clinic_address: None,
        }
    }
}

/// Billing category of a patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientType {
    Normal,
    #[serde(rename = "VIP")]
    Vip,
}

impl Default for PatientType {
    fn default() -> Self {
        PatientType::Normal
    }
}

impl fmt::Display for PatientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientType::Normal => write!(f, "Normal"),
            PatientType::Vip => write!(f, "VIP"),
        }
    }
}

/// One bill line: a treatment picked for the current patient.
///
/// The price starts at the catalog price but is edited freely per bill;
/// the catalog itself is never touched by that edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedTreatment {
    pub name: String,
    pub price: i64,
}

/// Patient data for a single bill. Built fresh on every generate and
/// never persisted as an entity, only as rendered text.
#[derive(Debug, Clone)]
pub struct Patient {
    pub name: String,
    pub phone: String,
    pub patient_type: PatientType,
    pub vip_discount: i64,
    pub treatments: Vec<SelectedTreatment>,
    pub prescription: String,
}

/// Appointment record. Matched by field equality, so no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub name: String,
    pub phone: String,
    pub date: String, // YYYY-MM-DD
}

/// Rendered output of one generate action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDocuments {
    pub bill: String,
    pub prescription: String,
}

impl GeneratedDocuments {
    /// Bill and prescription as one printable document.
    pub fn combined(&self) -> String {
        format!("{}\n\n{}", self.bill, self.prescription)
    }
}
