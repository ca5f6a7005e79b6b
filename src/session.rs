//! Billing session: the in-progress patient selection and its
//! Idle -> Editing -> Generated lifecycle.
//!
//! The selection is plain data; the webview rebuilds its rows from it
//! after every change. Patient identity arrives with the generate call
//! and lives only inside the rendered documents.

use crate::billing;
use crate::catalog::TreatmentCatalog;
use crate::error::{AppError, AppResult};
use crate::models::{GeneratedDocuments, Patient, PatientType, SelectedTreatment};
use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+\d][\d\s\-+()]{5,}$").expect("phone pattern"));

/// Loose plausibility check for phone numbers. The GUI warns on a
/// mismatch but may proceed anyway, so this is never a hard failure.
pub fn phone_looks_valid(phone: &str) -> bool {
    PHONE_RE.is_match(phone.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    Idle,
    Editing,
    Generated,
}

#[derive(Default)]
pub struct BillingSession {
    selected: Vec<SelectedTreatment>,
    documents: Option<GeneratedDocuments>,
}

impl BillingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.documents.is_some() {
            SessionPhase::Generated
        } else if self.selected.is_empty() {
            SessionPhase::Idle
        } else {
            SessionPhase::Editing
        }
    }

    pub fn selected(&self) -> &[SelectedTreatment] {
        &self.selected
    }

    /// Add catalog treatments to the selection. Names already selected
    /// are skipped; names missing from the catalog default to price 0.
    pub fn select(&mut self, names: &[String], catalog: &TreatmentCatalog) {
        for name in names {
            if self.selected.iter().any(|line| &line.name == name) {
                continue;
            }
            self.selected.push(SelectedTreatment {
                name: name.clone(),
                price: catalog.price_of(name).unwrap_or(0),
            });
        }
    }

    /// Override the price of one selected line. The catalog keeps its
    /// own price.
    pub fn set_line_price(&mut self, name: &str, price: i64) -> AppResult<()> {
        match self.selected.iter_mut().find(|line| line.name == name) {
            Some(line) => {
                line.price = price;
                Ok(())
            }
            None => Err(AppError::validation(format!("{} is not selected.", name))),
        }
    }

    /// Drop selected lines by name (used when catalog entries go away).
    pub fn drop_lines(&mut self, names: &[String]) {
        self.selected.retain(|line| !names.contains(&line.name));
    }

    /// Validate the patient input, render both documents and move to
    /// `Generated`. On failure nothing changes and the selection stays.
    #[allow(clippy::too_many_arguments)]
    pub fn generate(
        &mut self,
        name: &str,
        phone: &str,
        patient_type: PatientType,
        vip_discount: i64,
        prescription: &str,
        clinic_name: &str,
        now: DateTime<Local>,
    ) -> AppResult<GeneratedDocuments> {
        let name = name.trim();
        let phone = phone.trim();
        if name.is_empty() || phone.is_empty() {
            return Err(AppError::validation(
                "Please enter patient name and phone number.",
            ));
        }
        if self.selected.is_empty() {
            return Err(AppError::validation("Please select at least one treatment."));
        }
        if patient_type == PatientType::Vip && !(0..=100).contains(&vip_discount) {
            return Err(AppError::validation(
                "VIP discount must be between 0 and 100.",
            ));
        }
        let vip_discount = if patient_type == PatientType::Vip {
            vip_discount
        } else {
            0
        };

        let patient = Patient {
            name: name.to_string(),
            phone: phone.to_string(),
            patient_type,
            vip_discount,
            treatments: std::mem::take(&mut self.selected),
            prescription: prescription.trim().to_string(),
        };

        let documents = GeneratedDocuments {
            bill: billing::render_bill(&patient, clinic_name, now),
            prescription: billing::render_prescription(&patient, now),
        };
        self.documents = Some(documents.clone());
        log::info!("Generated bill and prescription for {}", patient.name);
        Ok(documents)
    }

    /// The documents of the last generate, or `NotGenerated`.
    pub fn documents(&self) -> AppResult<&GeneratedDocuments> {
        self.documents.as_ref().ok_or(AppError::NotGenerated)
    }

    /// Bill and prescription as one printable text.
    pub fn combined_text(&self) -> AppResult<String> {
        Ok(self.documents()?.combined())
    }

    /// Clear everything and return to `Idle`.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.documents = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CLINIC_NAME;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 10, 14, 30, 0).unwrap()
    }

    fn catalog() -> TreatmentCatalog {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = TreatmentCatalog::load(dir.path().join("treatments.json"));
        catalog.add("Hair Transplant", 100).unwrap();
        catalog.add("PRP Therapy", 250).unwrap();
        catalog
    }

    fn session_with_selection() -> BillingSession {
        let mut session = BillingSession::new();
        session.select(
            &["Hair Transplant".to_string(), "PRP Therapy".to_string()],
            &catalog(),
        );
        session
    }

    fn generate_ok(session: &mut BillingSession) -> GeneratedDocuments {
        session
            .generate(
                "Asha Patel",
                "123456",
                PatientType::Normal,
                10,
                "",
                DEFAULT_CLINIC_NAME,
                fixed_now(),
            )
            .unwrap()
    }

    #[test]
    fn select_uses_catalog_price_and_dedups() {
        let mut session = BillingSession::new();
        let catalog = catalog();
        session.select(&["Hair Transplant".to_string()], &catalog);
        session.select(
            &["Hair Transplant".to_string(), "Unknown".to_string()],
            &catalog,
        );

        assert_eq!(
            session.selected(),
            &[
                SelectedTreatment {
                    name: "Hair Transplant".to_string(),
                    price: 100
                },
                SelectedTreatment {
                    name: "Unknown".to_string(),
                    price: 0
                },
            ]
        );
    }

    #[test]
    fn set_line_price_overrides_only_the_line() {
        let mut session = session_with_selection();
        session.set_line_price("PRP Therapy", 300).unwrap();
        assert_eq!(session.selected()[1].price, 300);

        assert!(session.set_line_price("Botox", 1).is_err());
    }

    #[test]
    fn drop_lines_removes_matching_names() {
        let mut session = session_with_selection();
        session.drop_lines(&["Hair Transplant".to_string()]);
        assert_eq!(session.selected().len(), 1);
        assert_eq!(session.selected()[0].name, "PRP Therapy");
    }

    #[test]
    fn phase_progression() {
        let mut session = BillingSession::new();
        assert_eq!(session.phase(), SessionPhase::Idle);

        session.select(&["Hair Transplant".to_string()], &catalog());
        assert_eq!(session.phase(), SessionPhase::Editing);

        generate_ok(&mut session);
        assert_eq!(session.phase(), SessionPhase::Generated);

        session.reset();
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn generate_requires_name_and_phone() {
        let mut session = session_with_selection();
        let err = session
            .generate(
                " ",
                "123456",
                PatientType::Normal,
                0,
                "",
                DEFAULT_CLINIC_NAME,
                fixed_now(),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // Failure leaves the selection in place.
        assert_eq!(session.selected().len(), 2);
        assert_eq!(session.phase(), SessionPhase::Editing);
    }

    #[test]
    fn generate_requires_a_selection() {
        let mut session = BillingSession::new();
        let err = session
            .generate(
                "Asha Patel",
                "123456",
                PatientType::Normal,
                0,
                "",
                DEFAULT_CLINIC_NAME,
                fixed_now(),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn generate_rejects_out_of_range_vip_discount() {
        for discount in [-1, 101] {
            let mut session = session_with_selection();
            let err = session
                .generate(
                    "Asha Patel",
                    "123456",
                    PatientType::Vip,
                    discount,
                    "",
                    DEFAULT_CLINIC_NAME,
                    fixed_now(),
                )
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
            assert_eq!(session.phase(), SessionPhase::Editing);
        }
    }

    #[test]
    fn generate_ignores_discount_for_normal_patients() {
        let mut session = session_with_selection();
        let docs = session
            .generate(
                "Asha Patel",
                "123456",
                PatientType::Normal,
                // Out of range, but irrelevant for a Normal patient.
                250,
                "",
                DEFAULT_CLINIC_NAME,
                fixed_now(),
            )
            .unwrap();
        assert!(!docs.bill.contains("VIP Discount"));
    }

    #[test]
    fn generate_consumes_selection() {
        let mut session = session_with_selection();
        generate_ok(&mut session);
        assert!(session.selected().is_empty());
    }

    #[test]
    fn documents_before_generate_fail() {
        let session = BillingSession::new();
        assert!(matches!(session.documents(), Err(AppError::NotGenerated)));
        assert!(matches!(
            session.combined_text(),
            Err(AppError::NotGenerated)
        ));
    }

    #[test]
    fn combined_text_joins_bill_and_prescription() {
        let mut session = session_with_selection();
        let docs = generate_ok(&mut session);
        let combined = session.combined_text().unwrap();
        assert_eq!(combined, format!("{}\n\n{}", docs.bill, docs.prescription));
    }

    #[test]
    fn reset_discards_generated_documents() {
        let mut session = session_with_selection();
        generate_ok(&mut session);
        session.reset();
        assert!(matches!(session.documents(), Err(AppError::NotGenerated)));
    }

    #[test]
    fn phone_plausibility() {
        assert!(phone_looks_valid("+91 98765 43210"));
        assert!(phone_looks_valid("022-555-0199"));
        assert!(phone_looks_valid("123456"));
        assert!(!phone_looks_valid("abcdef"));
        assert!(!phone_looks_valid("12345"));
        assert!(!phone_looks_valid(""));
    }
}
