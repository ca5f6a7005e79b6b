//! Bill and prescription rendering.
//!
//! Pure functions over a `Patient` and an injected timestamp, so output
//! is fully deterministic under test. Both documents are 60-column
//! fixed-width text blocks.

use crate::models::{Patient, PatientType};
use chrono::{DateTime, Local};

pub const LINE_WIDTH: usize = 60;
const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %I:%M %p";

fn rule(ch: char) -> String {
    ch.to_string().repeat(LINE_WIDTH)
}

fn centered(text: &str) -> String {
    format!("{:^width$}", text, width = LINE_WIDTH)
}

/// Render the bill block.
///
/// Line prices print as integers; subtotal, discount and total carry
/// two decimals. The discount section appears only for a VIP patient
/// with a non-zero discount.
pub fn render_bill(patient: &Patient, clinic_name: &str, now: DateTime<Local>) -> String {
    let timestamp = now.format(TIMESTAMP_FORMAT).to_string();

    let mut lines = Vec::new();
    lines.push(rule('='));
    lines.push(centered(&format!(" {} ", clinic_name)));
    lines.push(rule('='));
    lines.push(format!("Patient Name : {}", patient.name));
    lines.push(format!("Phone Number : {}", patient.phone));
    lines.push(format!("Patient Type : {}", patient.patient_type));
    lines.push(format!("Date & Time  : {}", timestamp));
    lines.push(rule('-'));
    lines.push(format!("{:<35}{:>20}", "Treatment", "Cost (Rs.)"));
    lines.push(rule('-'));

    let mut total: i64 = 0;
    for line in &patient.treatments {
        lines.push(format!("{:<35}{:>20}", line.name, line.price));
        total += line.price;
    }

    let discount = if patient.patient_type == PatientType::Vip {
        total as f64 * (patient.vip_discount as f64 / 100.0)
    } else {
        0.0
    };
    let amount_due = total as f64 - discount;

    lines.push(rule('-'));
    if discount > 0.0 {
        lines.push(format!("{:<35}{:>20.2}", "Subtotal", total as f64));
        lines.push(format!(
            "{:<35}{:>20.2}",
            format!("VIP Discount ({}%)", patient.vip_discount),
            -discount
        ));
    }
    lines.push(format!("{:<35}{:>20.2}", "Total Bill", amount_due));
    lines.push(rule('='));
    lines.push(centered("Thank you for choosing our clinic!"));
    lines.push(rule('='));

    lines.join("\n")
}

/// Render the prescription block. Blank prescription text (after
/// trimming) falls back to a fixed notice line.
pub fn render_prescription(patient: &Patient, now: DateTime<Local>) -> String {
    let timestamp = now.format(TIMESTAMP_FORMAT).to_string();

    let mut lines = Vec::new();
    lines.push(rule('='));
    lines.push(centered(" Prescription "));
    lines.push(rule('='));
    lines.push(format!("Patient Name : {}", patient.name));
    lines.push(format!("Phone Number : {}", patient.phone));
    lines.push(format!("Date & Time  : {}", timestamp));
    lines.push(rule('-'));
    if patient.prescription.trim().is_empty() {
        lines.push("No prescription provided.".to_string());
    } else {
        lines.push(patient.prescription.clone());
    }
    lines.push(rule('='));

    lines.join("\n")
}
