//! Text output: print hand-off, per-day record copies, explicit saves.
//!
//! Printing writes the combined document to a throwaway `.txt` file and
//! hands it to the platform's default print mechanism. The file is
//! removed a fixed delay later by the caller; a hung or missing printer
//! tool is not detected beyond the spawn error.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// Delay before the printed temp file is deleted.
pub const CLEANUP_DELAY: Duration = Duration::from_secs(5);

/// Write `text` to a kept temp file and return its path.
pub fn write_temp(text: &str) -> AppResult<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix("bill_prescription_")
        .suffix(".txt")
        .tempfile()?;
    file.write_all(text.as_bytes())?;
    let (_, path) = file.keep().map_err(|e| AppError::Io(e.error))?;
    Ok(path)
}

#[cfg(target_os = "windows")]
fn print_command(path: &Path) -> Command {
    let mut cmd = Command::new("powershell");
    cmd.args(["-NoProfile", "-Command"]).arg(format!(
        "Start-Process -FilePath \"{}\" -Verb Print",
        path.display()
    ));
    cmd
}

#[cfg(not(target_os = "windows"))]
fn print_command(path: &Path) -> Command {
    let mut cmd = Command::new("lp");
    cmd.arg(path);
    cmd
}

/// Hand the file to the default printer. The exit status of the print
/// tool is not inspected, matching a plain `lp` hand-off; only a failed
/// spawn surfaces as an error.
pub fn dispatch_print(path: &Path) -> AppResult<()> {
    print_command(path).status()?;
    log::info!("Document sent to printer: {}", path.display());
    Ok(())
}

/// Keep alphanumerics, spaces and underscores; drop everything else and
/// trim trailing whitespace.
pub fn sanitize_patient_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_')
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Write the combined text into `records/<date>/<name>_<HHMMSS>.txt`.
/// Callers treat failure as non-fatal.
pub fn save_record(
    records_dir: &Path,
    patient_name: &str,
    text: &str,
    now: DateTime<Local>,
) -> AppResult<PathBuf> {
    let day_dir = records_dir.join(now.format("%Y-%m-%d").to_string());
    std::fs::create_dir_all(&day_dir)?;
    let filename = format!(
        "{}_{}.txt",
        sanitize_patient_name(patient_name),
        now.format("%H%M%S")
    );
    let path = day_dir.join(filename);
    std::fs::write(&path, text)?;
    Ok(path)
}

/// Write the combined text into `txt/bill_prescription_<stamp>.txt` on
/// explicit user request. Failure is surfaced.
pub fn save_export(txt_dir: &Path, text: &str, now: DateTime<Local>) -> AppResult<PathBuf> {
    std::fs::create_dir_all(txt_dir)?;
    let filename = format!("bill_prescription_{}.txt", now.format("%Y%m%d_%H%M%S"));
    let path = txt_dir.join(filename);
    std::fs::write(&path, text)?;
    log::info!("Bill and prescription saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 10, 14, 30, 5).unwrap()
    }

    #[test]
    fn write_temp_persists_content() {
        let path = write_temp("bill text").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "bill text");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("txt"));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn sanitize_keeps_letters_digits_spaces_underscores() {
        assert_eq!(sanitize_patient_name("Asha Patel"), "Asha Patel");
        assert_eq!(sanitize_patient_name("A/B:C*D?"), "ABCD");
        assert_eq!(sanitize_patient_name("ravi_k 2"), "ravi_k 2");
        assert_eq!(sanitize_patient_name("Asha  "), "Asha");
    }

    #[test]
    fn save_record_builds_dated_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = save_record(tmp.path(), "Asha/Patel", "combined", fixed_now()).unwrap();

        assert_eq!(
            path,
            tmp.path().join("2026-03-10").join("AshaPatel_143005.txt")
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "combined");
    }

    #[test]
    fn save_export_builds_stamped_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path = save_export(tmp.path(), "combined", fixed_now()).unwrap();

        assert_eq!(
            path,
            tmp.path().join("bill_prescription_20260310_143005.txt")
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "combined");
    }
}
