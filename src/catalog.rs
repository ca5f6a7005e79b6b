//! Treatment catalog: the clinic's name -> price list.
//!
//! Persisted as a single JSON object. Reads are lenient (a missing or
//! corrupt file starts an empty catalog), writes rewrite the whole file.

use crate::error::{AppError, AppResult};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub struct TreatmentCatalog {
    path: PathBuf,
    entries: BTreeMap<String, i64>,
}

impl TreatmentCatalog {
    /// Load the catalog from `path`. Never fails: unreadable or
    /// malformed content degrades to an empty catalog.
    pub fn load(path: PathBuf) -> Self {
        let entries = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<BTreeMap<String, i64>>(&raw).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    pub fn entries(&self) -> &BTreeMap<String, i64> {
        &self.entries
    }

    pub fn price_of(&self, name: &str) -> Option<i64> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Add a new treatment and persist the catalog.
    pub fn add(&mut self, name: &str, price: i64) -> AppResult<()> {
        if self.entries.contains_key(name) {
            return Err(AppError::DuplicateTreatment(name.to_string()));
        }
        if price < 1 {
            return Err(AppError::InvalidPrice(price));
        }
        self.entries.insert(name.to_string(), price);
        self.save()
    }

    /// Remove every listed treatment that exists; unknown names are
    /// ignored. Persists once afterwards.
    pub fn remove(&mut self, names: &[String]) -> AppResult<()> {
        for name in names {
            self.entries.remove(name);
        }
        self.save()
    }

    /// Rewrite the whole catalog file.
    pub fn save(&self) -> AppResult<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
