use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::utils::paths::{app_data_dir, ensure_dir, write_atomic};

use super::{Result, StorageBackend, StoreSnapshot};

const DEBTS_FILE: &str = "debts.json";
const PEOPLE_FILE: &str = "people.json";
const TEMPLATES_FILE: &str = "templates.json";

/// JSON-file backend keeping each collection in its own keyed file.
///
/// Records decode independently: a corrupt debts file does not discard
/// people or templates.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    fn write_record<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(items)?;
        write_atomic(&self.record_path(file), &json)
    }

    fn read_record<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        let path = self.record_path(file);
        if !path.exists() {
            return Vec::new();
        }
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(file, %err, "failed to read record, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&data) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(file, %err, "failed to decode record, treating as empty");
                Vec::new()
            }
        }
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        self.write_record(DEBTS_FILE, &snapshot.debts)?;
        self.write_record(PEOPLE_FILE, &snapshot.people)?;
        self.write_record(TEMPLATES_FILE, &snapshot.templates)?;
        Ok(())
    }

    fn load(&self) -> Result<StoreSnapshot> {
        Ok(StoreSnapshot {
            debts: self.read_record(DEBTS_FILE),
            people: self.read_record(PEOPLE_FILE),
            templates: self.read_record(TEMPLATES_FILE),
        })
    }
}
