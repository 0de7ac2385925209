//! Global user settings: default currency and the reminders toggle.
//!
//! Settings are deliberately not part of the ledger state; the store
//! receives an [`AppConfig`] for debt-creation defaults and the reminder
//! scheduler receives the enabled flag.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::LedgerError;
use crate::utils::paths::{app_data_dir, ensure_dir, write_atomic};

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub currency: String,
    #[serde(default)]
    pub reminders_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: crate::domain::debt::DEFAULT_CURRENCY.into(),
            reminders_enabled: false,
        }
    }
}

/// Loads and saves the configuration file under the data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<AppConfig, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(AppConfig::default())
        }
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
