//! Persistence adapters for the ledger collections.

pub mod json_backend;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::domain::{Debt, DebtTemplate, Person};
use crate::errors::LedgerError;

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Full persisted state: the three independently keyed collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub templates: Vec<DebtTemplate>,
}

impl StoreSnapshot {
    pub fn is_empty(&self) -> bool {
        self.debts.is_empty() && self.people.is_empty() && self.templates.is_empty()
    }
}

/// Trait that abstracts interaction with the persistence layer.
///
/// Implementations are best-effort collaborators: the store calls `save`
/// after every mutation and `load` once at startup, and tolerates failure.
pub trait StorageBackend {
    fn save(&self, snapshot: &StoreSnapshot) -> Result<()>;
    fn load(&self) -> Result<StoreSnapshot>;
}
