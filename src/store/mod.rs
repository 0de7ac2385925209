//! The data-owning ledger store: mutations, derived queries, demo seed.

pub mod ledger_store;
pub mod queries;
pub mod seed;

pub use ledger_store::{LedgerStore, SkipReason, StoreOutcome};
pub use queries::{DebtFilter, SortOrder, TagBreakdown, TopPerson, NO_TAG};
