//! Domain entities for the debt ledger.

pub mod common;
pub mod debt;
pub mod period;
pub mod person;
pub mod template;

pub use common::{Displayable, Identifiable, NamedEntity};
pub use debt::{Debt, DebtDirection, DebtStatus};
pub use period::StatsPeriod;
pub use person::Person;
pub use template::DebtTemplate;
