//! Domain models for individual debts and their repayment lifecycle.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::template::DebtTemplate;

pub const DEFAULT_CURRENCY: &str = "₽";

/// A single owed amount tied to a person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Debt {
    pub id: Uuid,
    pub person_id: Uuid,
    pub person_name: String,
    pub direction: DebtDirection,
    pub amount: f64,
    pub remaining_amount: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub status: DebtStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Debt {
    pub fn new(
        person_id: Uuid,
        person_name: impl Into<String>,
        direction: DebtDirection,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            person_id,
            person_name: person_name.into(),
            direction,
            amount,
            remaining_amount: amount,
            currency: DEFAULT_CURRENCY.into(),
            description: None,
            date,
            due_date: None,
            status: DebtStatus::Active,
            tags: Vec::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Creates a debt pre-filled from a template's direction, currency, and tags.
    pub fn from_template(
        template: &DebtTemplate,
        person_id: Uuid,
        person_name: impl Into<String>,
        amount: f64,
        date: DateTime<Utc>,
    ) -> Self {
        Self::new(person_id, person_name, template.direction, amount, date)
            .with_currency(template.currency.clone())
            .with_tags(template.tags.clone())
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// True while the debt still counts toward outstanding balances.
    pub fn is_outstanding(&self) -> bool {
        matches!(self.status, DebtStatus::Active | DebtStatus::PartiallyRepaid)
    }

    pub fn is_fully_repaid(&self) -> bool {
        self.remaining_amount == 0.0 || self.status == DebtStatus::Repaid
    }

    /// Fraction repaid so far, 0 when the original amount is not positive.
    pub fn progress(&self) -> f64 {
        if self.amount <= 0.0 {
            return 0.0;
        }
        (self.amount - self.remaining_amount) / self.amount
    }
}

impl Identifiable for Debt {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Debt {
    fn display_label(&self) -> String {
        format!(
            "{} {} {} [{}]",
            self.person_name, self.remaining_amount, self.currency, self.status
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Which party is the debtor.
pub enum DebtDirection {
    OwedToMe,
    IOwe,
}

impl fmt::Display for DebtDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DebtDirection::OwedToMe => "Owed to me",
            DebtDirection::IOwe => "I owe",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Enumerates the repayment lifecycle state of a debt.
pub enum DebtStatus {
    Active,
    PartiallyRepaid,
    Repaid,
    WrittenOff,
}

impl fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DebtStatus::Active => "Active",
            DebtStatus::PartiallyRepaid => "Partially repaid",
            DebtStatus::Repaid => "Repaid",
            DebtStatus::WrittenOff => "Written off",
        };
        f.write_str(label)
    }
}
