use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::debt::{DebtDirection, DEFAULT_CURRENCY};

/// A reusable preset for fast debt creation. Templates are never consumed
/// by use, only removed by explicit deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebtTemplate {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_name: Option<String>,
    pub direction: DebtDirection,
    pub currency: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl DebtTemplate {
    pub fn new(name: impl Into<String>, direction: DebtDirection) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            person_name: None,
            direction,
            currency: DEFAULT_CURRENCY.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_person_name(mut self, person_name: impl Into<String>) -> Self {
        self.person_name = Some(person_name.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

impl Identifiable for DebtTemplate {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for DebtTemplate {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for DebtTemplate {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.direction)
    }
}
