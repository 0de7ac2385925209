use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A counterparty the user lends to or borrows from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: None,
            email: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Uppercased first character of the name, used for avatar badges.
    pub fn avatar_letter(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_default()
    }
}

impl Identifiable for Person {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Person {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Person {
    fn display_label(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_letter_uppercases_first_char() {
        let person = Person::new("maria");
        assert_eq!(person.avatar_letter(), "M");
        assert_eq!(Person::new("").avatar_letter(), "");
    }
}
