//! Built-in demo data shown on first run, before any real state exists.

use chrono::{Duration, Utc};

use crate::domain::{Debt, DebtDirection, DebtStatus, Person};
use crate::storage::StoreSnapshot;

/// Three people and three debts mirroring a small, lived-in ledger.
pub fn demo_snapshot() -> StoreSnapshot {
    let now = Utc::now();
    let alex = Person::new("Alex");
    let maria = Person::new("Maria");
    let dmitry = Person::new("Dmitry");

    let lunch = Debt::new(
        alex.id,
        alex.name.clone(),
        DebtDirection::OwedToMe,
        5000.0,
        now - Duration::days(7),
    )
    .with_description("Lunch")
    .with_due_date(now + Duration::days(7))
    .with_tags(vec!["food".into(), "friends".into()]);

    let tickets = Debt::new(
        maria.id,
        maria.name.clone(),
        DebtDirection::IOwe,
        3000.0,
        now - Duration::days(14),
    )
    .with_description("Tickets")
    .with_tags(vec!["entertainment".into()]);

    let mut coffee = Debt::new(
        dmitry.id,
        dmitry.name.clone(),
        DebtDirection::OwedToMe,
        2000.0,
        now - Duration::days(30),
    )
    .with_description("Coffee")
    .with_tags(vec!["food".into()]);
    coffee.remaining_amount = 0.0;
    coffee.status = DebtStatus::Repaid;

    StoreSnapshot {
        debts: vec![lunch, tickets, coffee],
        people: vec![alex, maria, dmitry],
        templates: Vec::new(),
    }
}
