#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use debt_core::config::AppConfig;
use debt_core::domain::{Debt, DebtDirection, Person};
use debt_core::reminder::{reminder_eligible, ReminderScheduler};
use debt_core::storage::{MemoryStorage, StoreSnapshot};
use debt_core::store::LedgerStore;

/// What the store told the reminder collaborator, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderEvent {
    Scheduled(Uuid),
    Cancelled(Uuid),
    ClearedAll,
}

/// Test double that records every reminder signal.
pub struct RecordingScheduler {
    pub enabled: bool,
    events: Rc<RefCell<Vec<ReminderEvent>>>,
}

impl RecordingScheduler {
    pub fn new(enabled: bool) -> (Self, Rc<RefCell<Vec<ReminderEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                enabled,
                events: Rc::clone(&events),
            },
            events,
        )
    }
}

impl ReminderScheduler for RecordingScheduler {
    fn schedule(&self, debt: &Debt) {
        if !self.enabled {
            return;
        }
        if reminder_eligible(debt) {
            self.events.borrow_mut().push(ReminderEvent::Scheduled(debt.id));
        } else {
            self.cancel(debt.id);
        }
    }

    fn cancel(&self, debt_id: Uuid) {
        self.events.borrow_mut().push(ReminderEvent::Cancelled(debt_id));
    }

    fn reschedule_all(&self, debts: &[Debt]) {
        self.events.borrow_mut().push(ReminderEvent::ClearedAll);
        if !self.enabled {
            return;
        }
        for debt in debts.iter().filter(|debt| reminder_eligible(debt)) {
            self.schedule(debt);
        }
    }
}

/// An empty store backed by in-memory storage, plus the persisted-snapshot
/// and reminder-event handles for assertions.
pub fn recording_store() -> (
    LedgerStore,
    Rc<RefCell<StoreSnapshot>>,
    Rc<RefCell<Vec<ReminderEvent>>>,
) {
    let storage = MemoryStorage::new();
    let snapshot = storage.handle();
    let (scheduler, events) = RecordingScheduler::new(true);
    let mut store = LedgerStore::new(Box::new(storage), Box::new(scheduler), AppConfig::default());
    store.reset_all_data();
    events.borrow_mut().clear();
    (store, snapshot, events)
}

/// An empty store with inert collaborators.
pub fn empty_store() -> LedgerStore {
    let mut store = LedgerStore::in_memory();
    store.reset_all_data();
    store
}

pub fn add_person(store: &mut LedgerStore, name: &str) -> Uuid {
    let person = Person::new(name);
    let id = person.id;
    assert!(store.add_person(person).applied(), "add person {name}");
    id
}

pub fn add_debt(
    store: &mut LedgerStore,
    person_id: Uuid,
    person_name: &str,
    direction: DebtDirection,
    amount: f64,
    date: DateTime<Utc>,
) -> Uuid {
    let debt = Debt::new(person_id, person_name, direction, amount, date);
    let id = debt.id;
    assert!(store.add_debt(debt).applied(), "add debt for {person_name}");
    id
}
