use chrono::Utc;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::domain::{Debt, DebtDirection, DebtStatus, DebtTemplate, Displayable, Identifiable, Person};
use crate::reminder::{NullReminderScheduler, ReminderScheduler};
use crate::storage::{MemoryStorage, StorageBackend, StoreSnapshot};

use super::seed;

/// Result of a mutation. `Applied` means the change was persisted and the
/// reminder collaborator was signalled; `Unchanged` means zero observable
/// mutation took place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Applied,
    Unchanged(SkipReason),
}

impl StoreOutcome {
    pub fn applied(self) -> bool {
        matches!(self, StoreOutcome::Applied)
    }
}

/// Why a mutation was skipped. Skips are expected outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnknownId,
    DuplicateId,
    EmptyName,
    NegativeAmount,
    NonPositiveAmount,
    NonPositiveRepayment,
}

/// Owns the debt, person, and template collections and keeps derived state
/// consistent: every applied mutation persists synchronously and signals
/// the reminder scheduler.
pub struct LedgerStore {
    pub(super) debts: Vec<Debt>,
    pub(super) people: Vec<Person>,
    pub(super) templates: Vec<DebtTemplate>,
    storage: Box<dyn StorageBackend>,
    reminders: Box<dyn ReminderScheduler>,
    config: AppConfig,
    revision: u64,
}

impl LedgerStore {
    /// Loads persisted state (best-effort: a failed load starts empty),
    /// seeds demo data on a first run, and reschedules reminders.
    pub fn new(
        storage: Box<dyn StorageBackend>,
        reminders: Box<dyn ReminderScheduler>,
        config: AppConfig,
    ) -> Self {
        let snapshot = match storage.load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(%err, "failed to load ledger state, starting empty");
                StoreSnapshot::default()
            }
        };
        let mut store = Self {
            debts: snapshot.debts,
            people: snapshot.people,
            templates: snapshot.templates,
            storage,
            reminders,
            config,
            revision: 0,
        };
        if store.debts.is_empty() && store.people.is_empty() {
            // First run: only written back on the first real mutation.
            let demo = seed::demo_snapshot();
            tracing::info!(
                people = demo.people.len(),
                debts = demo.debts.len(),
                "seeding demo data"
            );
            store.debts = demo.debts;
            store.people = demo.people;
        }
        store.reminders.reschedule_all(&store.debts);
        store
    }

    /// Store backed by in-memory storage and no reminders.
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(MemoryStorage::new()),
            Box::new(NullReminderScheduler),
            AppConfig::default(),
        )
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn templates(&self) -> &[DebtTemplate] {
        &self.templates
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Monotonic change counter; bumps on every applied mutation. The
    /// presentation layer re-queries when it observes a new value.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn person(&self, id: Uuid) -> Option<&Person> {
        self.people.iter().find(|person| person.id == id)
    }

    pub fn debt(&self, id: Uuid) -> Option<&Debt> {
        self.debts.iter().find(|debt| debt.id == id)
    }

    pub fn template(&self, id: Uuid) -> Option<&DebtTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    // People

    pub fn add_person(&mut self, person: Person) -> StoreOutcome {
        if person.name.trim().is_empty() {
            return StoreOutcome::Unchanged(SkipReason::EmptyName);
        }
        if contains_id(&self.people, person.id) {
            return StoreOutcome::Unchanged(SkipReason::DuplicateId);
        }
        tracing::debug!(person = %person.display_label(), "adding person");
        self.people.push(person);
        self.persist();
        StoreOutcome::Applied
    }

    /// Replaces a person by id and fans the new name out to every debt's
    /// denormalized `person_name`.
    pub fn update_person(&mut self, person: Person) -> StoreOutcome {
        if person.name.trim().is_empty() {
            return StoreOutcome::Unchanged(SkipReason::EmptyName);
        }
        let id = person.id;
        let name = person.name.clone();
        if !replace_by_id(&mut self.people, person) {
            return StoreOutcome::Unchanged(SkipReason::UnknownId);
        }
        for debt in self.debts.iter_mut().filter(|debt| debt.person_id == id) {
            debt.person_name = name.clone();
        }
        self.persist();
        StoreOutcome::Applied
    }

    /// Removes the person and cascades to every debt referencing them.
    pub fn delete_person(&mut self, id: Uuid) -> StoreOutcome {
        if !remove_by_id(&mut self.people, id) {
            return StoreOutcome::Unchanged(SkipReason::UnknownId);
        }
        let cascaded: Vec<Uuid> = self
            .debts
            .iter()
            .filter(|debt| debt.person_id == id)
            .map(|debt| debt.id)
            .collect();
        for debt_id in &cascaded {
            self.reminders.cancel(*debt_id);
        }
        self.debts.retain(|debt| debt.person_id != id);
        tracing::debug!(person = %id, cascaded = cascaded.len(), "deleted person");
        self.persist();
        StoreOutcome::Applied
    }

    // Debts

    pub fn add_debt(&mut self, debt: Debt) -> StoreOutcome {
        if debt.amount < 0.0 {
            return StoreOutcome::Unchanged(SkipReason::NegativeAmount);
        }
        if contains_id(&self.debts, debt.id) {
            return StoreOutcome::Unchanged(SkipReason::DuplicateId);
        }
        tracing::debug!(debt = %debt.display_label(), "adding debt");
        self.debts.push(debt);
        self.persist();
        if let Some(debt) = self.debts.last() {
            self.reminders.schedule(debt);
        }
        StoreOutcome::Applied
    }

    /// Whole-record replace by id. Edits bypass the repayment state machine
    /// entirely; this is the escape hatch for correcting mistakes.
    pub fn update_debt(&mut self, debt: Debt) -> StoreOutcome {
        if debt.amount < 0.0 {
            return StoreOutcome::Unchanged(SkipReason::NegativeAmount);
        }
        let updated = debt.clone();
        if !replace_by_id(&mut self.debts, debt) {
            return StoreOutcome::Unchanged(SkipReason::UnknownId);
        }
        self.persist();
        self.reminders.schedule(&updated);
        StoreOutcome::Applied
    }

    pub fn delete_debt(&mut self, id: Uuid) -> StoreOutcome {
        self.reminders.cancel(id);
        if !remove_by_id(&mut self.debts, id) {
            return StoreOutcome::Unchanged(SkipReason::UnknownId);
        }
        self.persist();
        StoreOutcome::Applied
    }

    /// Applies a repayment. Without an amount, or with an amount covering
    /// the remaining balance, the debt becomes `Repaid`; a smaller positive
    /// amount reduces the balance and marks it `PartiallyRepaid`.
    /// Non-positive amounts are rejected with no mutation.
    pub fn mark_as_repaid(&mut self, id: Uuid, amount: Option<f64>) -> StoreOutcome {
        let Some(debt) = self.debts.iter_mut().find(|debt| debt.id == id) else {
            return StoreOutcome::Unchanged(SkipReason::UnknownId);
        };
        match amount {
            Some(repayment) if repayment <= 0.0 => {
                return StoreOutcome::Unchanged(SkipReason::NonPositiveRepayment);
            }
            Some(repayment) if repayment < debt.remaining_amount => {
                debt.remaining_amount -= repayment;
                debt.status = DebtStatus::PartiallyRepaid;
            }
            _ => {
                debt.remaining_amount = 0.0;
                debt.status = DebtStatus::Repaid;
            }
        }
        self.persist();
        self.reminders.cancel(id);
        StoreOutcome::Applied
    }

    /// Quick entry: reuses an existing person whose trimmed name matches,
    /// otherwise creates one, then records the debt with the configured
    /// default currency and today's date.
    pub fn quick_add_debt(
        &mut self,
        person_name: &str,
        direction: DebtDirection,
        amount: f64,
    ) -> StoreOutcome {
        let trimmed = person_name.trim();
        if trimmed.is_empty() {
            return StoreOutcome::Unchanged(SkipReason::EmptyName);
        }
        if amount <= 0.0 {
            return StoreOutcome::Unchanged(SkipReason::NonPositiveAmount);
        }
        let (person_id, person_name) = match self
            .people
            .iter()
            .find(|person| person.name.trim() == trimmed)
        {
            Some(person) => (person.id, person.name.clone()),
            None => {
                let person = Person::new(trimmed);
                let id = person.id;
                let name = person.name.clone();
                self.add_person(person);
                (id, name)
            }
        };
        let debt = Debt::new(person_id, person_name, direction, amount, Utc::now())
            .with_currency(self.config.currency.clone());
        self.add_debt(debt)
    }

    // Templates

    pub fn add_template(&mut self, template: DebtTemplate) -> StoreOutcome {
        if contains_id(&self.templates, template.id) {
            return StoreOutcome::Unchanged(SkipReason::DuplicateId);
        }
        self.templates.push(template);
        self.persist();
        StoreOutcome::Applied
    }

    pub fn update_template(&mut self, template: DebtTemplate) -> StoreOutcome {
        if !replace_by_id(&mut self.templates, template) {
            return StoreOutcome::Unchanged(SkipReason::UnknownId);
        }
        self.persist();
        StoreOutcome::Applied
    }

    pub fn delete_template(&mut self, id: Uuid) -> StoreOutcome {
        if !remove_by_id(&mut self.templates, id) {
            return StoreOutcome::Unchanged(SkipReason::UnknownId);
        }
        self.persist();
        StoreOutcome::Applied
    }

    /// Clears all three collections, cancels every reminder, and persists
    /// the empty state.
    pub fn reset_all_data(&mut self) -> StoreOutcome {
        self.reminders.reschedule_all(&[]);
        self.debts.clear();
        self.people.clear();
        self.templates.clear();
        self.persist();
        StoreOutcome::Applied
    }

    fn persist(&mut self) {
        self.revision += 1;
        let snapshot = StoreSnapshot {
            debts: self.debts.clone(),
            people: self.people.clone(),
            templates: self.templates.clone(),
        };
        if let Err(err) = self.storage.save(&snapshot) {
            tracing::warn!(%err, "failed to persist ledger state");
        }
    }
}

fn contains_id<T: Identifiable>(items: &[T], id: Uuid) -> bool {
    items.iter().any(|item| item.id() == id)
}

fn replace_by_id<T: Identifiable>(items: &mut [T], item: T) -> bool {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}

fn remove_by_id<T: Identifiable>(items: &mut Vec<T>, id: Uuid) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}
