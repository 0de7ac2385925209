mod common;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use common::{add_debt, add_person, RecordingScheduler, ReminderEvent};
use debt_core::config::{AppConfig, ConfigManager};
use debt_core::domain::{Debt, DebtDirection, DebtTemplate};
use debt_core::reminder::NullReminderScheduler;
use debt_core::storage::{JsonStorage, MemoryStorage, StorageBackend, StoreSnapshot};
use debt_core::store::LedgerStore;

fn store_on_disk(dir: &TempDir) -> LedgerStore {
    let storage = JsonStorage::new(Some(dir.path().to_path_buf())).expect("json storage");
    LedgerStore::new(
        Box::new(storage),
        Box::new(NullReminderScheduler),
        AppConfig::default(),
    )
}

#[test]
fn full_state_survives_a_reload_field_for_field() {
    let temp = TempDir::new().expect("temp dir");
    let (first_debts, first_people, first_templates) = {
        let mut store = store_on_disk(&temp);
        store.reset_all_data();
        let alex = add_person(&mut store, "Alex");
        let debt = Debt::new(alex, "Alex", DebtDirection::OwedToMe, 5000.0, Utc::now())
            .with_description("Lunch")
            .with_due_date(Utc::now() + Duration::days(7))
            .with_tags(vec!["food".into(), "friends".into()])
            .with_notes("split the bill");
        store.add_debt(debt);
        store.add_template(
            DebtTemplate::new("Lunch", DebtDirection::OwedToMe).with_person_name("Alex"),
        );
        store.mark_as_repaid(store.debts()[0].id, Some(1500.0));
        (
            store.debts().to_vec(),
            store.people().to_vec(),
            store.templates().to_vec(),
        )
    };

    let reloaded = store_on_disk(&temp);
    assert_eq!(reloaded.debts(), first_debts.as_slice());
    assert_eq!(reloaded.people(), first_people.as_slice());
    assert_eq!(reloaded.templates(), first_templates.as_slice());
}

#[test]
fn first_run_seeds_demo_data() {
    let temp = TempDir::new().expect("temp dir");
    let store = store_on_disk(&temp);
    assert_eq!(store.people().len(), 3);
    assert_eq!(store.debts().len(), 3);
    let names: Vec<_> = store.people().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alex", "Maria", "Dmitry"]);
}

#[test]
fn demo_seed_is_not_written_until_a_real_mutation() {
    let temp = TempDir::new().expect("temp dir");
    {
        let _store = store_on_disk(&temp);
    }
    // A fresh look at the directory still reads as empty.
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("json storage");
    assert!(storage.load().expect("load").is_empty());

    {
        let mut store = store_on_disk(&temp);
        add_person(&mut store, "Vera");
    }
    let snapshot = storage.load().expect("load");
    // The mutation persisted the seeded state along with the new person.
    assert_eq!(snapshot.people.len(), 4);
    assert_eq!(snapshot.debts.len(), 3);
}

#[test]
fn existing_state_suppresses_the_demo_seed() {
    let temp = TempDir::new().expect("temp dir");
    {
        let mut store = store_on_disk(&temp);
        store.reset_all_data();
        add_person(&mut store, "Vera");
    }
    let store = store_on_disk(&temp);
    assert_eq!(store.people().len(), 1);
    assert!(store.debts().is_empty());
}

#[test]
fn templates_alone_do_not_suppress_seeding_and_are_kept() {
    let storage = MemoryStorage::with_snapshot(StoreSnapshot {
        templates: vec![DebtTemplate::new("Lunch", DebtDirection::OwedToMe)],
        ..StoreSnapshot::default()
    });
    let store = LedgerStore::new(
        Box::new(storage),
        Box::new(NullReminderScheduler),
        AppConfig::default(),
    );
    assert_eq!(store.people().len(), 3);
    assert_eq!(store.templates().len(), 1);
}

#[test]
fn startup_reschedules_only_eligible_debts() {
    let mut seeded = StoreSnapshot::default();
    let alex = debt_core::domain::Person::new("Alex");
    let eligible = Debt::new(alex.id, "Alex", DebtDirection::OwedToMe, 100.0, Utc::now())
        .with_due_date(Utc::now() + Duration::days(3));
    let eligible_id = eligible.id;
    let undated = Debt::new(alex.id, "Alex", DebtDirection::IOwe, 50.0, Utc::now());
    seeded.people.push(alex);
    seeded.debts.push(eligible);
    seeded.debts.push(undated);

    let (scheduler, events) = RecordingScheduler::new(true);
    let _store = LedgerStore::new(
        Box::new(MemoryStorage::with_snapshot(seeded)),
        Box::new(scheduler),
        AppConfig::default(),
    );
    let events = events.borrow();
    assert_eq!(events[0], ReminderEvent::ClearedAll);
    assert!(events.contains(&ReminderEvent::Scheduled(eligible_id)));
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, ReminderEvent::Scheduled(_)))
            .count(),
        1
    );
}

#[test]
fn disabled_reminders_clear_but_never_schedule() {
    let mut seeded = StoreSnapshot::default();
    let alex = debt_core::domain::Person::new("Alex");
    let debt = Debt::new(alex.id, "Alex", DebtDirection::OwedToMe, 100.0, Utc::now())
        .with_due_date(Utc::now() + Duration::days(3));
    seeded.people.push(alex);
    seeded.debts.push(debt);

    let (scheduler, events) = RecordingScheduler::new(false);
    let _store = LedgerStore::new(
        Box::new(MemoryStorage::with_snapshot(seeded)),
        Box::new(scheduler),
        AppConfig::default(),
    );
    let events = events.borrow();
    assert_eq!(events.as_slice(), &[ReminderEvent::ClearedAll]);
}

#[test]
fn store_survives_a_failing_storage_backend() {
    struct FailingStorage;
    impl StorageBackend for FailingStorage {
        fn save(&self, _snapshot: &StoreSnapshot) -> debt_core::storage::Result<()> {
            Err(debt_core::errors::LedgerError::Storage("disk gone".into()))
        }
        fn load(&self) -> debt_core::storage::Result<StoreSnapshot> {
            Err(debt_core::errors::LedgerError::Storage("disk gone".into()))
        }
    }

    let mut store = LedgerStore::new(
        Box::new(FailingStorage),
        Box::new(NullReminderScheduler),
        AppConfig::default(),
    );
    // Load failure behaves like empty storage: the demo seed appears.
    assert_eq!(store.people().len(), 3);
    // Mutations still apply in memory; the failed save is swallowed.
    let vera = add_person(&mut store, "Vera");
    assert!(store.person(vera).is_some());
    let debt_id = add_debt(
        &mut store,
        vera,
        "Vera",
        DebtDirection::IOwe,
        40.0,
        Utc::now(),
    );
    assert!(store.mark_as_repaid(debt_id, None).applied());
}

#[test]
fn config_round_trips_under_the_data_root() {
    let temp = TempDir::new().expect("temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("config manager");
    assert_eq!(manager.load().expect("defaults"), AppConfig::default());

    let config = AppConfig {
        currency: "$".into(),
        reminders_enabled: true,
    };
    manager.save(&config).expect("save");
    assert_eq!(manager.load().expect("reload"), config);
    assert!(manager.path().exists());
}
