//! Due-date reminder collaborator.
//!
//! The store signals this scheduler after every mutation and never inspects
//! the result; delivery itself belongs to the platform notification layer,
//! which is outside this crate.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::{Debt, DebtStatus, Displayable};

/// External subsystem that schedules and cancels due-date notifications.
pub trait ReminderScheduler {
    /// Schedules a reminder for an eligible debt; implementations must
    /// cancel any pending reminder when the debt is not eligible.
    fn schedule(&self, debt: &Debt);
    fn cancel(&self, debt_id: Uuid);
    /// Clears every pending reminder, then schedules each eligible debt.
    fn reschedule_all(&self, debts: &[Debt]);
}

/// A debt earns a reminder while it has a due date and is not settled.
pub fn reminder_eligible(debt: &Debt) -> bool {
    debt.due_date.is_some()
        && !matches!(debt.status, DebtStatus::Repaid | DebtStatus::WrittenOff)
}

/// Reminder fire time: 09:00 on the day before the due date.
pub fn reminder_trigger(due_date: DateTime<Utc>) -> DateTime<Utc> {
    let day_before = due_date.date_naive() - Duration::days(1);
    Utc.from_utc_datetime(&day_before.and_hms_opt(9, 0, 0).unwrap())
}

/// Inert scheduler for stores that run without notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReminderScheduler;

impl ReminderScheduler for NullReminderScheduler {
    fn schedule(&self, _debt: &Debt) {}
    fn cancel(&self, _debt_id: Uuid) {}
    fn reschedule_all(&self, _debts: &[Debt]) {}
}

/// Scheduler that records its decisions as tracing events, standing in for
/// the platform notification center.
#[derive(Debug, Clone, Copy)]
pub struct LogReminderScheduler {
    pub enabled: bool,
}

impl LogReminderScheduler {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl ReminderScheduler for LogReminderScheduler {
    fn schedule(&self, debt: &Debt) {
        if !self.enabled {
            return;
        }
        match debt.due_date {
            Some(due) if reminder_eligible(debt) => {
                tracing::info!(
                    debt = %debt.id,
                    label = %debt.display_label(),
                    trigger = %reminder_trigger(due),
                    "scheduling due-date reminder"
                );
            }
            _ => self.cancel(debt.id),
        }
    }

    fn cancel(&self, debt_id: Uuid) {
        tracing::debug!(debt = %debt_id, "cancelling due-date reminder");
    }

    fn reschedule_all(&self, debts: &[Debt]) {
        tracing::debug!("clearing pending due-date reminders");
        if !self.enabled {
            return;
        }
        for debt in debts.iter().filter(|debt| reminder_eligible(debt)) {
            self.schedule(debt);
        }
    }
}
