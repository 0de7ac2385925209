//! Derived, read-only views over the ledger collections.
//!
//! Queries never mutate. Time-dependent ones come in pairs: an `_at(now)`
//! core plus a convenience wrapper anchored at `Utc::now()`.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::{Debt, DebtDirection, DebtStatus, Person, StatsPeriod};

use super::LedgerStore;

/// Bucket label for debts without tags.
pub const NO_TAG: &str = "—";

/// How many of the most recently added debts feed `recent_people`.
const RECENT_PEOPLE_WINDOW: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Status filter for the main list screen.
pub enum DebtFilter {
    All,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Sort orders offered by the main list screen.
pub enum SortOrder {
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
    Person,
}

/// One tag's share of the outstanding signed balance.
#[derive(Debug, Clone, PartialEq)]
pub struct TagBreakdown {
    pub tag: String,
    pub amount: f64,
}

/// One person's outstanding exposure within a period.
#[derive(Debug, Clone, PartialEq)]
pub struct TopPerson {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
}

impl LedgerStore {
    /// Status filter, then case-insensitive search over person name and
    /// description, then a stable sort.
    pub fn filtered_debts(&self, filter: DebtFilter, search: &str, order: SortOrder) -> Vec<&Debt> {
        let mut result: Vec<&Debt> = self
            .debts
            .iter()
            .filter(|debt| match filter {
                DebtFilter::All => true,
                DebtFilter::Active => debt.is_outstanding(),
            })
            .collect();
        if !search.is_empty() {
            let needle = search.to_lowercase();
            result.retain(|debt| {
                debt.person_name.to_lowercase().contains(&needle)
                    || debt
                        .description
                        .as_ref()
                        .is_some_and(|text| text.to_lowercase().contains(&needle))
            });
        }
        match order {
            SortOrder::DateDesc => result.sort_by(|a, b| b.date.cmp(&a.date)),
            SortOrder::DateAsc => result.sort_by(|a, b| a.date.cmp(&b.date)),
            SortOrder::AmountDesc => result.sort_by(|a, b| cmp_f64(b.remaining_amount, a.remaining_amount)),
            SortOrder::AmountAsc => result.sort_by(|a, b| cmp_f64(a.remaining_amount, b.remaining_amount)),
            SortOrder::Person => {
                result.sort_by(|a, b| a.person_name.to_lowercase().cmp(&b.person_name.to_lowercase()))
            }
        }
        result
    }

    /// People referenced by the most recently added debts, newest first,
    /// de-duplicated keeping the first occurrence. Biases quick entry
    /// toward recently used contacts.
    pub fn recent_people(&self) -> Vec<&Person> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for debt in self.debts.iter().rev().take(RECENT_PEOPLE_WINDOW) {
            if !seen.insert(debt.person_id) {
                continue;
            }
            if let Some(person) = self.person(debt.person_id) {
                result.push(person);
            }
        }
        result
    }

    pub fn active_debts(&self) -> Vec<&Debt> {
        self.debts.iter().filter(|debt| debt.is_outstanding()).collect()
    }

    pub fn repaid_debts(&self) -> Vec<&Debt> {
        self.debts
            .iter()
            .filter(|debt| debt.status == DebtStatus::Repaid)
            .collect()
    }

    pub fn total_owed_to_me(&self) -> f64 {
        self.outstanding_total(DebtDirection::OwedToMe)
    }

    pub fn total_i_owe(&self) -> f64 {
        self.outstanding_total(DebtDirection::IOwe)
    }

    pub fn net_balance(&self) -> f64 {
        self.total_owed_to_me() - self.total_i_owe()
    }

    /// All-time sum of original amounts over repaid debts.
    pub fn total_repaid(&self) -> f64 {
        self.debts
            .iter()
            .filter(|debt| debt.status == DebtStatus::Repaid)
            .map(|debt| debt.amount)
            .sum()
    }

    pub fn debts_for_person(&self, person_id: Uuid) -> Vec<&Debt> {
        self.debts
            .iter()
            .filter(|debt| debt.person_id == person_id)
            .collect()
    }

    /// Outstanding balance across one person's debts.
    pub fn total_for_person(&self, person_id: Uuid) -> f64 {
        self.debts
            .iter()
            .filter(|debt| debt.person_id == person_id && debt.is_outstanding())
            .map(|debt| debt.remaining_amount)
            .sum()
    }

    /// Outstanding debts due within the next `days` days, soonest first.
    /// Debts with no due date are excluded.
    pub fn debts_due_soon(&self, days: i64) -> Vec<&Debt> {
        self.debts_due_soon_at(Utc::now(), days)
    }

    pub fn debts_due_soon_at(&self, now: DateTime<Utc>, days: i64) -> Vec<&Debt> {
        let end = now + Duration::days(days);
        let mut result: Vec<&Debt> = self
            .debts
            .iter()
            .filter(|debt| debt.is_outstanding())
            .filter(|debt| {
                debt.due_date
                    .is_some_and(|due| due >= now && due <= end)
            })
            .collect();
        result.sort_by(|a, b| a.due_date.cmp(&b.due_date));
        result
    }

    /// Newest debts by debt date, truncated to `limit`.
    pub fn recent_debts(&self, limit: usize) -> Vec<&Debt> {
        let mut result: Vec<&Debt> = self.debts.iter().collect();
        result.sort_by(|a, b| b.date.cmp(&a.date));
        result.truncate(limit);
        result
    }

    pub fn debts_in_period(&self, period: StatsPeriod) -> Vec<&Debt> {
        self.debts_in_period_at(period, Utc::now())
    }

    pub fn debts_in_period_at(&self, period: StatsPeriod, now: DateTime<Utc>) -> Vec<&Debt> {
        self.debts
            .iter()
            .filter(|debt| period.contains(debt.date, now))
            .collect()
    }

    pub fn total_repaid_in_period(&self, period: StatsPeriod) -> f64 {
        self.total_repaid_in_period_at(period, Utc::now())
    }

    pub fn total_repaid_in_period_at(&self, period: StatsPeriod, now: DateTime<Utc>) -> f64 {
        self.debts_in_period_at(period, now)
            .into_iter()
            .filter(|debt| debt.status == DebtStatus::Repaid)
            .map(|debt| debt.amount)
            .sum()
    }

    pub fn total_owed_to_me_in_period(&self, period: StatsPeriod) -> f64 {
        self.outstanding_total_in_period_at(DebtDirection::OwedToMe, period, Utc::now())
    }

    pub fn total_owed_to_me_in_period_at(&self, period: StatsPeriod, now: DateTime<Utc>) -> f64 {
        self.outstanding_total_in_period_at(DebtDirection::OwedToMe, period, now)
    }

    pub fn total_i_owe_in_period(&self, period: StatsPeriod) -> f64 {
        self.outstanding_total_in_period_at(DebtDirection::IOwe, period, Utc::now())
    }

    pub fn total_i_owe_in_period_at(&self, period: StatsPeriod, now: DateTime<Utc>) -> f64 {
        self.outstanding_total_in_period_at(DebtDirection::IOwe, period, now)
    }

    /// Signed outstanding balance split evenly across a debt's tags;
    /// untagged debts accumulate under [`NO_TAG`]. Sorted by descending
    /// absolute value.
    pub fn breakdown_by_tag(&self, period: StatsPeriod) -> Vec<TagBreakdown> {
        self.breakdown_by_tag_at(period, Utc::now())
    }

    pub fn breakdown_by_tag_at(&self, period: StatsPeriod, now: DateTime<Utc>) -> Vec<TagBreakdown> {
        let mut buckets: HashMap<String, f64> = HashMap::new();
        for debt in self.debts_in_period_at(period, now) {
            if !debt.is_outstanding() {
                continue;
            }
            let signed = debt.remaining_amount * direction_sign(debt.direction);
            if debt.tags.is_empty() {
                *buckets.entry(NO_TAG.to_string()).or_default() += signed;
            } else {
                let share = signed / debt.tags.len() as f64;
                for tag in &debt.tags {
                    *buckets.entry(tag.clone()).or_default() += share;
                }
            }
        }
        let mut result: Vec<TagBreakdown> = buckets
            .into_iter()
            .map(|(tag, amount)| TagBreakdown { tag, amount })
            .collect();
        result.sort_by(|a, b| cmp_f64(b.amount.abs(), a.amount.abs()));
        result
    }

    /// Largest outstanding exposures by person, as absolute values,
    /// truncated to `limit` (the home screen passes 5).
    pub fn top_people(&self, period: StatsPeriod, limit: usize) -> Vec<TopPerson> {
        self.top_people_at(period, Utc::now(), limit)
    }

    pub fn top_people_at(
        &self,
        period: StatsPeriod,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Vec<TopPerson> {
        let mut by_person: HashMap<Uuid, (String, f64)> = HashMap::new();
        for debt in self.debts_in_period_at(period, now) {
            if !debt.is_outstanding() {
                continue;
            }
            let entry = by_person
                .entry(debt.person_id)
                .or_insert_with(|| (debt.person_name.clone(), 0.0));
            entry.1 += debt.remaining_amount * direction_sign(debt.direction);
        }
        let mut result: Vec<TopPerson> = by_person
            .into_iter()
            .map(|(id, (name, amount))| TopPerson {
                id,
                name,
                amount: amount.abs(),
            })
            .collect();
        result.sort_by(|a, b| cmp_f64(b.amount, a.amount));
        result.truncate(limit);
        result
    }

    fn outstanding_total(&self, direction: DebtDirection) -> f64 {
        self.debts
            .iter()
            .filter(|debt| debt.direction == direction && debt.is_outstanding())
            .map(|debt| debt.remaining_amount)
            .sum()
    }

    fn outstanding_total_in_period_at(
        &self,
        direction: DebtDirection,
        period: StatsPeriod,
        now: DateTime<Utc>,
    ) -> f64 {
        self.debts_in_period_at(period, now)
            .into_iter()
            .filter(|debt| debt.direction == direction && debt.is_outstanding())
            .map(|debt| debt.remaining_amount)
            .sum()
    }
}

fn direction_sign(direction: DebtDirection) -> f64 {
    match direction {
        DebtDirection::OwedToMe => 1.0,
        DebtDirection::IOwe => -1.0,
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
